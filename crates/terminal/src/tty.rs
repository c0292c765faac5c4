use std::io::{self, Read};

use dialoguer::{Input, Password};
use eyre::{Result, WrapErr};

use crate::Prompt;

/// [`Prompt`] backed by the process terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .wrap_err("failed to read operator input")
    }

    fn secret(&mut self, prompt: &str) -> Result<String> {
        Password::new().with_prompt(prompt).interact().wrap_err("failed to read secret input")
    }

    fn multiline(&mut self, prompt: &str) -> Result<String> {
        println!("{prompt} (finish with Ctrl-D)");
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).wrap_err("failed to read description")?;
        Ok(text.trim_end().to_owned())
    }
}
