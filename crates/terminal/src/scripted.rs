use std::collections::VecDeque;

use eyre::{Result, eyre};

use crate::Prompt;

/// [`Prompt`] that replays canned answers and records everything it was asked and told.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    /// Lines passed to [`Prompt::say`].
    pub output: Vec<String>,
    /// Prompts that were asked, in order.
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    /// Create a prompt answering with `answers`, in order.
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { answers: answers.into_iter().map(Into::into).collect(), ..Default::default() }
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<String> {
        self.asked.push(prompt.to_owned());
        self.answers.pop_front().ok_or_else(|| eyre!("no scripted answer for prompt {prompt:?}"))
    }
}

impl Prompt for ScriptedPrompt {
    fn say(&mut self, line: &str) {
        self.output.push(line.to_owned());
    }

    fn input(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn secret(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn multiline(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }
}
