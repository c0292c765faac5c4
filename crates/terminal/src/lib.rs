//! Operator input and output.
//!
//! Everything that talks to the person at the keyboard goes through [`Prompt`], so the
//! maintenance flows can run against [`ScriptedPrompt`] in tests.
use eyre::Result;

mod scripted;
mod tty;

pub use scripted::ScriptedPrompt;
pub use tty::TerminalPrompt;

/// Interactive input/output capability.
pub trait Prompt: Send {
    /// Print one line for the operator.
    fn say(&mut self, line: &str);

    /// Ask for a single line of input.
    fn input(&mut self, prompt: &str) -> Result<String>;

    /// Ask for a single line of input without echoing it.
    fn secret(&mut self, prompt: &str) -> Result<String>;

    /// Ask for free text spanning several lines, terminated by end of input.
    fn multiline(&mut self, prompt: &str) -> Result<String>;
}
