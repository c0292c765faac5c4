use eyre::{Result, WrapErr, bail};
use kuma::{KumaApi, Maintenance, Monitor};
use session::{Reauthenticate, with_reauth};
use terminal::Prompt;
use tracing::debug;

use crate::Maintainer;

impl<A: KumaApi + ?Sized, S: Reauthenticate + ?Sized> Maintainer<'_, A, S> {
    /// Fetch all monitors and print them as a 1-based menu, in server order.
    pub async fn list_monitors(&self, prompt: &mut dyn Prompt) -> Result<Vec<Monitor>> {
        let api = self.api;
        let monitors = with_reauth(self.auth, prompt, move || api.monitors())
            .await
            .wrap_err("failed to list monitors")?;
        debug!(count = monitors.len(), "Fetched monitors");

        for (idx, monitor) in monitors.iter().enumerate() {
            prompt.say(&format!("{}. {}", idx + 1, monitor.name));
        }
        Ok(monitors)
    }

    /// Fetch all maintenance windows and print their ID, title and active flag.
    pub async fn list_maintenances(&self, prompt: &mut dyn Prompt) -> Result<Vec<Maintenance>> {
        let api = self.api;
        let maintenances = with_reauth(self.auth, prompt, move || api.maintenances())
            .await
            .wrap_err("failed to list maintenances")?;

        if maintenances.is_empty() {
            prompt.say("No maintenance windows found.");
        }
        for m in &maintenances {
            prompt.say(&format!("ID: {}, Title: {}, Active: {}", m.id, m.title, m.active));
        }
        Ok(maintenances)
    }
}

/// Ask the operator to pick a monitor by its 1-based menu number until the answer is valid.
pub fn select_monitor<'m>(monitors: &'m [Monitor], prompt: &mut dyn Prompt) -> Result<&'m Monitor> {
    if monitors.is_empty() {
        bail!("no monitors available to put under maintenance");
    }

    loop {
        let answer = prompt.input("Select a monitor by number")?;
        let Ok(choice) = answer.trim().parse::<usize>() else {
            prompt.say("Please enter a number.");
            continue;
        };
        match choice.checked_sub(1).and_then(|idx| monitors.get(idx)) {
            Some(monitor) => return Ok(monitor),
            None => prompt.say("Invalid choice. Please select a valid monitor number."),
        }
    }
}
