use chrono::{DateTime, Utc};
use eyre::Result;
use kuma::{KumaApi, Maintenance, Monitor};
use notify::Announcer;
use session::Reauthenticate;
use terminal::Prompt;
use tracing::{error, info, warn};

use crate::{Maintainer, browser::select_monitor, orchestrator::CreatedMaintenance};

/// Pick a monitor, put it under maintenance and announce it.
///
/// `clock` is read once the operator has finished answering, so the window starts when
/// it is created.
pub async fn create<A, S, C>(
    maintainer: &Maintainer<'_, A, S>,
    announcer: Option<&dyn Announcer>,
    prompt: &mut dyn Prompt,
    clock: C,
) -> Result<CreatedMaintenance>
where
    A: KumaApi + ?Sized,
    S: Reauthenticate + ?Sized,
    C: Fn() -> DateTime<Utc>,
{
    prompt.say("Fetching monitors...");
    let monitors = maintainer.list_monitors(prompt).await?;
    let monitor = select_monitor(&monitors, prompt)?;
    let description = prompt.multiline("Enter a description for the maintenance")?;

    let created = maintainer.create_maintenance(prompt, monitor, &description, clock()).await?;

    announce(
        announcer,
        prompt,
        &creation_header(monitor),
        &creation_body(&description, created.id),
    )
    .await;
    Ok(created)
}

/// Show existing windows, remove the one the operator names and announce it.
///
/// Returns `None` when the operator entered an invalid ID; nothing is announced then.
pub async fn remove<A, S>(
    maintainer: &Maintainer<'_, A, S>,
    announcer: Option<&dyn Announcer>,
    prompt: &mut dyn Prompt,
) -> Result<Option<u64>>
where
    A: KumaApi + ?Sized,
    S: Reauthenticate + ?Sized,
{
    prompt.say("Listing all maintenances...");
    let maintenances = maintainer.list_maintenances(prompt).await?;

    let Some(id) = maintainer.remove_maintenance(prompt).await? else {
        info!("No maintenance removed, skipping notification");
        return Ok(None);
    };

    let removed = maintenances.iter().find(|m| m.id == id);
    announce(announcer, prompt, &removal_header(id), &removal_body(id, removed)).await;
    Ok(Some(id))
}

/// Deliver an announcement. Failures are reported and never abort the flow.
async fn announce(
    announcer: Option<&dyn Announcer>,
    prompt: &mut dyn Prompt,
    header: &str,
    body: &str,
) {
    let Some(announcer) = announcer else {
        warn!("No Slack webhook configured, skipping notification");
        return;
    };

    match announcer.announce(header, body).await {
        Ok(()) => info!("Notification sent"),
        Err(e) => {
            error!(error = %e, "Failed to send notification");
            prompt.say(&format!("Failed to send notification: {}", e));
        }
    }
}

fn creation_header(monitor: &Monitor) -> String {
    format!(":construction: *{}* is under maintenance for the next 2 hours", monitor.name)
}

fn creation_body(description: &str, id: u64) -> String {
    if description.is_empty() {
        format!("Maintenance ID: {}", id)
    } else {
        format!("{}\nMaintenance ID: {}", description, id)
    }
}

fn removal_header(id: u64) -> String {
    format!(":white_check_mark: Maintenance {} has been removed", id)
}

fn removal_body(id: u64, removed: Option<&Maintenance>) -> String {
    match removed {
        Some(m) => format!("*{}* is no longer active", m.title),
        None => format!("Maintenance window {} is no longer active", id),
    }
}
