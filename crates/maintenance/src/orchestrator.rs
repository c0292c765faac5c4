use chrono::{DateTime, TimeDelta, Utc};
use eyre::{Result, WrapErr};
use kuma::{IdRef, KumaApi, MaintenanceStrategy, Monitor, NewMaintenance};
use session::{Reauthenticate, with_reauth};
use terminal::Prompt;
use tracing::{info, warn};

use crate::Maintainer;

/// Length of a maintenance window created by this tool.
pub const WINDOW_MINUTES: u32 = 120;

/// Timezone the window is scheduled in.
pub const TIMEZONE: &str = "UTC";

/// Wire format of the `dateRange` entries.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of [`Maintainer::create_maintenance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedMaintenance {
    /// ID of the new maintenance window
    pub id: u64,
    /// Number of status pages the window was linked to
    pub status_pages: usize,
}

/// Build a single-occurrence window for `monitor` starting at `now`.
pub fn build_maintenance(monitor: &Monitor, description: &str, now: DateTime<Utc>) -> NewMaintenance {
    let end = now + TimeDelta::minutes(i64::from(WINDOW_MINUTES));
    NewMaintenance {
        title: format!("Maintenance for {}", monitor.name),
        description: description.to_owned(),
        strategy: MaintenanceStrategy::Single,
        active: true,
        interval_day: 1,
        date_range: [now.format(DATE_FORMAT).to_string(), end.format(DATE_FORMAT).to_string()],
        weekdays: vec![],
        days_of_month: vec![],
        cron: None,
        duration_minutes: WINDOW_MINUTES,
        timezone_option: TIMEZONE.to_owned(),
    }
}

impl<A: KumaApi + ?Sized, S: Reauthenticate + ?Sized> Maintainer<'_, A, S> {
    /// Create a maintenance window for `monitor` and link it to every status page.
    ///
    /// A failure after the window exists leaves it partially linked; the error names the
    /// window so it can be cleaned up by hand.
    pub async fn create_maintenance(
        &self,
        prompt: &mut dyn Prompt,
        monitor: &Monitor,
        description: &str,
        now: DateTime<Utc>,
    ) -> Result<CreatedMaintenance> {
        let api = self.api;
        let payload = build_maintenance(monitor, description, now);
        let payload = &payload;

        let id = with_reauth(self.auth, prompt, move || api.add_maintenance(payload))
            .await
            .wrap_err("failed to create maintenance")?;
        info!(maintenance_id = id, monitor_id = monitor.id, "Created maintenance");

        let monitor_refs = [IdRef::from(monitor.id)];
        let monitor_refs = &monitor_refs;
        with_reauth(self.auth, prompt, move || api.add_monitor_maintenance(id, monitor_refs))
            .await
            .wrap_err_with(|| {
                format!("maintenance {} was created but not linked to monitor {}", id, monitor.id)
            })?;

        let pages = with_reauth(self.auth, prompt, move || api.status_pages())
            .await
            .wrap_err_with(|| {
                format!("maintenance {} was created but status pages could not be listed", id)
            })?;
        let page_refs: Vec<IdRef> = pages.iter().map(|page| IdRef::from(page.id)).collect();

        if page_refs.is_empty() {
            info!(maintenance_id = id, "No status pages to link");
        } else {
            let refs = page_refs.as_slice();
            with_reauth(self.auth, prompt, move || api.add_maintenance_status_page(id, refs))
                .await
                .wrap_err_with(|| {
                    format!("maintenance {} was created but not linked to status pages", id)
                })?;
            info!(maintenance_id = id, status_pages = page_refs.len(), "Linked status pages");
        }

        prompt.say(&format!("Monitor {} is now under maintenance with ID {}", monitor.name, id));
        prompt.say(&format!("Linked to {} status page(s).", page_refs.len()));
        Ok(CreatedMaintenance { id, status_pages: page_refs.len() })
    }

    /// Ask for a maintenance ID and delete it.
    ///
    /// Returns `None` without calling the service when the answer is not a valid ID.
    pub async fn remove_maintenance(&self, prompt: &mut dyn Prompt) -> Result<Option<u64>> {
        let answer = prompt.input("Enter the maintenance ID to remove")?;
        let Ok(id) = answer.trim().parse::<u64>() else {
            warn!(input = %answer, "Rejected maintenance ID");
            prompt.say("Invalid ID. Please enter a valid maintenance ID.");
            return Ok(None);
        };

        let api = self.api;
        with_reauth(self.auth, prompt, move || api.delete_maintenance(id))
            .await
            .wrap_err_with(|| format!("failed to delete maintenance {}", id))?;
        info!(maintenance_id = id, "Removed maintenance");

        prompt.say(&format!("Maintenance with ID {} removed.", id));
        Ok(Some(id))
    }
}
