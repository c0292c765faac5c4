use async_trait::async_trait;
use eyre::Result;

use crate::models::{IdRef, LoginOutcome, Maintenance, Monitor, NewMaintenance, StatusPage};

/// Operations consumed from the Uptime Kuma service.
///
/// Implementations keep the session token internally: a successful [`KumaApi::login`] or
/// [`KumaApi::login_by_token`] authenticates every later call on the same value.
#[async_trait]
pub trait KumaApi: Send + Sync {
    /// Log in with username and password, plus the one-time code when 2FA is enabled.
    async fn login(
        &self,
        username: &str,
        password: &str,
        totp: Option<&str>,
    ) -> Result<LoginOutcome>;

    /// Resume a session from a previously issued token.
    async fn login_by_token(&self, token: &str) -> Result<()>;

    /// End the current session.
    async fn logout(&self) -> Result<()>;

    /// All monitors, in server order.
    async fn monitors(&self) -> Result<Vec<Monitor>>;

    /// All maintenance windows, in server order.
    async fn maintenances(&self) -> Result<Vec<Maintenance>>;

    /// Create a maintenance window and return its ID.
    async fn add_maintenance(&self, maintenance: &NewMaintenance) -> Result<u64>;

    /// Delete a maintenance window.
    async fn delete_maintenance(&self, id: u64) -> Result<()>;

    /// Link a maintenance window to monitors.
    async fn add_monitor_maintenance(&self, id: u64, monitors: &[IdRef]) -> Result<()>;

    /// All status pages.
    async fn status_pages(&self) -> Result<Vec<StatusPage>>;

    /// Link a maintenance window to status pages.
    async fn add_maintenance_status_page(&self, id: u64, pages: &[IdRef]) -> Result<()>;
}
