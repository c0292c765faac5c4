use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use eyre::{Result, bail, eyre};

use crate::{
    api::KumaApi,
    models::{IdRef, LoginOutcome, Maintenance, Monitor, NewMaintenance, StatusPage},
};

/// Mutable state behind [`FakeKuma`]. Tests seed it and inspect it afterwards.
#[derive(Debug, Default)]
pub struct FakeState {
    /// Accepted username
    pub username: String,
    /// Accepted password
    pub password: String,
    /// One-time code demanded at login, when 2FA is enabled
    pub totp: Option<String>,
    /// Token handed out on a successful password login
    pub issued_token: String,
    /// Tokens that `login_by_token` accepts
    pub accepted_tokens: Vec<String>,
    /// Monitors returned by `monitors`
    pub monitors: Vec<Monitor>,
    /// Maintenance windows, including the ones created through the fake
    pub maintenances: Vec<Maintenance>,
    /// Status pages returned by `status_pages`
    pub status_pages: Vec<StatusPage>,
    /// Payloads received by `add_maintenance`
    pub added: Vec<NewMaintenance>,
    /// Arguments received by `add_monitor_maintenance`
    pub monitor_links: Vec<(u64, Vec<IdRef>)>,
    /// Arguments received by `add_maintenance_status_page`
    pub page_links: Vec<(u64, Vec<IdRef>)>,
    /// IDs received by `delete_maintenance`
    pub deleted: Vec<u64>,
    /// Every operation invoked, by name, in order
    pub calls: Vec<String>,
    /// Scripted failures as `(operation, message)`; the head is consumed when it matches
    pub failures: VecDeque<(String, String)>,
    next_id: u64,
}

/// In-memory [`KumaApi`] with scripted failures and call recording.
#[derive(Debug)]
pub struct FakeKuma {
    state: Mutex<FakeState>,
}

impl Default for FakeKuma {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeKuma {
    /// A fake accepting `admin`/`secret` and issuing `issued-token`.
    pub fn new() -> Self {
        let state = FakeState {
            username: "admin".to_owned(),
            password: "secret".to_owned(),
            issued_token: "issued-token".to_owned(),
            next_id: 1,
            ..Default::default()
        };
        Self { state: Mutex::new(state) }
    }

    /// Lock the state for seeding or inspection.
    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next call to `operation` fail with `message`.
    pub fn fail_next(&self, operation: &str, message: &str) {
        self.state().failures.push_back((operation.to_owned(), message.to_owned()));
    }

    /// Names of the operations invoked so far.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    /// Number of times `operation` was invoked.
    pub fn count(&self, operation: &str) -> usize {
        self.state().calls.iter().filter(|call| call.as_str() == operation).count()
    }

    fn enter(&self, operation: &str) -> Result<MutexGuard<'_, FakeState>> {
        let mut state = self.state();
        state.calls.push(operation.to_owned());
        if state.failures.front().is_some_and(|(op, _)| op == operation) {
            let (_, message) = state.failures.pop_front().unwrap_or_default();
            return Err(eyre!(message));
        }
        Ok(state)
    }
}

#[async_trait]
impl KumaApi for FakeKuma {
    async fn login(
        &self,
        username: &str,
        password: &str,
        totp: Option<&str>,
    ) -> Result<LoginOutcome> {
        let mut state = self.enter("login")?;
        if username != state.username || password != state.password {
            bail!("Incorrect username or password.");
        }
        match (state.totp.as_deref(), totp) {
            (Some(_), None) => return Ok(LoginOutcome::TotpRequired),
            (Some(expected), Some(given)) if expected != given => bail!("Invalid Token!"),
            _ => {}
        }
        let token = state.issued_token.clone();
        state.accepted_tokens.push(token.clone());
        Ok(LoginOutcome::Token(token))
    }

    async fn login_by_token(&self, token: &str) -> Result<()> {
        let state = self.enter("login_by_token")?;
        if !state.accepted_tokens.iter().any(|t| t == token) {
            bail!("Invalid token");
        }
        Ok(())
    }

    async fn logout(&self) -> Result<()> {
        self.enter("logout").map(|_| ())
    }

    async fn monitors(&self) -> Result<Vec<Monitor>> {
        Ok(self.enter("monitors")?.monitors.clone())
    }

    async fn maintenances(&self) -> Result<Vec<Maintenance>> {
        Ok(self.enter("maintenances")?.maintenances.clone())
    }

    async fn add_maintenance(&self, maintenance: &NewMaintenance) -> Result<u64> {
        let mut state = self.enter("add_maintenance")?;
        let id = state.next_id;
        state.next_id += 1;
        state.added.push(maintenance.clone());
        state.maintenances.push(Maintenance {
            id,
            title: maintenance.title.clone(),
            description: maintenance.description.clone(),
            active: maintenance.active,
            strategy: Some(maintenance.strategy),
            date_range: maintenance.date_range.iter().cloned().map(Some).collect(),
            duration_minutes: Some(maintenance.duration_minutes),
            timezone_option: Some(maintenance.timezone_option.clone()),
        });
        Ok(id)
    }

    async fn delete_maintenance(&self, id: u64) -> Result<()> {
        let mut state = self.enter("delete_maintenance")?;
        state.deleted.push(id);
        let before = state.maintenances.len();
        state.maintenances.retain(|m| m.id != id);
        if state.maintenances.len() == before {
            bail!("Maintenance {} not found", id);
        }
        Ok(())
    }

    async fn add_monitor_maintenance(&self, id: u64, monitors: &[IdRef]) -> Result<()> {
        self.enter("add_monitor_maintenance")?.monitor_links.push((id, monitors.to_vec()));
        Ok(())
    }

    async fn status_pages(&self) -> Result<Vec<StatusPage>> {
        Ok(self.enter("status_pages")?.status_pages.clone())
    }

    async fn add_maintenance_status_page(&self, id: u64, pages: &[IdRef]) -> Result<()> {
        self.enter("add_maintenance_status_page")?.page_links.push((id, pages.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_failure_is_consumed_once() {
        let fake = FakeKuma::new();
        fake.fail_next("monitors", "You are not logged in.");

        assert!(fake.monitors().await.is_err());
        assert!(fake.monitors().await.is_ok());
        assert_eq!(fake.count("monitors"), 2);
    }

    #[tokio::test]
    async fn password_login_issues_accepted_token() {
        let fake = FakeKuma::new();
        let outcome = fake.login("admin", "secret", None).await.unwrap();
        assert_eq!(outcome, LoginOutcome::Token("issued-token".to_owned()));
        fake.login_by_token("issued-token").await.unwrap();
        assert!(fake.login_by_token("other").await.is_err());
    }
}
