use std::future::Future;

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use kuma::{KumaApi, is_unauthenticated};
use terminal::Prompt;
use tracing::warn;

use crate::manager::SessionManager;

/// Something that can restore an authenticated session.
#[async_trait]
pub trait Reauthenticate: Send + Sync {
    /// Run the login flow again.
    async fn reauthenticate(&self, prompt: &mut dyn Prompt) -> Result<()>;
}

#[async_trait]
impl<'a, A: KumaApi + ?Sized> Reauthenticate for SessionManager<'a, A> {
    async fn reauthenticate(&self, prompt: &mut dyn Prompt) -> Result<()> {
        self.login(prompt).await
    }
}

/// Run `op`, logging in again and retrying exactly once if it fails as unauthenticated.
///
/// Other errors, a failed re-login, and a second failure all propagate.
pub async fn with_reauth<S, T, F, Fut>(auth: &S, prompt: &mut dyn Prompt, mut op: F) -> Result<T>
where
    S: Reauthenticate + ?Sized,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match op().await {
        Err(e) if is_unauthenticated(&e) => {
            warn!(error = %e, "Session expired, logging in again");
            auth.reauthenticate(prompt).await.wrap_err("re-login after session expiry failed")?;
            op().await
        }
        result => result,
    }
}
