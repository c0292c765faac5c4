use std::fmt;

use eyre::{Result, WrapErr, bail};
use kuma::{KumaApi, LoginOutcome};
use terminal::Prompt;
use tracing::{debug, info, warn};

use crate::token::TokenStore;

/// Username and password for the monitoring service.
#[derive(Clone)]
pub struct Credentials {
    /// Login username
    pub username: String,
    /// Login password
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Establishes an authenticated session, preferring the cached token.
pub struct SessionManager<'a, A: ?Sized> {
    api: &'a A,
    store: TokenStore,
    credentials: Credentials,
}

impl<A: ?Sized> fmt::Debug for SessionManager<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("store", &self.store)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl<'a, A: KumaApi + ?Sized> SessionManager<'a, A> {
    /// Create a manager logging `api` in with `credentials` and caching tokens in `store`.
    pub const fn new(api: &'a A, store: TokenStore, credentials: Credentials) -> Self {
        Self { api, store, credentials }
    }

    /// Log in, trying the cached token first and falling back to username/password.
    ///
    /// A rejected token is discarded before the password login. At most one attempt
    /// of each kind is made.
    pub async fn login(&self, prompt: &mut dyn Prompt) -> Result<()> {
        if let Some(token) = self.store.load()? {
            match self.api.login_by_token(&token).await {
                Ok(()) => {
                    info!(path = %self.store.path().display(), "Resumed session from cached token");
                    return Ok(());
                }
                Err(e) => {
                    warn!(error = %e, "Cached token rejected, discarding it");
                    if let Err(e) = self.api.logout().await {
                        debug!(error = %e, "Logout of stale session failed");
                    }
                    self.store.clear()?;
                }
            }
        }

        self.login_with_password(prompt).await
    }

    async fn login_with_password(&self, prompt: &mut dyn Prompt) -> Result<()> {
        let Credentials { username, password } = &self.credentials;

        let token = match self.api.login(username, password, None).await.wrap_err("login failed")? {
            LoginOutcome::Token(token) => token,
            LoginOutcome::TotpRequired => {
                let code = prompt.secret("Enter your 2FA code")?;
                match self
                    .api
                    .login(username, password, Some(code.trim()))
                    .await
                    .wrap_err("login with 2FA code failed")?
                {
                    LoginOutcome::Token(token) => token,
                    LoginOutcome::TotpRequired => bail!("2FA code was not accepted"),
                }
            }
        };

        self.store.save(&token)?;
        info!(user = %username, "Logged in");
        Ok(())
    }
}
