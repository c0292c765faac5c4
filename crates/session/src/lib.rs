//! Session handling: token cache, login flow and re-authentication on expiry.
#![allow(clippy::uninlined_format_args)]
/// Login flow against the monitoring service
pub mod manager;
/// Retry-once wrapper for calls that hit an expired session
pub mod reauth;
/// On-disk token cache
pub mod token;

pub use manager::{Credentials, SessionManager};
pub use reauth::{Reauthenticate, with_reauth};
pub use token::TokenStore;
