//! Chat notifications for maintenance actions.
#![allow(clippy::uninlined_format_args)]
use async_trait::async_trait;
use eyre::Result;

/// Slack incoming-webhook notifier
pub mod slack;

pub use slack::{SlackMessage, SlackNotifier};

/// Destination for maintenance announcements.
#[async_trait]
pub trait Announcer: Send + Sync {
    /// Deliver one announcement made of a header line and a body.
    async fn announce(&self, header: &str, body: &str) -> Result<()>;
}
