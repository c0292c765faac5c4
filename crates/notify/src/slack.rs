use async_trait::async_trait;
use eyre::{Result, WrapErr, bail};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::Announcer;

/// Mention that pings everyone in the channel.
const CHANNEL_MENTION: &str = "<!channel>";

/// Line between the header and the body.
const SEPARATOR: &str = "──────────────────────────────";

/// Payload accepted by Slack incoming webhooks.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SlackMessage {
    /// Message text in Slack mrkdwn
    pub text: String,
    /// Render `text` as mrkdwn
    pub mrkdwn: bool,
}

impl SlackMessage {
    /// Build a channel-wide message from a header and a body.
    pub fn new(header: &str, body: &str) -> Self {
        Self {
            text: format!("{}\n{}\n{}\n{}", CHANNEL_MENTION, header, SEPARATOR, body),
            mrkdwn: true,
        }
    }
}

/// Posts announcements to a Slack incoming webhook.
#[derive(Debug, Clone)]
pub struct SlackNotifier {
    http: HttpClient,
    webhook: Url,
}

impl SlackNotifier {
    /// Create a notifier for `webhook`.
    pub fn new(webhook: Url) -> Self {
        Self { http: HttpClient::new(), webhook }
    }

    /// Send `message`. Anything but HTTP 200 is an error carrying status and body.
    pub async fn send(&self, message: &SlackMessage) -> Result<()> {
        let resp = self
            .http
            .post(self.webhook.clone())
            .json(message)
            .send()
            .await
            .wrap_err("failed to reach slack webhook")?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            bail!("slack webhook returned {}: {}", status, body);
        }
        debug!("Slack notification delivered");
        Ok(())
    }
}

#[async_trait]
impl Announcer for SlackNotifier {
    async fn announce(&self, header: &str, body: &str) -> Result<()> {
        self.send(&SlackMessage::new(header, body)).await
    }
}
