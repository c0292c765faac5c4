//! Depnounce configuration
use std::path::PathBuf;

use clap::Parser;
use url::Url;

/// Default location of the cached session token.
pub const DEFAULT_TOKEN_FILE: &str = ".token";

/// Uptime Kuma connection options
#[derive(Debug, Clone, Parser)]
pub struct KumaOpts {
    /// Base URL of the Uptime Kuma instance
    #[clap(long = "kuma-host", env = "KUMA_HOST")]
    pub host: Url,
    /// Uptime Kuma username
    #[clap(long = "kuma-user", env = "KUMA_USER")]
    pub username: String,
    /// Uptime Kuma password
    #[clap(long = "kuma-pass", env = "KUMA_PASS", hide_env_values = true)]
    pub password: String,
    /// File holding the cached session token
    #[clap(long = "kuma-token-file", env = "KUMA_TOKEN_FILE", default_value = DEFAULT_TOKEN_FILE)]
    pub token_file: PathBuf,
}

/// Slack notification options
#[derive(Debug, Clone, Parser)]
pub struct SlackOpts {
    /// Slack incoming webhook URL. Notifications are skipped when unset.
    #[clap(long = "slack-hook", env = "SLACK_HOOK", hide_env_values = true)]
    pub hook: Option<Url>,
}

/// CLI options for depnounce
#[derive(Debug, Clone, Parser)]
#[clap(name = "depnounce", about = "Put Uptime Kuma monitors into maintenance and announce it")]
pub struct Opts {
    /// Uptime Kuma connection configuration
    #[clap(flatten)]
    pub kuma: KumaOpts,

    /// Slack notification configuration
    #[clap(flatten)]
    pub slack: SlackOpts,

    /// Remove an existing maintenance instead of creating one
    #[clap(long)]
    pub remove: bool,
}
