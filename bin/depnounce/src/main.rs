//! Entrypoint.

use clap::Parser;
use config::Opts;
use dotenvy::dotenv;
use maintenance::{Maintainer, flow};
use notify::{Announcer, SlackNotifier};
use session::{Credentials, SessionManager, TokenStore};
use terminal::TerminalPrompt;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    if let Ok(custom_env_file) = std::env::var("ENV_FILE") {
        dotenvy::from_filename(custom_env_file)?;
    } else {
        // Try the default .env file, and ignore if it doesn't exist.
        dotenv().ok();
    }

    let opts = Opts::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let api = kuma::Client::new(opts.kuma.host.clone())?;
    let credentials = Credentials { username: opts.kuma.username, password: opts.kuma.password };
    let session = SessionManager::new(&api, TokenStore::new(opts.kuma.token_file), credentials);
    let mut prompt = TerminalPrompt;

    session.login(&mut prompt).await?;
    info!(host = %opts.kuma.host, "Connected to Uptime Kuma");

    let slack = opts.slack.hook.map(SlackNotifier::new);
    let announcer = slack.as_ref().map(|s| s as &dyn Announcer);
    let maintainer = Maintainer::new(&api, &session);

    if opts.remove {
        flow::remove(&maintainer, announcer, &mut prompt).await?;
    } else {
        flow::create(&maintainer, announcer, &mut prompt, chrono::Utc::now).await?;
    }

    Ok(())
}
