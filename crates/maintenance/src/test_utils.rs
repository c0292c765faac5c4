use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use eyre::{Result, eyre};
use kuma::Monitor;
use notify::Announcer;
use session::Reauthenticate;
use terminal::Prompt;

pub(crate) fn monitor(id: u64, name: &str) -> Monitor {
    Monitor { id, name: name.to_owned() }
}

pub(crate) fn monitors() -> Vec<Monitor> {
    vec![monitor(1, "A"), monitor(2, "B")]
}

/// Re-authentication that always succeeds and counts how often it ran.
#[derive(Debug, Default)]
pub(crate) struct CountingAuth {
    logins: AtomicUsize,
}

impl CountingAuth {
    pub(crate) fn logins(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Reauthenticate for CountingAuth {
    async fn reauthenticate(&self, _prompt: &mut dyn Prompt) -> Result<()> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Announcer recording `(header, body)` pairs, optionally failing every delivery.
#[derive(Debug, Default)]
pub(crate) struct RecordingAnnouncer {
    pub(crate) sent: Mutex<Vec<(String, String)>>,
    pub(crate) fail: bool,
}

impl RecordingAnnouncer {
    pub(crate) fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Announcer for RecordingAnnouncer {
    async fn announce(&self, header: &str, body: &str) -> Result<()> {
        self.sent.lock().unwrap().push((header.to_owned(), body.to_owned()));
        if self.fail { Err(eyre!("slack webhook returned 500 Internal Server Error")) } else { Ok(()) }
    }
}
