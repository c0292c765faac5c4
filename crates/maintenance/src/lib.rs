//! Maintenance workflows: browsing monitors and windows, creating and removing windows,
//! and announcing the result.
#![allow(clippy::uninlined_format_args)]
/// Listing and selection of monitors and maintenance windows
pub mod browser;
/// The two top-level flows driven by the CLI
pub mod flow;
/// Creation and removal of maintenance windows
pub mod orchestrator;

#[cfg(test)]
mod test_utils;

pub use browser::select_monitor;
pub use orchestrator::{CreatedMaintenance, build_maintenance};

/// Entry point for maintenance operations against one monitoring service.
///
/// Every remote call goes through [`session::with_reauth`] using `auth`.
#[derive(Debug)]
pub struct Maintainer<'a, A: ?Sized, S: ?Sized> {
    api: &'a A,
    auth: &'a S,
}

impl<'a, A: ?Sized, S: ?Sized> Maintainer<'a, A, S> {
    /// Create a maintainer calling `api` and re-authenticating through `auth`.
    pub const fn new(api: &'a A, auth: &'a S) -> Self {
        Self { api, auth }
    }
}
