//! Uptime Kuma API client and data types.
#![allow(clippy::uninlined_format_args)]
/// The `KumaApi` trait implemented by clients of the monitoring service
pub mod api;
/// Detection of authentication failures
pub mod auth;
/// HTTP client for the Uptime Kuma JSON API
pub mod client;
/// Request and response payloads
pub mod models;
/// In-memory fake of the service for tests
#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use api::KumaApi;
pub use auth::is_unauthenticated;
pub use client::Client;
pub use models::{
    IdRef, LoginOutcome, Maintenance, MaintenanceStrategy, Monitor, NewMaintenance, StatusPage,
};
