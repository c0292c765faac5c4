use eyre::Report;

/// Message fragments the service uses when a session is missing or expired.
const UNAUTHENTICATED_MARKERS: [&str; 3] = ["not logged in", "unauthorized", "session expired"];

/// Checks whether any cause in the error chain reports a missing or expired session.
pub fn is_unauthenticated(err: &Report) -> bool {
    err.chain().any(|cause| {
        let msg = cause.to_string().to_lowercase();
        UNAUTHENTICATED_MARKERS.iter().any(|marker| msg.contains(marker))
    })
}
