//! Failure reporting for workflow boundaries.
//!
//! Failures go to `tracing` everywhere and, in the browser, to the devtools
//! console as well.

use std::fmt::Display;

/// Record a failure caught at a workflow boundary.
pub fn failure(context: &str, error: &dyn Display) {
    tracing::error!(context, error = %error, "dashboard workflow failed");
    #[cfg(target_arch = "wasm32")]
    gloo::console::error!(format!("{context}: {error}"));
}

/// Record a degraded but non-fatal outcome.
pub fn degraded(context: &str, detail: &str) {
    tracing::warn!(context, detail, "dashboard workflow degraded");
    #[cfg(target_arch = "wasm32")]
    gloo::console::warn!(format!("{context}: {detail}"));
}
