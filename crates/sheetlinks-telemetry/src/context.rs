//! Span helpers for command-scoped context.

use tracing::Span;

use crate::init::build_sha;

/// Span wrapping one CLI command, carrying its trace identifier and the build.
#[must_use]
pub fn command_span(command: &str, trace_id: &str) -> Span {
    tracing::info_span!(
        "command",
        command = %command,
        trace_id = %trace_id,
        build_sha = %build_sha()
    )
}
