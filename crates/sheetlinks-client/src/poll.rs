//! Cancellable polling of server-reported upload progress.
//!
//! # Design
//! - The server's progress record is the only progress source; nothing is
//!   simulated client-side.
//! - Cancellation is cooperative: the token is checked after every sleep and
//!   after every fetch, so a cancelled poller never applies a late update.
//! - The first fetch happens one interval after start, giving the upload
//!   request time to register its progress record.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sheetlinks_api_models::UploadProgress;

use crate::api::DashboardApi;
use crate::error::ClientError;

/// Delay between progress fetches.
pub const PROGRESS_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Clock and sleep source, swapped for an instant fake in tests.
#[async_trait(?Send)]
pub trait Timer {
    /// Suspend for `duration`.
    async fn sleep(&self, duration: Duration);

    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;
}

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Fresh, uncancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// True once [`CancelToken::cancel`] has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// How a polling run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// The server reported 100 %.
    Completed(UploadProgress),
    /// The token was cancelled.
    Cancelled,
    /// A progress fetch failed; polling stops without retrying.
    Failed(ClientError),
}

/// Poll the progress endpoint until completion, cancellation or failure.
///
/// `on_update` receives every report with a non-zero percentage, including
/// the final one.
pub async fn poll_progress<A, T, F>(
    api: &A,
    timer: &T,
    token: &CancelToken,
    interval: Duration,
    mut on_update: F,
) -> PollOutcome
where
    A: DashboardApi + ?Sized,
    T: Timer + ?Sized,
    F: FnMut(&UploadProgress),
{
    loop {
        if token.is_cancelled() {
            return PollOutcome::Cancelled;
        }
        timer.sleep(interval).await;
        if token.is_cancelled() {
            return PollOutcome::Cancelled;
        }

        let progress = match api.fetch_progress().await {
            Ok(progress) => progress,
            Err(err) => {
                tracing::warn!(error = %err, "upload progress poll failed");
                return PollOutcome::Failed(err);
            }
        };
        if token.is_cancelled() {
            return PollOutcome::Cancelled;
        }

        if progress.percent() > 0 {
            tracing::debug!(
                percent = progress.percent(),
                stage = %progress.status,
                "upload progress"
            );
            on_update(&progress);
        }
        if progress.is_complete() {
            return PollOutcome::Completed(progress);
        }
    }
}
