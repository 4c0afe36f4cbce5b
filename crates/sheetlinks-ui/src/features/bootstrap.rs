//! Page start-up.
//!
//! # Design
//! - Initial sections, links and stats come from a JSON block the server
//!   embeds in the page; a missing or malformed block starts the page empty.
//! - Status loading and the stats fetch run concurrently and fail fast: the
//!   first failure aborts the other, and the start-up error toast follows
//!   whatever toast the failed step raised.

use sheetlinks_client::messages::INIT_FAILED;
use sheetlinks_client::{ClientError, DashboardApi, Timer};
use yewdux::prelude::Dispatch;

use crate::core::report;
use crate::core::store::{DashboardStore, StatusOptions, push_toast};
use crate::features::refresh::refresh_stats;
use crate::features::status::load_statuses;
use crate::models::{PageBootstrap, ToastKind};

/// Element id of the embedded bootstrap JSON.
pub const BOOTSTRAP_ELEMENT_ID: &str = "page-bootstrap";

/// Parse the embedded bootstrap block.
#[must_use]
pub fn read_bootstrap(raw: Option<&str>) -> PageBootstrap {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return PageBootstrap::default();
    };
    serde_json::from_str(raw).unwrap_or_else(|err| {
        report::degraded("read page bootstrap", &err.to_string());
        PageBootstrap::default()
    })
}

/// Initial store for the page.
#[must_use]
pub fn initial_store(raw_bootstrap: Option<&str>) -> DashboardStore {
    DashboardStore::from_bootstrap(read_bootstrap(raw_bootstrap))
}

/// Load statuses and stats for a freshly mounted page.
///
/// # Errors
///
/// Returns the first failure after showing `Failed to initialize
/// application`.
pub async fn initialize<A, T>(
    api: &A,
    timer: &T,
    dispatch: &Dispatch<DashboardStore>,
) -> Result<(), ClientError>
where
    A: DashboardApi + ?Sized,
    T: Timer + ?Sized,
{
    let statuses = async {
        load_statuses(api, timer, dispatch).await;
        Ok::<(), ClientError>(())
    };
    let stats = refresh_stats(api, timer, dispatch);

    match futures_util::try_join!(statuses, stats) {
        Ok(_) => Ok(()),
        Err(err) => {
            report::failure("initialize application", &err);
            dispatch.reduce_mut(|state| {
                if state.statuses == StatusOptions::Loading {
                    state.statuses = StatusOptions::Failed;
                }
            });
            push_toast(dispatch, ToastKind::Error, INIT_FAILED, timer.now_ms());
            Err(err)
        }
    }
}
