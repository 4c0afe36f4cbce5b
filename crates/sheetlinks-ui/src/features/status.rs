//! Status options loader.
//!
//! The loader owns its failure handling: it never returns an error, it moves
//! the select into the failed state and raises a toast.

use sheetlinks_client::messages::STATUS_LOAD_FAILED;
use sheetlinks_client::{DashboardApi, Timer};
use yewdux::prelude::Dispatch;

use crate::core::report;
use crate::core::store::{DashboardStore, StatusOptions, push_toast};
use crate::models::ToastKind;

/// Populate the status select.
pub async fn load_statuses<A, T>(api: &A, timer: &T, dispatch: &Dispatch<DashboardStore>)
where
    A: DashboardApi + ?Sized,
    T: Timer + ?Sized,
{
    dispatch.reduce_mut(|state| state.statuses = StatusOptions::Loading);
    match api.fetch_statuses().await {
        Ok(statuses) if statuses.is_empty() => {
            dispatch.reduce_mut(|state| state.statuses = StatusOptions::Empty);
        }
        Ok(statuses) => {
            dispatch.reduce_mut(|state| state.statuses = StatusOptions::Ready(statuses));
        }
        Err(err) => {
            report::failure("load status options", &err);
            dispatch.reduce_mut(|state| state.statuses = StatusOptions::Failed);
            push_toast(dispatch, ToastKind::Error, STATUS_LOAD_FAILED, timer.now_ms());
        }
    }
}
