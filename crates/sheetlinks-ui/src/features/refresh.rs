//! Sections and stats refreshes.
//!
//! # Design
//! - The sections fragment is fetched with a cache buster, parsed once, and
//!   replaces the store's section list; pills and dropdown re-render from it.
//! - Each refresh raises its own failure toast and returns the error so
//!   callers can add context of their own.

use sheetlinks_client::fragment::parse_sections;
use sheetlinks_client::messages::{SECTIONS_REFRESH_FAILED, STATS_REFRESH_FAILED};
use sheetlinks_client::{ClientResult, DashboardApi, Timer};
use yewdux::prelude::Dispatch;

use crate::core::report;
use crate::core::store::{DashboardStore, push_toast};
use crate::models::{QuickStats, SectionSummary, ToastKind};

/// Re-fetch the sections fragment and replace the section list.
///
/// # Errors
///
/// Returns the fetch error after showing `Failed to refresh sections list`.
pub async fn refresh_sections<A, T>(
    api: &A,
    timer: &T,
    dispatch: &Dispatch<DashboardStore>,
) -> ClientResult<Vec<SectionSummary>>
where
    A: DashboardApi + ?Sized,
    T: Timer + ?Sized,
{
    match api.fetch_sections_fragment(timer.now_ms()).await {
        Ok(html) => {
            let sections = parse_sections(&html);
            dispatch.reduce_mut(|state| state.replace_sections(sections.clone()));
            Ok(sections)
        }
        Err(err) => {
            report::failure("refresh sections", &err);
            push_toast(dispatch, ToastKind::Error, SECTIONS_REFRESH_FAILED, timer.now_ms());
            Err(err)
        }
    }
}

/// Re-fetch the header counters.
///
/// # Errors
///
/// Returns the fetch error after showing `Failed to refresh statistics`.
pub async fn refresh_stats<A, T>(
    api: &A,
    timer: &T,
    dispatch: &Dispatch<DashboardStore>,
) -> ClientResult<QuickStats>
where
    A: DashboardApi + ?Sized,
    T: Timer + ?Sized,
{
    match api.fetch_stats().await {
        Ok(stats) => {
            dispatch.reduce_mut(|state| state.stats = Some(stats.clone()));
            Ok(stats)
        }
        Err(err) => {
            report::failure("refresh stats", &err);
            push_toast(dispatch, ToastKind::Error, STATS_REFRESH_FAILED, timer.now_ms());
            Err(err)
        }
    }
}
