//! Section creation workflow.
//!
//! # Design
//! - Validation runs before any request: a missing field is a warning, an
//!   over-long name is an error.
//! - The created section is shown immediately, then the list is refreshed
//!   from the server so pills and dropdown match what the server stored.
//! - The form's busy flag is cleared on every exit path.

use sheetlinks_client::messages::{SECTION_CREATED, section_failure};
use sheetlinks_client::validate::section_request;
use sheetlinks_client::{DashboardApi, Timer, ValidationError};
use yewdux::prelude::Dispatch;

use crate::core::report;
use crate::core::store::{DashboardStore, push_toast};
use crate::features::refresh::refresh_sections;
use crate::models::{CreateSectionRequest, SectionSummary, ToastKind};

/// Submit the section form as currently held in the store.
///
/// Returns the created section when the whole workflow succeeded.
pub async fn create_section<A, T>(
    api: &A,
    timer: &T,
    dispatch: &Dispatch<DashboardStore>,
) -> Option<SectionSummary>
where
    A: DashboardApi + ?Sized,
    T: Timer + ?Sized,
{
    let form = dispatch.get().section_form.clone();
    if form.busy {
        return None;
    }
    let request = match section_request(&form.spreadsheet_id, &form.name) {
        Ok(request) => request,
        Err(err) => {
            let kind = match err {
                ValidationError::SectionFieldsMissing => ToastKind::Warning,
                _ => ToastKind::Error,
            };
            push_toast(dispatch, kind, err.to_string(), timer.now_ms());
            return None;
        }
    };

    dispatch.reduce_mut(|state| state.section_form.busy = true);
    let created = submit(api, timer, dispatch, &request).await;
    dispatch.reduce_mut(|state| state.section_form.busy = false);
    created
}

async fn submit<A, T>(
    api: &A,
    timer: &T,
    dispatch: &Dispatch<DashboardStore>,
    request: &CreateSectionRequest,
) -> Option<SectionSummary>
where
    A: DashboardApi + ?Sized,
    T: Timer + ?Sized,
{
    let outcome = match api.create_section(request).await {
        Ok(section) => {
            tracing::info!(section_id = section.id, name = %section.name, "section created");
            dispatch.reduce_mut(|state| state.prepend_section(section.clone()));
            refresh_sections(api, timer, dispatch).await.map(|_| section)
        }
        Err(err) => Err(err),
    };

    match outcome {
        Ok(section) => {
            dispatch.reduce_mut(|state| {
                state.section_form.name.clear();
                state.section_form.name_error = None;
            });
            push_toast(dispatch, ToastKind::Success, SECTION_CREATED, timer.now_ms());
            Some(section)
        }
        Err(err) => {
            report::failure("create section", &err);
            push_toast(dispatch, ToastKind::Error, section_failure(&err), timer.now_ms());
            None
        }
    }
}
