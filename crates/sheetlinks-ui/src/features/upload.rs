//! File upload workflow.
//!
//! # Design
//! - Progress comes only from the server's progress endpoint. The poller
//!   runs alongside the upload request and is cancelled the moment the
//!   request settles, so a late report never moves the bar.
//! - After a successful upload the sections and stats refreshes run
//!   concurrently and are all awaited; a failed refresh only downgrades the
//!   toast.
//! - [`UploadOutcome::Completed`] tells the page to reload.

use std::time::Duration;

use futures_util::future::{Either, select};
use futures_util::pin_mut;
use sheetlinks_client::messages::{UPLOAD_PARTIAL, UPLOAD_SUCCESS, upload_failure};
use sheetlinks_client::validate::check_upload_file_name;
use sheetlinks_client::{
    CancelToken, ClientResult, DashboardApi, PROGRESS_POLL_INTERVAL, PollOutcome, Timer,
    UploadPayload, ValidationError, poll_progress,
};
use yewdux::prelude::Dispatch;

use crate::core::report;
use crate::core::store::{DashboardStore, push_toast};
use crate::features::refresh::{refresh_sections, refresh_stats};
use crate::models::{ToastKind, UploadResponse};

/// Delay before the panel is cleared after a successful upload.
pub const SUCCESS_CLEAR_DELAY: Duration = Duration::from_millis(2000);
/// Delay before the panel is cleared after a failed upload.
pub const ERROR_CLEAR_DELAY: Duration = Duration::from_millis(3000);

/// How an upload attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Server accepted the file; the page should reload.
    Completed,
    /// The request failed with the shown message.
    Failed(String),
    /// Pre-flight checks rejected the file; nothing was sent.
    Rejected(ValidationError),
}

/// Upload `payload` and drive the progress panel until it is cleared.
///
/// `token` stops the progress poller; the caller cancels it on unmount and
/// this workflow cancels it once the request settles.
pub async fn run_upload<A, T>(
    api: &A,
    timer: &T,
    dispatch: &Dispatch<DashboardStore>,
    payload: Option<UploadPayload>,
    token: &CancelToken,
) -> UploadOutcome
where
    A: DashboardApi + ?Sized,
    T: Timer + ?Sized,
{
    let payload = match preflight(payload) {
        Ok(payload) => payload,
        Err(err) => {
            push_toast(dispatch, ToastKind::Error, err.to_string(), timer.now_ms());
            return UploadOutcome::Rejected(err);
        }
    };
    tracing::info!(file = %payload.file_name, bytes = payload.bytes.len(), "upload started");

    dispatch.reduce_mut(|state| state.upload.start());
    let response = send_with_progress(api, timer, dispatch, payload, token).await;
    token.cancel();

    match response {
        Ok(response) => finish_success(api, timer, dispatch, response).await,
        Err(err) => {
            let message = upload_failure(&err);
            report::failure("upload file", &err);
            dispatch.reduce_mut(|state| state.upload.fail(&message));
            push_toast(dispatch, ToastKind::Error, message.clone(), timer.now_ms());
            timer.sleep(ERROR_CLEAR_DELAY).await;
            dispatch.reduce_mut(|state| state.upload.clear_after_error());
            UploadOutcome::Failed(message)
        }
    }
}

fn preflight(payload: Option<UploadPayload>) -> Result<UploadPayload, ValidationError> {
    check_upload_file_name(payload.as_ref().map(|payload| payload.file_name.as_str()))?;
    payload.ok_or(ValidationError::NoFileSelected)
}

async fn send_with_progress<A, T>(
    api: &A,
    timer: &T,
    dispatch: &Dispatch<DashboardStore>,
    payload: UploadPayload,
    token: &CancelToken,
) -> ClientResult<UploadResponse>
where
    A: DashboardApi + ?Sized,
    T: Timer + ?Sized,
{
    let request = api.upload(payload);
    let poller = poll_progress(api, timer, token, PROGRESS_POLL_INTERVAL, |progress| {
        dispatch.reduce_mut(|state| state.upload.apply_progress(progress));
    });
    pin_mut!(request, poller);

    match select(request, poller).await {
        Either::Left((response, _poller)) => response,
        Either::Right((outcome, request)) => {
            match &outcome {
                PollOutcome::Completed(_) => tracing::debug!("server reported upload complete"),
                PollOutcome::Cancelled => {}
                PollOutcome::Failed(err) => {
                    report::degraded("poll upload progress", &err.to_string());
                }
            }
            request.await
        }
    }
}

async fn finish_success<A, T>(
    api: &A,
    timer: &T,
    dispatch: &Dispatch<DashboardStore>,
    response: UploadResponse,
) -> UploadOutcome
where
    A: DashboardApi + ?Sized,
    T: Timer + ?Sized,
{
    tracing::info!(file = ?response.filename, "upload accepted");
    dispatch.reduce_mut(|state| state.upload.succeed(response.message));

    let (sections, stats) = futures_util::join!(
        refresh_sections(api, timer, dispatch),
        refresh_stats(api, timer, dispatch)
    );
    if sections.is_err() || stats.is_err() {
        report::degraded(
            "refresh after upload",
            &format!(
                "sections ok: {}, stats ok: {}",
                sections.is_ok(),
                stats.is_ok()
            ),
        );
        push_toast(dispatch, ToastKind::Warning, UPLOAD_PARTIAL, timer.now_ms());
    } else {
        push_toast(dispatch, ToastKind::Success, UPLOAD_SUCCESS, timer.now_ms());
    }

    timer.sleep(SUCCESS_CLEAR_DELAY).await;
    dispatch.reduce_mut(|state| {
        state.upload.clear_after_success();
        state.upload_form_epoch += 1;
    });
    UploadOutcome::Completed
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::store::{BarTone, seeded_dispatch};
    use crate::models::UploadProgress;
    use sheetlinks_client::ClientError;
    use sheetlinks_client::messages::STATS_REFRESH_FAILED;
    use sheetlinks_client::testing::{ApiCall, FakeApi, InstantTimer};

    fn payload(name: &str) -> Option<UploadPayload> {
        Some(UploadPayload::new(name, b"title,url\n".to_vec()))
    }

    fn progress(value: f64, status: &str) -> ClientResult<UploadProgress> {
        Ok(UploadProgress {
            progress: value,
            status: status.to_string(),
            ..UploadProgress::default()
        })
    }

    fn toast_messages(dispatch: &Dispatch<DashboardStore>) -> Vec<String> {
        dispatch
            .get()
            .toasts
            .toasts()
            .iter()
            .map(|toast| toast.message.clone())
            .collect()
    }

    /// Records the success message visible when the partial warning first
    /// appears.
    fn watch_partial_warning(
        seen: &Rc<RefCell<Option<Option<String>>>>,
    ) -> Dispatch<DashboardStore> {
        let seen = Rc::clone(seen);
        Dispatch::<DashboardStore>::subscribe(move |state: Rc<DashboardStore>| {
            let partial = state
                .toasts
                .toasts()
                .iter()
                .any(|toast| toast.message == UPLOAD_PARTIAL);
            if partial && seen.borrow().is_none() {
                *seen.borrow_mut() = Some(state.upload.success_message.clone());
            }
        })
    }

    #[tokio::test]
    async fn successful_upload_refreshes_and_requests_reload() {
        let api = FakeApi::default();
        let timer = InstantTimer::default();
        let dispatch = seeded_dispatch(DashboardStore::default());
        let token = CancelToken::new();

        let outcome = run_upload(&api, &timer, &dispatch, payload("links.xlsx"), &token).await;

        assert_eq!(outcome, UploadOutcome::Completed);
        assert!(token.is_cancelled());
        assert_eq!(api.count(&ApiCall::Upload("links.xlsx".to_string())), 1);
        assert_eq!(api.count(&ApiCall::FetchStats), 1);
        assert!(
            api.calls()
                .iter()
                .any(|call| matches!(call, ApiCall::FetchSections(_)))
        );
        assert_eq!(toast_messages(&dispatch), vec![UPLOAD_SUCCESS.to_string()]);
        assert_eq!(timer.sleeps().last(), Some(&SUCCESS_CLEAR_DELAY));

        let state = dispatch.get();
        assert!(!state.upload.visible);
        assert_eq!(state.upload.percent, 0);
        assert!(state.upload.success_message.is_none());
        assert_eq!(state.upload_form_epoch, 1);
    }

    #[tokio::test]
    async fn failed_refresh_downgrades_toast_but_keeps_success_message() {
        let api = FakeApi::default().with_sections(Err(ClientError::Status {
            status: 500,
            message: "Failed to fetch sections".to_string(),
        }));
        let timer = InstantTimer::default();
        let dispatch = seeded_dispatch(DashboardStore::default());
        let seen = Rc::new(RefCell::new(None));
        let _watcher = watch_partial_warning(&seen);

        let outcome = run_upload(
            &api,
            &timer,
            &dispatch,
            payload("links.csv"),
            &CancelToken::new(),
        )
        .await;

        assert_eq!(outcome, UploadOutcome::Completed);
        assert_eq!(
            toast_messages(&dispatch),
            vec![
                "Failed to refresh sections list".to_string(),
                UPLOAD_PARTIAL.to_string(),
            ]
        );
        assert_eq!(
            *seen.borrow(),
            Some(Some("File processed successfully".to_string()))
        );
    }

    #[tokio::test]
    async fn failed_stats_refresh_also_downgrades_toast() {
        let api = FakeApi::default().with_stats(Err(ClientError::Transport(
            "connection reset".to_string(),
        )));
        let timer = InstantTimer::default();
        let dispatch = seeded_dispatch(DashboardStore::default());
        let seen = Rc::new(RefCell::new(None));
        let _watcher = watch_partial_warning(&seen);

        let outcome = run_upload(
            &api,
            &timer,
            &dispatch,
            payload("links.xlsx"),
            &CancelToken::new(),
        )
        .await;

        assert_eq!(outcome, UploadOutcome::Completed);
        assert_eq!(
            toast_messages(&dispatch),
            vec![STATS_REFRESH_FAILED.to_string(), UPLOAD_PARTIAL.to_string()]
        );
        assert_eq!(
            *seen.borrow(),
            Some(Some("File processed successfully".to_string()))
        );
        let state = dispatch.get();
        assert_eq!(state.sections_epoch, 1, "sections refresh still applied");
        assert!(state.stats.is_none());
        assert_eq!(state.upload_form_epoch, 1);
    }

    #[tokio::test]
    async fn payload_too_large_shows_fixed_text() {
        let api = FakeApi::default().with_upload(Err(ClientError::PayloadTooLarge));
        let timer = InstantTimer::default();
        let dispatch = seeded_dispatch(DashboardStore::default());

        let outcome = run_upload(
            &api,
            &timer,
            &dispatch,
            payload("huge.xlsx"),
            &CancelToken::new(),
        )
        .await;

        let text = "File too large. Max 10MB allowed.";
        assert_eq!(outcome, UploadOutcome::Failed(text.to_string()));
        assert_eq!(toast_messages(&dispatch), vec![text.to_string()]);
        assert_eq!(timer.sleeps().last(), Some(&ERROR_CLEAR_DELAY));
        assert!(
            !api.calls()
                .iter()
                .any(|call| matches!(call, ApiCall::FetchSections(_)))
        );

        let state = dispatch.get();
        assert_eq!(state.upload.status_text, format!("Error: {text}"));
        assert!(!state.upload.visible);
        assert_eq!(state.upload.tone, BarTone::Normal);
    }

    #[tokio::test]
    async fn non_json_response_is_invalid() {
        let api = FakeApi::default().with_upload(Err(ClientError::InvalidResponse {
            content_type: Some("text/html".to_string()),
        }));
        let timer = InstantTimer::default();
        let dispatch = seeded_dispatch(DashboardStore::default());
        let failed_tone = Rc::new(RefCell::new(false));
        let _watcher = {
            let failed_tone = Rc::clone(&failed_tone);
            Dispatch::<DashboardStore>::subscribe(move |state: Rc<DashboardStore>| {
                if state.upload.tone == BarTone::Danger {
                    *failed_tone.borrow_mut() = true;
                }
            })
        };

        let outcome = run_upload(
            &api,
            &timer,
            &dispatch,
            payload("links.xls"),
            &CancelToken::new(),
        )
        .await;

        assert_eq!(
            outcome,
            UploadOutcome::Failed("Invalid server response".to_string())
        );
        assert!(*failed_tone.borrow());
    }

    #[tokio::test]
    async fn preflight_rejects_before_any_request() {
        let api = FakeApi::default();
        let timer = InstantTimer::default();
        let dispatch = seeded_dispatch(DashboardStore::default());

        let missing = run_upload(&api, &timer, &dispatch, None, &CancelToken::new()).await;
        let wrong_type = run_upload(
            &api,
            &timer,
            &dispatch,
            payload("notes.txt"),
            &CancelToken::new(),
        )
        .await;

        assert_eq!(
            missing,
            UploadOutcome::Rejected(ValidationError::NoFileSelected)
        );
        assert_eq!(
            wrong_type,
            UploadOutcome::Rejected(ValidationError::UnsupportedFileType)
        );
        assert!(api.untouched());
        assert!(!dispatch.get().upload.visible);
    }

    #[tokio::test]
    async fn progress_reports_move_the_bar_while_request_is_pending() {
        let api = FakeApi::default()
            .with_upload_yields(3)
            .with_progress_sequence(vec![
                progress(40.0, "Processing sheet: Links"),
                progress(80.0, "Saving"),
            ]);
        let timer = InstantTimer::default();
        let dispatch = seeded_dispatch(DashboardStore::default());
        let percents = Rc::new(RefCell::new(Vec::new()));
        let _watcher = {
            let percents = Rc::clone(&percents);
            Dispatch::<DashboardStore>::subscribe(move |state: Rc<DashboardStore>| {
                let mut seen = percents.borrow_mut();
                if seen.last() != Some(&state.upload.percent) {
                    seen.push(state.upload.percent);
                }
            })
        };
        let token = CancelToken::new();

        let outcome = run_upload(&api, &timer, &dispatch, payload("links.xlsx"), &token).await;

        assert_eq!(outcome, UploadOutcome::Completed);
        assert_eq!(api.count(&ApiCall::FetchProgress), 2);
        assert_eq!(&percents.borrow()[..4], &[0, 40, 80, 100]);
        assert!(token.is_cancelled());
        assert_eq!(timer.sleeps()[0], PROGRESS_POLL_INTERVAL);
    }
}
