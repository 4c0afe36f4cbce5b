//! In-memory fakes for exercising code written against [`DashboardApi`] and
//! [`Timer`] without a server or real clock.
//!
//! Enabled for this crate's tests and, through the `testing` feature, for
//! downstream test suites.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use async_trait::async_trait;
use sheetlinks_api_models::{
    AddLinkRequest, CreateSectionRequest, LinkView, QuickStats, SectionSummary, UploadProgress,
    UploadResponse,
};

use crate::api::{DashboardApi, UploadPayload};
use crate::error::ClientResult;
use crate::poll::{CancelToken, Timer};

/// Epoch the fake clock starts at.
pub const FAKE_EPOCH_MS: u64 = 1_700_000_000_000;

/// One recorded call against [`FakeApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    /// `upload` with the payload's file name.
    Upload(String),
    /// `fetch_sections_fragment` with its cache buster.
    FetchSections(u64),
    /// `create_section` with its body.
    CreateSection(CreateSectionRequest),
    /// `add_link` with its body.
    AddLink(AddLinkRequest),
    /// `fetch_statuses`.
    FetchStatuses,
    /// `fetch_progress`.
    FetchProgress,
    /// `fetch_stats`.
    FetchStats,
}

/// Scripted [`DashboardApi`] that records every call.
///
/// Section and link creation echo the request back unless a result was
/// scripted.
#[derive(Debug)]
pub struct FakeApi {
    upload: RefCell<ClientResult<UploadResponse>>,
    upload_yields: Cell<usize>,
    sections: RefCell<ClientResult<String>>,
    create_section: RefCell<Option<ClientResult<SectionSummary>>>,
    add_link: RefCell<Option<ClientResult<LinkView>>>,
    statuses: RefCell<ClientResult<Vec<String>>>,
    progress: RefCell<VecDeque<ClientResult<UploadProgress>>>,
    cancel_on_progress: RefCell<Option<CancelToken>>,
    stats: RefCell<ClientResult<QuickStats>>,
    calls: RefCell<Vec<ApiCall>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            upload: RefCell::new(Ok(UploadResponse {
                status: Some("success".to_string()),
                message: "File processed successfully".to_string(),
                filename: None,
                redirect: None,
            })),
            upload_yields: Cell::new(0),
            sections: RefCell::new(Ok(String::new())),
            create_section: RefCell::new(None),
            add_link: RefCell::new(None),
            statuses: RefCell::new(Ok(vec!["active".to_string(), "pending".to_string()])),
            progress: RefCell::new(VecDeque::new()),
            cancel_on_progress: RefCell::new(None),
            stats: RefCell::new(Ok(QuickStats::default())),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeApi {
    /// Script the upload result.
    #[must_use]
    pub fn with_upload(self, result: ClientResult<UploadResponse>) -> Self {
        *self.upload.borrow_mut() = result;
        self
    }

    /// Make the upload stay pending for `yields` polls so a concurrent poller
    /// gets a chance to run.
    #[must_use]
    pub fn with_upload_yields(self, yields: usize) -> Self {
        self.upload_yields.set(yields);
        self
    }

    /// Script the sections fragment result.
    #[must_use]
    pub fn with_sections(self, result: ClientResult<String>) -> Self {
        *self.sections.borrow_mut() = result;
        self
    }

    /// Script the section creation result.
    #[must_use]
    pub fn with_create_section(self, result: ClientResult<SectionSummary>) -> Self {
        *self.create_section.borrow_mut() = Some(result);
        self
    }

    /// Script the link creation result.
    #[must_use]
    pub fn with_add_link(self, result: ClientResult<LinkView>) -> Self {
        *self.add_link.borrow_mut() = Some(result);
        self
    }

    /// Script the status list result.
    #[must_use]
    pub fn with_statuses(self, result: ClientResult<Vec<String>>) -> Self {
        *self.statuses.borrow_mut() = result;
        self
    }

    /// Script successive progress reports. Once exhausted, reports 0 %.
    #[must_use]
    pub fn with_progress_sequence(self, reports: Vec<ClientResult<UploadProgress>>) -> Self {
        *self.progress.borrow_mut() = reports.into();
        self
    }

    /// Cancel `token` from inside every progress fetch.
    #[must_use]
    pub fn cancel_on_progress(self, token: CancelToken) -> Self {
        *self.cancel_on_progress.borrow_mut() = Some(token);
        self
    }

    /// Script the stats result.
    #[must_use]
    pub fn with_stats(self, result: ClientResult<QuickStats>) -> Self {
        *self.stats.borrow_mut() = result;
        self
    }

    /// Replace the stats result after construction.
    pub fn set_stats(&self, result: ClientResult<QuickStats>) {
        *self.stats.borrow_mut() = result;
    }

    /// Replace the sections result after construction.
    pub fn set_sections(&self, result: ClientResult<String>) {
        *self.sections.borrow_mut() = result;
    }

    /// Every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    /// Number of calls equal to `call`.
    #[must_use]
    pub fn count(&self, call: &ApiCall) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    /// True when no request of any kind was made.
    #[must_use]
    pub fn untouched(&self) -> bool {
        self.calls.borrow().is_empty()
    }

    fn record(&self, call: ApiCall) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl DashboardApi for FakeApi {
    async fn upload(&self, payload: UploadPayload) -> ClientResult<UploadResponse> {
        self.record(ApiCall::Upload(payload.file_name));
        for _ in 0..self.upload_yields.get() {
            YieldOnce::default().await;
        }
        self.upload.borrow().clone()
    }

    async fn fetch_sections_fragment(&self, cache_bust: u64) -> ClientResult<String> {
        self.record(ApiCall::FetchSections(cache_bust));
        self.sections.borrow().clone()
    }

    async fn create_section(&self, request: &CreateSectionRequest) -> ClientResult<SectionSummary> {
        self.record(ApiCall::CreateSection(request.clone()));
        if let Some(result) = self.create_section.borrow().clone() {
            return result;
        }
        Ok(SectionSummary {
            id: 100,
            name: request.section_name.clone(),
            spreadsheet_id: request.spreadsheet_id.parse().unwrap_or_default(),
        })
    }

    async fn add_link(&self, request: &AddLinkRequest) -> ClientResult<LinkView> {
        self.record(ApiCall::AddLink(request.clone()));
        if let Some(result) = self.add_link.borrow().clone() {
            return result;
        }
        Ok(LinkView {
            title: request.title.clone(),
            url: request.url.clone(),
            status: request.status.clone(),
        })
    }

    async fn fetch_statuses(&self) -> ClientResult<Vec<String>> {
        self.record(ApiCall::FetchStatuses);
        self.statuses.borrow().clone()
    }

    async fn fetch_progress(&self) -> ClientResult<UploadProgress> {
        self.record(ApiCall::FetchProgress);
        if let Some(token) = self.cancel_on_progress.borrow().as_ref() {
            token.cancel();
        }
        self.progress
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(UploadProgress::default()))
    }

    async fn fetch_stats(&self) -> ClientResult<QuickStats> {
        self.record(ApiCall::FetchStats);
        self.stats.borrow().clone()
    }
}

/// Clock that advances only when slept on.
///
/// Every sleep yields once so concurrently joined futures still interleave.
#[derive(Debug)]
pub struct InstantTimer {
    now: Cell<u64>,
    sleeps: RefCell<Vec<Duration>>,
}

impl Default for InstantTimer {
    fn default() -> Self {
        Self {
            now: Cell::new(FAKE_EPOCH_MS),
            sleeps: RefCell::new(Vec::new()),
        }
    }
}

impl InstantTimer {
    /// Every requested sleep, in order.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }

    /// Move the clock forward without sleeping.
    pub fn advance(&self, duration: Duration) {
        self.now.set(self.now.get() + duration_ms(duration));
    }
}

#[async_trait(?Send)]
impl Timer for InstantTimer {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration);
        YieldOnce::default().await;
    }

    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Default)]
struct YieldOnce {
    yielded: bool,
}

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.yielded {
            Poll::Ready(())
        } else {
            self.yielded = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}
