//! Browser transport built on `gloo-net`.
//!
//! Requests go to same-origin paths with the page's cookies; mutating requests
//! add the CSRF header when the page supplied a token.

use std::time::Duration;

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use sheetlinks_api_models::{
    AddLinkRequest, AddLinkResponse, CreateSectionRequest, CreateSectionResponse, LinkView,
    QuickStats, SectionSummary, UploadProgress, UploadResponse,
};
use web_sys::{Blob, BlobPropertyBag, FormData, RequestCredentials};

use crate::api::{DashboardApi, UPLOAD_FIELD, UploadPayload};
use crate::config::{AppUrls, CSRF_HEADER, with_cache_bust};
use crate::error::{ClientError, ClientResult};
use crate::interpret::{self, RawResponse, http_status_message, json_response, text_response};
use crate::messages;
use crate::poll::Timer;

/// [`DashboardApi`] over `fetch` for the browser front end.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowserDashboardClient {
    urls: AppUrls,
}

impl BrowserDashboardClient {
    /// Client for the given endpoint set.
    #[must_use]
    pub const fn new(urls: AppUrls) -> Self {
        Self { urls }
    }

    /// Endpoint configuration in use.
    #[must_use]
    pub const fn urls(&self) -> &AppUrls {
        &self.urls
    }

    fn get(url: &str) -> Request {
        Request::get(url).credentials(RequestCredentials::SameOrigin)
    }

    fn post(&self, url: &str) -> Request {
        let request = Request::post(url).credentials(RequestCredentials::SameOrigin);
        match self.urls.csrf_token.as_deref() {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        }
    }

    async fn execute(request: Request) -> ClientResult<RawResponse> {
        let response = request
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        read(response).await
    }
}

async fn read(response: Response) -> ClientResult<RawResponse> {
    let status = response.status();
    let content_type = response.headers().get("content-type");
    let body = response
        .binary()
        .await
        .map_err(|err| ClientError::Transport(err.to_string()))?;
    Ok(RawResponse {
        status,
        content_type,
        body,
    })
}

fn upload_form(payload: &UploadPayload) -> ClientResult<FormData> {
    let bytes = js_sys::Uint8Array::from(payload.bytes.as_slice());
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(payload.mime());
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|err| ClientError::Transport(format!("failed to build file blob: {err:?}")))?;
    let form = FormData::new()
        .map_err(|err| ClientError::Transport(format!("failed to build form data: {err:?}")))?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &payload.file_name)
        .map_err(|err| ClientError::Transport(format!("failed to attach file: {err:?}")))?;
    Ok(form)
}

fn encode_error(err: &gloo_net::Error) -> ClientError {
    ClientError::Transport(format!("failed to encode request: {err}"))
}

#[async_trait(?Send)]
impl DashboardApi for BrowserDashboardClient {
    async fn upload(&self, payload: UploadPayload) -> ClientResult<UploadResponse> {
        let form = upload_form(&payload)?;
        let raw = Self::execute(self.post(&self.urls.upload).body(form)).await?;
        interpret::upload_response(&raw)
    }

    async fn fetch_sections_fragment(&self, cache_bust: u64) -> ClientResult<String> {
        let url = with_cache_bust(&self.urls.get_sections, cache_bust);
        let raw = Self::execute(Self::get(&url)).await?;
        text_response(&raw, messages::SECTIONS_FETCH_FAILED)
    }

    async fn create_section(&self, request: &CreateSectionRequest) -> ClientResult<SectionSummary> {
        let request = self
            .post(&self.urls.create_section)
            .json(request)
            .map_err(|err| encode_error(&err))?;
        let raw = Self::execute(request).await?;
        json_response::<CreateSectionResponse>(&raw, messages::SECTION_FAILED)
            .map(|response| response.section)
    }

    async fn add_link(&self, request: &AddLinkRequest) -> ClientResult<LinkView> {
        let request = self
            .post(&self.urls.add_link)
            .json(request)
            .map_err(|err| encode_error(&err))?;
        let raw = Self::execute(request).await?;
        json_response::<AddLinkResponse>(&raw, messages::LINK_FAILED).map(|response| response.link)
    }

    async fn fetch_statuses(&self) -> ClientResult<Vec<String>> {
        let raw = Self::execute(Self::get(&self.urls.status)).await?;
        json_response(&raw, &http_status_message(raw.status))
    }

    async fn fetch_progress(&self) -> ClientResult<UploadProgress> {
        let raw = Self::execute(Self::get(&self.urls.progress)).await?;
        json_response(&raw, &http_status_message(raw.status))
    }

    async fn fetch_stats(&self) -> ClientResult<QuickStats> {
        let raw = Self::execute(Self::get(&self.urls.stats)).await?;
        json_response(&raw, &http_status_message(raw.status))
    }
}

/// [`Timer`] backed by `setTimeout` and `Date.now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTimer;

#[async_trait(?Send)]
impl Timer for GlooTimer {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_ms(&self) -> u64 {
        js_sys::Date::now().max(0.0) as u64
    }
}
