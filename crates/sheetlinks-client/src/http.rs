//! Native transport built on `reqwest`.
//!
//! # Design
//! - Endpoint paths from [`AppUrls`] are resolved against one base URL.
//! - The browser's same-origin credentials become an explicit session cookie.
//! - Replies are reduced to [`RawResponse`] and interpreted by the shared
//!   rules; nothing here decides what a status code means.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use sheetlinks_api_models::{
    AddLinkRequest, AddLinkResponse, CreateSectionRequest, CreateSectionResponse, LinkView,
    QuickStats, SectionSummary, UploadProgress, UploadResponse,
};
use url::Url;

use crate::api::{DashboardApi, UPLOAD_FIELD, UploadPayload};
use crate::config::{AppUrls, CSRF_HEADER};
use crate::error::{ClientError, ClientResult};
use crate::interpret::{
    self, RawResponse, http_status_message, json_response, text_response,
};
use crate::messages;
use crate::poll::Timer;

/// Connection settings for [`HttpDashboardClient`].
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Raw `Cookie` header value carrying the login session.
    pub session_cookie: Option<String>,
    /// Extra headers sent with every request.
    pub default_headers: HeaderMap,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            session_cookie: None,
            default_headers: HeaderMap::new(),
        }
    }
}

/// [`DashboardApi`] over HTTP for native callers.
#[derive(Debug, Clone)]
pub struct HttpDashboardClient {
    client: Client,
    base: Url,
    urls: AppUrls,
}

impl HttpDashboardClient {
    /// Build a client rooted at `base`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the cookie is not a valid header
    /// value or the HTTP client cannot be constructed.
    pub fn new(base: Url, urls: AppUrls, options: HttpOptions) -> ClientResult<Self> {
        let mut headers = options.default_headers;
        if let Some(cookie) = options.session_cookie.as_deref() {
            let value = HeaderValue::from_str(cookie).map_err(|_| {
                ClientError::Transport("session cookie contains invalid characters".to_string())
            })?;
            headers.insert(COOKIE, value);
        }
        let client = Client::builder()
            .timeout(options.timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| ClientError::Transport(format!("failed to build HTTP client: {err}")))?;
        Ok(Self { client, base, urls })
    }

    /// Endpoint configuration in use.
    #[must_use]
    pub const fn urls(&self) -> &AppUrls {
        &self.urls
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base
            .join(path)
            .map_err(|err| ClientError::Transport(format!("invalid endpoint '{path}': {err}")))
    }

    fn mutating(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.urls.csrf_token.as_deref() {
            Some(token) => builder.header(CSRF_HEADER, token),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> ClientResult<RawResponse> {
        let response = builder
            .send()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .bytes()
            .await
            .map_err(|err| ClientError::Transport(err.to_string()))?;
        tracing::debug!(status, content_type = ?content_type, len = body.len(), "dashboard response");
        Ok(RawResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

#[async_trait(?Send)]
impl DashboardApi for HttpDashboardClient {
    async fn upload(&self, payload: UploadPayload) -> ClientResult<UploadResponse> {
        let url = self.endpoint(&self.urls.upload)?;
        let mime = payload.mime().to_string();
        let part = Part::bytes(payload.bytes)
            .file_name(payload.file_name)
            .mime_str(&mime)
            .map_err(|err| ClientError::Transport(format!("invalid content type: {err}")))?;
        let form = Form::new().part(UPLOAD_FIELD, part);
        let raw = self
            .execute(self.mutating(self.client.post(url)).multipart(form))
            .await?;
        interpret::upload_response(&raw)
    }

    async fn fetch_sections_fragment(&self, cache_bust: u64) -> ClientResult<String> {
        let mut url = self.endpoint(&self.urls.get_sections)?;
        url.query_pairs_mut()
            .append_pair("_", &cache_bust.to_string());
        let raw = self.execute(self.client.get(url)).await?;
        text_response(&raw, messages::SECTIONS_FETCH_FAILED)
    }

    async fn create_section(&self, request: &CreateSectionRequest) -> ClientResult<SectionSummary> {
        let url = self.endpoint(&self.urls.create_section)?;
        let raw = self
            .execute(self.mutating(self.client.post(url)).json(request))
            .await?;
        json_response::<CreateSectionResponse>(&raw, messages::SECTION_FAILED)
            .map(|response| response.section)
    }

    async fn add_link(&self, request: &AddLinkRequest) -> ClientResult<LinkView> {
        let url = self.endpoint(&self.urls.add_link)?;
        let raw = self
            .execute(self.mutating(self.client.post(url)).json(request))
            .await?;
        json_response::<AddLinkResponse>(&raw, messages::LINK_FAILED).map(|response| response.link)
    }

    async fn fetch_statuses(&self) -> ClientResult<Vec<String>> {
        let url = self.endpoint(&self.urls.status)?;
        let raw = self.execute(self.client.get(url)).await?;
        json_response(&raw, &http_status_message(raw.status))
    }

    async fn fetch_progress(&self) -> ClientResult<UploadProgress> {
        let url = self.endpoint(&self.urls.progress)?;
        let raw = self.execute(self.client.get(url)).await?;
        json_response(&raw, &http_status_message(raw.status))
    }

    async fn fetch_stats(&self) -> ClientResult<QuickStats> {
        let url = self.endpoint(&self.urls.stats)?;
        let raw = self.execute(self.client.get(url)).await?;
        json_response(&raw, &http_status_message(raw.status))
    }
}

/// [`Timer`] backed by the Tokio clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use httpmock::MockServer;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer, urls: AppUrls) -> Result<HttpDashboardClient> {
        let base: Url = server.base_url().parse()?;
        let options = HttpOptions {
            session_cookie: Some("session=abc123".to_string()),
            ..HttpOptions::default()
        };
        Ok(HttpDashboardClient::new(base, urls, options)?)
    }

    #[tokio::test]
    async fn upload_posts_multipart_with_csrf_and_cookie() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/upload")
                .header("X-CSRFToken", "tok")
                .header("cookie", "session=abc123")
                .body_includes("name=\"file\"")
                .body_includes("filename=\"report.csv\"");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"status":"success","message":"File processed successfully","filename":"report.csv"}"#);
        });
        let client = client_for(
            &server,
            AppUrls::default().with_csrf_token(Some("tok".to_string())),
        )?;

        let response = client
            .upload(UploadPayload::new("report.csv", b"a,b\n1,2\n".to_vec()))
            .await?;

        mock.assert();
        assert_eq!(response.filename.as_deref(), Some("report.csv"));
        Ok(())
    }

    #[tokio::test]
    async fn upload_413_reports_fixed_message() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/upload");
            then.status(413)
                .header("content-type", "text/html")
                .body("<h1>Request Entity Too Large</h1>");
        });
        let client = client_for(&server, AppUrls::default())?;

        let err = client
            .upload(UploadPayload::new("big.xlsx", vec![0; 16]))
            .await
            .expect_err("413");

        assert_eq!(err, ClientError::PayloadTooLarge);
        assert_eq!(err.to_string(), "File too large. Max 10MB allowed.");
        Ok(())
    }

    #[tokio::test]
    async fn upload_html_reply_is_invalid_response() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/upload");
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body("<html>login</html>");
        });
        let client = client_for(&server, AppUrls::default())?;

        let err = client
            .upload(UploadPayload::new("a.csv", Vec::new()))
            .await
            .expect_err("html");

        assert!(matches!(err, ClientError::InvalidResponse { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn sections_fetch_carries_cache_buster() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/sections/partial")
                .query_param("_", "1700000000000");
            then.status(200)
                .header("content-type", "text/html")
                .body(r#"<div class="section-pill" data-section-id="1"><a>A</a></div>"#);
        });
        let urls = AppUrls::from_dataset([("getSectionsUrl", "/sections/partial")]);
        let client = client_for(&server, urls)?;

        let html = client.fetch_sections_fragment(1_700_000_000_000).await?;

        mock.assert();
        assert!(html.contains("section-pill"));
        Ok(())
    }

    #[tokio::test]
    async fn sections_failure_uses_fetch_text() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/get-sections");
            then.status(500).body("boom");
        });
        let client = client_for(&server, AppUrls::default())?;

        let err = client.fetch_sections_fragment(1).await.expect_err("500");

        assert_eq!(err.to_string(), "Failed to fetch sections");
        Ok(())
    }

    #[tokio::test]
    async fn create_section_sends_json_and_surfaces_codes() -> Result<()> {
        let server = MockServer::start_async().await;
        let mut ok = server.mock(|when, then| {
            when.method(POST)
                .path("/create_section")
                .json_body(json!({"spreadsheet_id": "3", "section_name": "Docs"}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"section":{"id":9,"name":"Docs","spreadsheet_id":3}}"#);
        });
        let client = client_for(&server, AppUrls::default())?;
        let request = CreateSectionRequest {
            spreadsheet_id: "3".to_string(),
            section_name: "Docs".to_string(),
        };

        let section = client.create_section(&request).await?;
        ok.assert();
        assert_eq!(section.id, 9);

        ok.delete();
        server.mock(|when, then| {
            when.method(POST).path("/create_section");
            then.status(404)
                .header("content-type", "application/json")
                .body(r#"{"status":"error","message":"Spreadsheet not found or access denied"}"#);
        });
        let err = client.create_section(&request).await.expect_err("404");
        assert_eq!(err.status(), Some(404));
        assert!(err.code().is_none());
        assert_eq!(err.to_string(), "Spreadsheet not found or access denied");
        assert_eq!(
            crate::messages::section_failure(&err),
            crate::messages::SECTION_BAD_SPREADSHEET
        );
        Ok(())
    }

    #[tokio::test]
    async fn add_link_failure_falls_back() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/add_link");
            then.status(500).header("content-type", "text/html").body("oops");
        });
        let client = client_for(&server, AppUrls::default())?;
        let request = AddLinkRequest {
            section_id: "1".to_string(),
            title: "Wiki".to_string(),
            url: "https://wiki.example.com".to_string(),
            status: "active".to_string(),
        };

        let err = client.add_link(&request).await.expect_err("500");

        assert_eq!(err.to_string(), "Failed to add link");
        Ok(())
    }

    #[tokio::test]
    async fn statuses_report_http_status_text() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/get_status_options");
            then.status(503);
        });
        let client = client_for(&server, AppUrls::default())?;

        let err = client.fetch_statuses().await.expect_err("503");

        assert_eq!(err.to_string(), "HTTP error! status: 503");
        Ok(())
    }

    #[tokio::test]
    async fn progress_and_stats_decode() -> Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/upload/progress");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"progress":55.5,"status":"Processing sheet: Links","current_sheet":"Links","last_update":"2024-03-01T10:00:00"}"#);
        });
        server.mock(|when, then| {
            when.method(GET).path("/get-stats");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"total_files":4,"total_sections":11,"last_upload":null}"#);
        });
        let client = client_for(&server, AppUrls::default())?;

        let progress = client.fetch_progress().await?;
        let stats = client.fetch_stats().await?;

        assert_eq!(progress.percent(), 55);
        assert_eq!(progress.current_sheet, "Links");
        assert_eq!(stats.total_sections, 11);
        Ok(())
    }

    #[tokio::test]
    async fn transport_failures_are_classified() -> Result<()> {
        let base: Url = "http://127.0.0.1:9".parse()?;
        let client = HttpDashboardClient::new(
            base,
            AppUrls::default(),
            HttpOptions {
                timeout: Duration::from_millis(500),
                ..HttpOptions::default()
            },
        )?;

        let err = client.fetch_stats().await.expect_err("refused");

        assert!(matches!(err, ClientError::Transport(_)));
        Ok(())
    }

    #[test]
    fn invalid_cookie_is_rejected() {
        let result = HttpDashboardClient::new(
            Url::parse("http://localhost").expect("url"),
            AppUrls::default(),
            HttpOptions {
                session_cookie: Some("bad\ncookie".to_string()),
                ..HttpOptions::default()
            },
        );
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }
}
