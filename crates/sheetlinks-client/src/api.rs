//! The call surface every transport implements.

use async_trait::async_trait;
use sheetlinks_api_models::{
    AddLinkRequest, CreateSectionRequest, LinkView, QuickStats, SectionSummary, UploadProgress,
    UploadResponse,
};

use crate::error::ClientResult;

/// Multipart field name the upload endpoint reads.
pub const UPLOAD_FIELD: &str = "file";

/// File content posted to the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    /// Original file name, used for the multipart part and extension checks.
    pub file_name: String,
    /// MIME type reported by the picker, if any.
    pub content_type: Option<String>,
    /// File bytes.
    pub bytes: Vec<u8>,
}

impl UploadPayload {
    /// Bundle a file for upload.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Attach the MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// MIME type to send, inferred from the extension when none was given.
    #[must_use]
    pub fn mime(&self) -> &str {
        if let Some(content_type) = self.content_type.as_deref().filter(|ct| !ct.is_empty()) {
            return content_type;
        }
        let extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => "text/csv",
            Some("xls") => "application/vnd.ms-excel",
            Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            _ => "application/octet-stream",
        }
    }
}

/// Dashboard endpoints as typed async calls.
///
/// Implementations must apply the rules in [`crate::interpret`] so that all
/// transports surface identical errors.
#[async_trait(?Send)]
pub trait DashboardApi {
    /// `POST` the file as multipart field [`UPLOAD_FIELD`].
    async fn upload(&self, payload: UploadPayload) -> ClientResult<UploadResponse>;

    /// `GET` the sections HTML fragment with the `_=<epoch ms>` cache buster.
    async fn fetch_sections_fragment(&self, cache_bust: u64) -> ClientResult<String>;

    /// `POST` a new section.
    async fn create_section(&self, request: &CreateSectionRequest) -> ClientResult<SectionSummary>;

    /// `POST` a new link.
    async fn add_link(&self, request: &AddLinkRequest) -> ClientResult<LinkView>;

    /// `GET` the list of link statuses.
    async fn fetch_statuses(&self) -> ClientResult<Vec<String>>;

    /// `GET` the caller's current upload progress.
    async fn fetch_progress(&self) -> ClientResult<UploadProgress>;

    /// `GET` dashboard counters.
    async fn fetch_stats(&self) -> ClientResult<QuickStats>;
}
