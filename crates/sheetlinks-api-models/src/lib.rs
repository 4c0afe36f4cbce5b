#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the SheetLinks dashboard endpoints.
//!
//! These types are used by both the browser front end and the CLI so the wire
//! contract lives in one place. Field names follow the server's JSON exactly;
//! anything the client derives (badge colours, clamped percentages) is a method
//! here rather than a second copy in each consumer.

use std::fmt::{self, Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Maximum section name length accepted by the server column.
pub const SECTION_NAME_MAX_CHARS: usize = 255;

/// File extensions the upload endpoint accepts.
pub const ALLOWED_UPLOAD_EXTENSIONS: [&str; 3] = ["csv", "xls", "xlsx"];

/// A named grouping of links tied to one spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SectionSummary {
    /// Server-assigned section (sheet) identifier.
    pub id: i64,
    /// Display name, unique within its spreadsheet.
    pub name: String,
    /// Owning spreadsheet identifier.
    pub spreadsheet_id: i64,
}

/// Spreadsheet choice offered by the section creation form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpreadsheetOption {
    /// Spreadsheet identifier.
    pub id: i64,
    /// Uploaded file name.
    pub name: String,
}

/// Body for `POST /create_section`.
///
/// The identifier travels as the raw select value, matching what the form
/// posts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateSectionRequest {
    /// Selected spreadsheet identifier.
    pub spreadsheet_id: String,
    /// Trimmed section name.
    pub section_name: String,
}

/// Successful response from `POST /create_section`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateSectionResponse {
    /// Newly created section.
    pub section: SectionSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional confirmation message.
    pub message: Option<String>,
}

/// Body for `POST /add_link`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddLinkRequest {
    /// Target section identifier (select value).
    pub section_id: String,
    /// Link title.
    pub title: String,
    /// Absolute URL.
    pub url: String,
    /// Status label.
    pub status: String,
}

/// A link as echoed back by the server and rendered in a section list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkView {
    /// Link title.
    pub title: String,
    /// Link target.
    pub url: String,
    /// Status label.
    pub status: String,
}

impl LinkView {
    /// Status wrapped for colour lookup.
    #[must_use]
    pub fn status_label(&self) -> StatusLabel {
        StatusLabel::new(self.status.clone())
    }
}

/// Successful response from `POST /add_link`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddLinkResponse {
    /// Persisted link.
    pub link: LinkView,
}

/// Successful response from the upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UploadResponse {
    #[serde(default)]
    /// `success` on the happy path.
    pub status: Option<String>,
    #[serde(default)]
    /// Human-readable outcome shown under the progress bar.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Stored file name after sanitisation.
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Page the server suggests reloading.
    pub redirect: Option<String>,
}

/// Server-reported progress for the current user's upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UploadProgress {
    /// Percentage reported by the server; may be fractional.
    pub progress: f64,
    #[serde(default)]
    /// Current processing stage.
    pub status: String,
    #[serde(default)]
    /// Sheet currently being processed, if any.
    pub current_sheet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Server timestamp of the last update (ISO-8601, no zone).
    pub last_update: Option<String>,
}

impl UploadProgress {
    /// Whole percentage clamped to `0..=100`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        if self.progress.is_nan() {
            return 0;
        }
        self.progress.clamp(0.0, 100.0).floor() as u8
    }

    /// True once the server reports completion.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.percent() >= 100
    }
}

/// Dashboard counters served by `GET /get-stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct QuickStats {
    /// Number of uploaded spreadsheets.
    pub total_files: u64,
    /// Number of sections, excluding credential sheets.
    pub total_sections: u64,
    #[serde(default)]
    /// Most recent upload time.
    pub last_upload: Option<NaiveDateTime>,
}

/// Links already rendered for one section at page load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionLinks {
    /// Section identifier.
    pub section_id: i64,
    #[serde(default)]
    /// Links in display order.
    pub links: Vec<LinkView>,
}

/// Initial page state embedded by the server next to the `app-urls` element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PageBootstrap {
    #[serde(default)]
    /// Spreadsheets owned by the user.
    pub spreadsheets: Vec<SpreadsheetOption>,
    #[serde(default)]
    /// Sections in display order.
    pub sections: Vec<SectionSummary>,
    #[serde(default)]
    /// Link lists for the sections shown on this page.
    pub links: Vec<SectionLinks>,
    #[serde(default)]
    /// Counters rendered in the header.
    pub stats: Option<QuickStats>,
}

/// Structured error codes emitted by the server.
///
/// Unknown codes are preserved verbatim so newer servers keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    /// Multipart request lacked a `file` part.
    NoFilePart,
    /// File part was present but empty.
    EmptyFile,
    /// Upload exceeded the size limit.
    FileTooLarge,
    /// File content could not be inspected.
    InvalidFileContent,
    /// Extension not in the allowed set.
    InvalidFileType,
    /// Temporary storage failed.
    FileStorageFailure,
    /// Database unreachable.
    DbConnectionFailure,
    /// Spreadsheet contents failed validation.
    ValidationFailure,
    /// Persisting parsed data failed.
    DbSaveFailure,
    /// Unclassified server failure.
    SystemFailure,
    /// Code this client does not know about.
    Other(String),
}

impl ErrorCode {
    /// Wire representation of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NoFilePart => "NO_FILE_PART",
            Self::EmptyFile => "EMPTY_FILE",
            Self::FileTooLarge => "FILE_TOO_LARGE",
            Self::InvalidFileContent => "INVALID_FILE_CONTENT",
            Self::InvalidFileType => "INVALID_FILE_TYPE",
            Self::FileStorageFailure => "FILE_STORAGE_FAILURE",
            Self::DbConnectionFailure => "DB_CONNECTION_FAILURE",
            Self::ValidationFailure => "VALIDATION_FAILURE",
            Self::DbSaveFailure => "DB_SAVE_FAILURE",
            Self::SystemFailure => "SYSTEM_FAILURE",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for ErrorCode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "NO_FILE_PART" => Self::NoFilePart,
            "EMPTY_FILE" => Self::EmptyFile,
            "FILE_TOO_LARGE" => Self::FileTooLarge,
            "INVALID_FILE_CONTENT" => Self::InvalidFileContent,
            "INVALID_FILE_TYPE" => Self::InvalidFileType,
            "FILE_STORAGE_FAILURE" => Self::FileStorageFailure,
            "DB_CONNECTION_FAILURE" => Self::DbConnectionFailure,
            "VALIDATION_FAILURE" => Self::ValidationFailure,
            "DB_SAVE_FAILURE" => Self::DbSaveFailure,
            "SYSTEM_FAILURE" => Self::SystemFailure,
            _ => Self::Other(value),
        }
    }
}

impl From<ErrorCode> for String {
    fn from(value: ErrorCode) -> Self {
        value.as_str().to_string()
    }
}

impl Display for ErrorCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// JSON error document returned on non-2xx responses.
///
/// The server is not consistent about which key carries the text: mutating
/// endpoints use `message`, read endpoints use `error`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ErrorBody {
    #[serde(default)]
    /// Usually `error`.
    pub status: Option<String>,
    #[serde(default)]
    /// Human-readable failure text.
    pub message: Option<String>,
    #[serde(default)]
    /// Alternate failure text key used by read endpoints.
    pub error: Option<String>,
    #[serde(default)]
    /// Structured failure classification.
    pub error_code: Option<ErrorCode>,
    #[serde(default)]
    /// Per-row validation failures for spreadsheet uploads.
    pub details: Option<Vec<String>>,
}

impl ErrorBody {
    /// First non-empty text the server supplied.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.message
            .as_deref()
            .or(self.error.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Opaque status label attached to a link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusLabel(String);

impl StatusLabel {
    /// Wrap a raw status string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw label as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bootstrap colour token for the status badge.
    #[must_use]
    pub fn badge_color(&self) -> &'static str {
        match self.0.trim().to_ascii_lowercase().as_str() {
            "active" => "success",
            "urgent" => "danger",
            "archived" | "unknown" => "secondary",
            "pending" => "warning",
            "completed" => "info",
            _ => "primary",
        }
    }
}

impl Display for StatusLabel {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}
