//! Error taxonomy shared by every dashboard endpoint.
//!
//! # Design
//! - Transport, server, status, validation and content-type failures are
//!   distinct variants so callers can branch without parsing text.
//! - `Display` is the user-facing text; the toast layer shows it verbatim.

use sheetlinks_api_models::ErrorCode;
use thiserror::Error;

/// Result alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Failures raised while talking to the dashboard server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("Network error: {0}")]
    Transport(String),
    /// Non-2xx response with a readable error document.
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-supplied text, or the endpoint's fallback.
        message: String,
        /// Structured classification when the server sent one.
        code: Option<ErrorCode>,
    },
    /// Non-2xx response whose body could not be read as an error document.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Endpoint-specific fallback text.
        message: String,
    },
    /// Input rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The response did not declare a JSON content type.
    #[error("Invalid server response")]
    InvalidResponse {
        /// Content type that was actually received.
        content_type: Option<String>,
    },
    /// The upload exceeded the server's size limit (HTTP 413).
    #[error("File too large. Max 10MB allowed.")]
    PayloadTooLarge,
    /// A JSON body could not be decoded into the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl ClientError {
    /// HTTP status attached to the failure, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::PayloadTooLarge => Some(413),
            _ => None,
        }
    }

    /// Structured server code, if one was sent.
    #[must_use]
    pub const fn code(&self) -> Option<&ErrorCode> {
        match self {
            Self::Server { code, .. } => code.as_ref(),
            _ => None,
        }
    }

    /// True for failures caught before the network was touched.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Client-side input rules. Presence and length only; the server stays
/// authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Section form submitted without a spreadsheet or a name.
    #[error("Please select a spreadsheet and enter a section name")]
    SectionFieldsMissing,
    /// Section name longer than `SECTION_NAME_MAX_CHARS`.
    #[error("Section name cannot exceed 255 characters")]
    SectionNameTooLong,
    /// Link form submitted with an empty field.
    #[error("All fields are required")]
    LinkFieldsMissing,
    /// Link URL is not an absolute URL.
    #[error("Please enter a valid URL")]
    InvalidUrl,
    /// Upload submitted with no file chosen.
    #[error("Please select a file to upload")]
    NoFileSelected,
    /// Upload file extension is outside the accepted set.
    #[error("Invalid file type. Allowed types: csv, xls, xlsx")]
    UnsupportedFileType,
    /// Upload file is larger than the configured limit.
    #[error("File exceeds the maximum upload size")]
    FileTooLarge,
}
