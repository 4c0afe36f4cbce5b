//! Turn raw HTTP replies into typed results.
//!
//! # Design
//! - Transports stop at [`RawResponse`]; all status and content-type rules
//!   live here so the browser and native clients cannot disagree.
//! - A 413 on upload always maps to [`ClientError::PayloadTooLarge`], even
//!   when the body is an HTML error page.
//! - Content type is checked before the body is touched.

use serde::de::DeserializeOwned;
use sheetlinks_api_models::{ErrorBody, UploadResponse};

use crate::error::{ClientError, ClientResult};

/// Status code the server uses for oversized uploads.
pub const PAYLOAD_TOO_LARGE: u16 = 413;

/// Reply reduced to what interpretation needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Value of the `Content-Type` header, if present.
    pub content_type: Option<String>,
    /// Full body.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Convenience constructor used by transports and tests.
    #[must_use]
    pub fn new(status: u16, content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// True when the declared content type includes `application/json`.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|value| value.to_ascii_lowercase().contains("application/json"))
    }

    /// Body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Interpret the upload endpoint's reply.
///
/// # Errors
///
/// - [`ClientError::PayloadTooLarge`] for 413, regardless of body.
/// - [`ClientError::InvalidResponse`] when the reply is not JSON.
/// - [`ClientError::Server`] / [`ClientError::Status`] for other non-2xx
///   statuses, with `Upload failed` as fallback text.
/// - [`ClientError::Decode`] when a 2xx JSON body has the wrong shape.
pub fn upload_response(raw: &RawResponse) -> ClientResult<UploadResponse> {
    if raw.status == PAYLOAD_TOO_LARGE {
        return Err(ClientError::PayloadTooLarge);
    }
    if !raw.is_json() {
        return Err(ClientError::InvalidResponse {
            content_type: raw.content_type.clone(),
        });
    }
    json_response(raw, "Upload failed")
}

/// Interpret a JSON reply, mapping failures onto the error taxonomy.
///
/// Non-2xx replies are checked first so an error page with the wrong content
/// type still reports the fallback text.
///
/// # Errors
///
/// Non-2xx statuses become [`ClientError::Server`] when the body is an error
/// document, otherwise [`ClientError::Status`] carrying `fallback`. A 2xx body
/// that is not JSON yields [`ClientError::InvalidResponse`]; one that does not
/// decode yields [`ClientError::Decode`].
pub fn json_response<T: DeserializeOwned>(raw: &RawResponse, fallback: &str) -> ClientResult<T> {
    if !raw.is_success() {
        return Err(failure(raw, fallback));
    }
    if !raw.is_json() {
        return Err(ClientError::InvalidResponse {
            content_type: raw.content_type.clone(),
        });
    }
    serde_json::from_slice(&raw.body).map_err(|err| ClientError::Decode(err.to_string()))
}

/// Interpret a text reply (the sections fragment).
///
/// # Errors
///
/// Non-2xx statuses yield [`ClientError::Status`] carrying `fallback`; the
/// body is not inspected.
pub fn text_response(raw: &RawResponse, fallback: &str) -> ClientResult<String> {
    if raw.is_success() {
        Ok(raw.text())
    } else {
        Err(ClientError::Status {
            status: raw.status,
            message: fallback.to_string(),
        })
    }
}

/// Fallback text the status endpoint reports for a bad HTTP status.
#[must_use]
pub fn http_status_message(status: u16) -> String {
    format!("HTTP error! status: {status}")
}

fn failure(raw: &RawResponse, fallback: &str) -> ClientError {
    let body = if raw.is_json() {
        serde_json::from_slice::<ErrorBody>(&raw.body).ok()
    } else {
        None
    };
    match body {
        Some(body) => ClientError::Server {
            status: raw.status,
            message: body.text().unwrap_or(fallback).to_string(),
            code: body.error_code,
        },
        None => ClientError::Status {
            status: raw.status,
            message: fallback.to_string(),
        },
    }
}
