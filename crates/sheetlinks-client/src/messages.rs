//! User-facing text for workflow outcomes.
//!
//! Shared by the browser toasts and the CLI so both report the same wording.

use crate::error::ClientError;

/// Toast after an upload whose follow-up refreshes all succeeded.
pub const UPLOAD_SUCCESS: &str = "File uploaded successfully!";
/// Toast after an upload where at least one refresh failed.
pub const UPLOAD_PARTIAL: &str = "Upload successful with partial updates";
/// Fallback upload failure text.
pub const UPLOAD_FAILED: &str = "Upload failed";
/// Success toast for section creation.
pub const SECTION_CREATED: &str = "Section created successfully!";
/// Fallback section creation failure text.
pub const SECTION_FAILED: &str = "Failed to create section";
/// Duplicate section failure text.
pub const SECTION_DUPLICATE: &str = "Section name already exists in this spreadsheet";
/// Unknown spreadsheet failure text.
pub const SECTION_BAD_SPREADSHEET: &str = "Invalid spreadsheet selection";
/// Success toast for link creation.
pub const LINK_ADDED: &str = "Link added successfully!";
/// Fallback link creation failure text.
pub const LINK_FAILED: &str = "Failed to add link";
/// Error raised by a failed sections fetch.
pub const SECTIONS_FETCH_FAILED: &str = "Failed to fetch sections";
/// Toast shown when a sections refresh fails.
pub const SECTIONS_REFRESH_FAILED: &str = "Failed to refresh sections list";
/// Toast shown when a stats refresh fails.
pub const STATS_REFRESH_FAILED: &str = "Failed to refresh statistics";
/// Toast shown when the status loader fails.
pub const STATUS_LOAD_FAILED: &str = "Failed to load status options";
/// Toast shown when page start-up fails.
pub const INIT_FAILED: &str = "Failed to initialize application";

/// Map a section creation failure to the text shown to the user.
///
/// A 404 means the selected spreadsheet is missing or not the user's.
/// Otherwise the server text is matched: "already exists" in any case,
/// "foreign key constraint" exactly.
#[must_use]
pub fn section_failure(error: &ClientError) -> String {
    if error.status() == Some(404) {
        return SECTION_BAD_SPREADSHEET.to_string();
    }
    let text = match error {
        ClientError::Server { message, .. } | ClientError::Status { message, .. } => {
            message.clone()
        }
        other => other.to_string(),
    };
    if text.to_lowercase().contains("already exists") {
        SECTION_DUPLICATE.to_string()
    } else if text.contains("foreign key constraint") {
        SECTION_BAD_SPREADSHEET.to_string()
    } else if text.trim().is_empty() {
        SECTION_FAILED.to_string()
    } else {
        text
    }
}

/// Text for a failed upload, shown under the bar as `Error: <text>`.
#[must_use]
pub fn upload_failure(error: &ClientError) -> String {
    let text = error.to_string();
    if text.trim().is_empty() {
        UPLOAD_FAILED.to_string()
    } else {
        text
    }
}
