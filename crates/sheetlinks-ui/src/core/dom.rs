//! Element ids and classes the page markup exposes.
//!
//! Server templates, page scripts and stylesheets select these, so the
//! components take every id and class from here.

/// Endpoint dataset container.
pub const APP_URLS: &str = "app-urls";
/// Upload form.
pub const UPLOAD_FORM: &str = "uploadForm";
/// Progress panel wrapper.
pub const UPLOAD_PROGRESS_CONTAINER: &str = "upload-progress-container";
/// Progress bar.
pub const UPLOAD_PROGRESS: &str = "upload-progress";
/// Stage or error text under the bar.
pub const UPLOAD_STATUS: &str = "upload-status";
/// Percentage label.
pub const UPLOAD_PERCENTAGE: &str = "upload-percentage";
/// Success message after the server accepted a file.
pub const UPLOAD_SUCCESS_MESSAGE: &str = "upload-success-message";
/// Section creation form.
pub const CREATE_SECTION_FORM: &str = "createSectionForm";
/// Spreadsheet select in the section form.
pub const SPREADSHEET_SELECT: &str = "spreadsheet_id";
/// Section name input.
pub const NEW_SECTION_NAME: &str = "newSectionName";
/// Inline error under the section name.
pub const SECTION_NAME_ERROR: &str = "section-name-error";
/// Link creation form.
pub const ADD_LINK_FORM: &str = "addLinkForm";
/// Section select in the link form.
pub const LINK_SECTION: &str = "section";
/// Link title input.
pub const LINK_TITLE: &str = "title";
/// Link URL input.
pub const LINK_URL: &str = "link";
/// Inline error under the URL input.
pub const LINK_ERROR: &str = "link-error";
/// Status select in the link form.
pub const LINK_STATUS: &str = "status";
/// Toast container.
pub const TOAST_CONTAINER: &str = "toast-container";

/// Wrapper around the section pills.
pub const SECTION_LIST_CLASS: &str = "horizontal-section-list";
/// One section pill; carries `data-section-id`.
pub const SECTION_PILL_CLASS: &str = "section-pill";
/// Link list inside a section block.
pub const LINK_LIST_CLASS: &str = "link-list";

/// Id of the block holding one section's links.
#[must_use]
pub fn section_block_id(section_id: i64) -> String {
    format!("section-{section_id}")
}

/// Selector for one section's link list.
#[must_use]
pub fn link_list_selector(section_id: i64) -> String {
    format!("#{} .{LINK_LIST_CLASS}", section_block_id(section_id))
}
