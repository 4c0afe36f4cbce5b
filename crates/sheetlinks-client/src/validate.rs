//! Client-side form rules.
//!
//! These only guard against obviously incomplete input so no request is sent
//! for it; every rule is re-checked by the server.

use sheetlinks_api_models::{
    ALLOWED_UPLOAD_EXTENSIONS, AddLinkRequest, CreateSectionRequest, SECTION_NAME_MAX_CHARS,
};
use url::Url;

use crate::error::ValidationError;

/// Length check used by the inline section-name hint.
///
/// # Errors
///
/// Returns [`ValidationError::SectionNameTooLong`] when the trimmed name has
/// more than [`SECTION_NAME_MAX_CHARS`] characters.
pub fn check_section_name_length(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() > SECTION_NAME_MAX_CHARS {
        return Err(ValidationError::SectionNameTooLong);
    }
    Ok(())
}

/// Absolute-URL check used by the inline link hint.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidUrl`] when the trimmed value does not
/// parse as an absolute URL.
pub fn check_link_url(raw: &str) -> Result<(), ValidationError> {
    Url::parse(raw.trim())
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidUrl)
}

/// Validate the section form and build the request body.
///
/// # Errors
///
/// Missing spreadsheet or blank name yields
/// [`ValidationError::SectionFieldsMissing`]; an over-long name yields
/// [`ValidationError::SectionNameTooLong`].
pub fn section_request(
    spreadsheet_id: &str,
    section_name: &str,
) -> Result<CreateSectionRequest, ValidationError> {
    let spreadsheet_id = spreadsheet_id.trim();
    let section_name = section_name.trim();
    if spreadsheet_id.is_empty() || section_name.is_empty() {
        return Err(ValidationError::SectionFieldsMissing);
    }
    check_section_name_length(section_name)?;
    Ok(CreateSectionRequest {
        spreadsheet_id: spreadsheet_id.to_string(),
        section_name: section_name.to_string(),
    })
}

/// Validate the link form and build the request body.
///
/// Only presence is checked here; URL syntax is surfaced inline while typing.
///
/// # Errors
///
/// Returns [`ValidationError::LinkFieldsMissing`] when any field is empty after
/// trimming.
pub fn link_request(
    section_id: &str,
    title: &str,
    url: &str,
    status: &str,
) -> Result<AddLinkRequest, ValidationError> {
    let section_id = section_id.trim();
    let title = title.trim();
    let url = url.trim();
    let status = status.trim();
    if [section_id, title, url, status]
        .iter()
        .any(|field| field.is_empty())
    {
        return Err(ValidationError::LinkFieldsMissing);
    }
    Ok(AddLinkRequest {
        section_id: section_id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        status: status.to_string(),
    })
}

/// Pre-flight check for the upload form.
///
/// # Errors
///
/// Returns [`ValidationError::NoFileSelected`] for a missing or blank file
/// name and [`ValidationError::UnsupportedFileType`] when the extension is not
/// one of [`ALLOWED_UPLOAD_EXTENSIONS`].
pub fn check_upload_file_name(file_name: Option<&str>) -> Result<(), ValidationError> {
    let name = file_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or(ValidationError::NoFileSelected)?;
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or(ValidationError::UnsupportedFileType)?;
    if ALLOWED_UPLOAD_EXTENSIONS.contains(&extension.as_str()) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedFileType)
    }
}

/// Size check applied by callers that know the file length up front.
///
/// # Errors
///
/// Returns [`ValidationError::FileTooLarge`] when `len` exceeds `max_bytes`.
pub const fn check_upload_size(len: u64, max_bytes: u64) -> Result<(), ValidationError> {
    if len > max_bytes {
        Err(ValidationError::FileTooLarge)
    } else {
        Ok(())
    }
}
