//! Endpoint locations read from the page.
//!
//! # Design
//! - The server renders an `app-urls` element whose `data-*` attributes carry
//!   every endpoint; any key it omits falls back to the default route.
//! - Keys are accepted both in attribute form (`data-upload-url`) and in the
//!   camelCase form a `DOMStringMap` yields (`uploadUrl`).

/// Default upload endpoint.
pub const DEFAULT_UPLOAD_URL: &str = "/upload";
/// Default sections fragment endpoint.
pub const DEFAULT_GET_SECTIONS_URL: &str = "/get-sections";
/// Default section creation endpoint.
pub const DEFAULT_CREATE_SECTION_URL: &str = "/create_section";
/// Default link creation endpoint.
pub const DEFAULT_ADD_LINK_URL: &str = "/add_link";
/// Default status options endpoint.
pub const DEFAULT_STATUS_URL: &str = "/get_status_options";
/// Default upload progress endpoint.
pub const DEFAULT_PROGRESS_URL: &str = "/upload/progress";
/// Default stats endpoint.
pub const DEFAULT_STATS_URL: &str = "/get-stats";

/// Header carrying the CSRF token on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Endpoint paths and request decorations for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUrls {
    /// `POST` multipart upload.
    pub upload: String,
    /// `GET` sections HTML fragment.
    pub get_sections: String,
    /// `POST` JSON section creation.
    pub create_section: String,
    /// `POST` JSON link creation.
    pub add_link: String,
    /// `GET` status option list.
    pub status: String,
    /// `GET` current upload progress.
    pub progress: String,
    /// `GET` dashboard counters.
    pub stats: String,
    /// CSRF token for mutating requests.
    pub csrf_token: Option<String>,
}

impl Default for AppUrls {
    fn default() -> Self {
        Self {
            upload: DEFAULT_UPLOAD_URL.to_string(),
            get_sections: DEFAULT_GET_SECTIONS_URL.to_string(),
            create_section: DEFAULT_CREATE_SECTION_URL.to_string(),
            add_link: DEFAULT_ADD_LINK_URL.to_string(),
            status: DEFAULT_STATUS_URL.to_string(),
            progress: DEFAULT_PROGRESS_URL.to_string(),
            stats: DEFAULT_STATS_URL.to_string(),
            csrf_token: None,
        }
    }
}

impl AppUrls {
    /// Build the configuration from dataset entries, keeping defaults for
    /// missing or blank keys. Unknown keys are ignored.
    #[must_use]
    pub fn from_dataset<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut urls = Self::default();
        for (key, value) in entries {
            let value: String = value.into();
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let slot = match normalize_key(key.as_ref()).as_str() {
                "upload-url" => &mut urls.upload,
                "get-sections-url" => &mut urls.get_sections,
                "create-section-url" => &mut urls.create_section,
                "add-link-url" => &mut urls.add_link,
                "status-url" => &mut urls.status,
                "progress-url" => &mut urls.progress,
                "stats-url" => &mut urls.stats,
                "csrf-token" => {
                    urls.csrf_token = Some(value.to_string());
                    continue;
                }
                _ => continue,
            };
            *slot = value.to_string();
        }
        urls
    }

    /// Attach a CSRF token.
    #[must_use]
    pub fn with_csrf_token(mut self, token: Option<String>) -> Self {
        self.csrf_token = token.filter(|token| !token.trim().is_empty());
        self
    }
}

/// Append the cache-busting `_=<epoch ms>` query parameter.
#[must_use]
pub fn with_cache_bust(path: &str, epoch_ms: u64) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{path}{separator}_={epoch_ms}")
}

fn normalize_key(raw: &str) -> String {
    let raw = raw.trim();
    let raw = raw.strip_prefix("data-").unwrap_or(raw);
    let mut out = String::with_capacity(raw.len() + 4);
    for ch in raw.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let urls = AppUrls::from_dataset([("uploadUrl", "/files/upload")]);
        assert_eq!(urls.upload, "/files/upload");
        assert_eq!(urls.get_sections, DEFAULT_GET_SECTIONS_URL);
        assert_eq!(urls.status, DEFAULT_STATUS_URL);
        assert_eq!(urls.progress, DEFAULT_PROGRESS_URL);
        assert!(urls.csrf_token.is_none());
    }

    #[test]
    fn attribute_and_camel_case_keys_are_equivalent() {
        let camel = AppUrls::from_dataset([
            ("getSectionsUrl", "/s"),
            ("createSectionUrl", "/c"),
            ("addLinkUrl", "/l"),
            ("statusUrl", "/st"),
            ("csrfToken", "tok"),
        ]);
        let attrs = AppUrls::from_dataset([
            ("data-get-sections-url", "/s"),
            ("data-create-section-url", "/c"),
            ("data-add-link-url", "/l"),
            ("data-status-url", "/st"),
            ("data-csrf-token", "tok"),
        ]);
        assert_eq!(camel, attrs);
        assert_eq!(camel.csrf_token.as_deref(), Some("tok"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let urls = AppUrls::from_dataset([("uploadUrl", "  "), ("unrelated", "/x")]);
        assert_eq!(urls, AppUrls::default());
    }

    #[test]
    fn cache_bust_respects_existing_query() {
        assert_eq!(with_cache_bust("/get-sections", 42), "/get-sections?_=42");
        assert_eq!(
            with_cache_bust("/get-sections?page=2", 42),
            "/get-sections?page=2&_=42"
        );
    }

    #[test]
    fn csrf_token_blank_is_dropped() {
        let urls = AppUrls::default().with_csrf_token(Some(" ".to_string()));
        assert!(urls.csrf_token.is_none());
    }
}
