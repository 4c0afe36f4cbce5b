//! UI-facing view models.
//!
//! Wire types come from `sheetlinks-api-models`; the types here only exist to
//! render them.

pub use sheetlinks_api_models::{
    AddLinkRequest, CreateSectionRequest, ErrorCode, LinkView, PageBootstrap, QuickStats,
    SectionLinks, SectionSummary, SpreadsheetOption, StatusLabel, UploadProgress, UploadResponse,
};

/// Toast variants used across the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Neutral information.
    Info,
    /// Completed action.
    Success,
    /// Completed with caveats, or input needing attention.
    Warning,
    /// Failed action.
    Error,
}

impl ToastKind {
    /// CSS modifier class (`toast-<kind>`).
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Info => "toast-info",
            Self::Success => "toast-success",
            Self::Warning => "toast-warning",
            Self::Error => "toast-error",
        }
    }
}

/// Toast payload used by the host and the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Monotonic toast identifier.
    pub id: u64,
    /// Display message for the toast.
    pub message: String,
    /// Severity classification.
    pub kind: ToastKind,
    /// Epoch milliseconds after which the toast is removed.
    pub expires_at_ms: u64,
}

/// A rendered section pill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionPill {
    /// Section identifier (`data-section-id`).
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Dashboard link for the section.
    pub href: String,
    /// Badge text (owning spreadsheet id).
    pub badge: String,
}

/// One `<option>` of a select control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Visible label.
    pub label: String,
    /// Option cannot be chosen.
    pub disabled: bool,
}

impl SelectOption {
    /// Selectable option.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Disabled option with an empty value, used for placeholders and states.
    #[must_use]
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            label: label.into(),
            disabled: true,
        }
    }
}

/// A rendered link row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkItem {
    /// Link title.
    pub title: String,
    /// Link target.
    pub url: String,
    /// Status text shown in the badge and used as the anchor class.
    pub status: String,
    /// Badge colour class (`bg-<colour>`).
    pub badge_class: String,
}

impl From<&LinkView> for LinkItem {
    fn from(link: &LinkView) -> Self {
        Self {
            title: link.title.clone(),
            url: link.url.clone(),
            status: link.status.clone(),
            badge_class: format!("bg-{}", link.status_label().badge_color()),
        }
    }
}
