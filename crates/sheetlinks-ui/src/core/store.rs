//! Page-wide store.
//!
//! # Design
//! - One yewdux `DashboardStore` holds everything the page renders; components
//!   select slices of it and workflows mutate it through `Dispatch::reduce_mut`.
//! - Sections are kept once. The pill list and the link-form dropdown are
//!   both derived from that list, so they cannot drift apart.
//! - Form inputs are stored as raw strings and converted only on submit.

use sheetlinks_client::validate::{check_link_url, check_section_name_length};
use yewdux::prelude::Dispatch;
use yewdux::store::Store;

use crate::core::toast::ToastQueue;
use crate::models::{
    LinkView, PageBootstrap, QuickStats, SectionLinks, SectionSummary, SpreadsheetOption,
    ToastKind, UploadProgress,
};

/// Everything the dashboard page renders.
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct DashboardStore {
    /// Spreadsheets offered by the section form.
    pub spreadsheets: Vec<SpreadsheetOption>,
    /// Sections in display order.
    pub sections: Vec<SectionSummary>,
    /// Link lists for sections displayed on this page.
    pub section_links: Vec<SectionLinks>,
    /// Header counters.
    pub stats: Option<QuickStats>,
    /// Status select state.
    pub statuses: StatusOptions,
    /// Upload progress panel.
    pub upload: UploadPanel,
    /// Section creation form.
    pub section_form: SectionFormState,
    /// Link creation form.
    pub link_form: LinkFormState,
    /// Bumped to remount (reset) the upload form.
    pub upload_form_epoch: u64,
    /// Bumped on every sections refresh; keys the pill list fade.
    pub sections_epoch: u64,
    /// Live toasts.
    pub toasts: ToastQueue,
}

impl DashboardStore {
    /// Seed the store from the server-embedded bootstrap block.
    #[must_use]
    pub fn from_bootstrap(bootstrap: PageBootstrap) -> Self {
        Self {
            spreadsheets: bootstrap.spreadsheets,
            sections: bootstrap.sections,
            section_links: bootstrap.links,
            stats: bootstrap.stats,
            ..Self::default()
        }
    }

    /// Put a new section first, replacing any stale copy with the same id.
    pub fn prepend_section(&mut self, section: SectionSummary) {
        self.sections.retain(|existing| existing.id != section.id);
        self.sections.insert(0, section);
    }

    /// Replace the section list after a refresh.
    pub fn replace_sections(&mut self, sections: Vec<SectionSummary>) {
        self.sections = sections;
        self.sections_epoch += 1;
    }

    /// Put a new link first in its section's list.
    ///
    /// Returns `false` (and changes nothing) when that section's list is not
    /// displayed on this page.
    pub fn prepend_link(&mut self, section_id: i64, link: LinkView) -> bool {
        match self
            .section_links
            .iter_mut()
            .find(|entry| entry.section_id == section_id)
        {
            Some(entry) => {
                entry.links.insert(0, link);
                true
            }
            None => false,
        }
    }

    /// Links displayed for a section, if any.
    #[must_use]
    pub fn links_for(&self, section_id: i64) -> Option<&[LinkView]> {
        self.section_links
            .iter()
            .find(|entry| entry.section_id == section_id)
            .map(|entry| entry.links.as_slice())
    }
}

/// Status select states.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StatusOptions {
    /// Request in flight.
    #[default]
    Loading,
    /// Statuses available.
    Ready(Vec<String>),
    /// Server returned an empty list.
    Empty,
    /// Request failed.
    Failed,
}

/// Progress bar colouring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BarTone {
    /// Default bar.
    #[default]
    Normal,
    /// Upload failed.
    Danger,
}

/// Upload progress panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadPanel {
    /// Panel is displayed.
    pub visible: bool,
    /// Bar width in percent.
    pub percent: u8,
    /// Percentage label; empty once the panel is cleared.
    pub percent_text: String,
    /// Stage or error text under the bar.
    pub status_text: String,
    /// Bar is striped and animated.
    pub animated: bool,
    /// Bar colouring.
    pub tone: BarTone,
    /// Success message shown after the server accepted the file.
    pub success_message: Option<String>,
    /// An upload request is outstanding.
    pub in_flight: bool,
}

impl UploadPanel {
    /// Show a fresh panel for a new upload.
    pub fn start(&mut self) {
        *self = Self {
            visible: true,
            percent: 0,
            percent_text: "0%".to_string(),
            status_text: String::new(),
            animated: true,
            tone: BarTone::Normal,
            success_message: None,
            in_flight: true,
        };
    }

    /// Apply a server progress report. Ignored once the request settled.
    pub fn apply_progress(&mut self, progress: &UploadProgress) {
        if !self.in_flight {
            return;
        }
        self.percent = progress.percent();
        self.percent_text = format!("{}%", self.percent);
        self.status_text.clone_from(&progress.status);
    }

    /// Server accepted the file.
    pub fn succeed(&mut self, message: impl Into<String>) {
        self.in_flight = false;
        self.percent = 100;
        self.percent_text = "100%".to_string();
        self.animated = false;
        self.success_message = Some(message.into());
    }

    /// Upload failed with `message`.
    pub fn fail(&mut self, message: &str) {
        self.in_flight = false;
        self.status_text = format!("Error: {message}");
        self.tone = BarTone::Danger;
        self.success_message = None;
    }

    /// Hide and zero the panel after a successful upload.
    pub fn clear_after_success(&mut self) {
        self.visible = false;
        self.percent = 0;
        self.percent_text.clear();
        self.status_text.clear();
        self.success_message = None;
    }

    /// Hide the panel and reset the bar after a failed upload.
    pub fn clear_after_error(&mut self) {
        self.visible = false;
        self.animated = false;
        self.tone = BarTone::Normal;
    }

    /// Class list for the bar element.
    #[must_use]
    pub fn bar_classes(&self) -> String {
        let mut classes = String::from("progress-bar");
        if self.animated {
            classes.push_str(" progress-bar-striped progress-bar-animated");
        }
        if self.tone == BarTone::Danger {
            classes.push_str(" bg-danger");
        }
        classes
    }
}

/// Section creation form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionFormState {
    /// Selected spreadsheet id (select value).
    pub spreadsheet_id: String,
    /// Section name as typed.
    pub name: String,
    /// Inline error under the name input.
    pub name_error: Option<String>,
    /// Submit in progress; the button is disabled and shows a spinner.
    pub busy: bool,
}

impl SectionFormState {
    /// Update the name and its inline error.
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
        self.name_error = check_section_name_length(&self.name)
            .err()
            .map(|err| err.to_string());
    }
}

/// Link creation form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkFormState {
    /// Selected section id (select value).
    pub section_id: String,
    /// Title as typed.
    pub title: String,
    /// URL as typed.
    pub url: String,
    /// Inline error under the URL input.
    pub url_error: Option<String>,
    /// Selected status.
    pub status: String,
}

impl LinkFormState {
    /// Update the URL and its inline error.
    pub fn set_url(&mut self, value: impl Into<String>) {
        self.url = value.into();
        self.url_error = check_link_url(&self.url).err().map(|err| err.to_string());
    }
}

/// Push a toast stamped with `now_ms`.
pub fn push_toast(
    dispatch: &Dispatch<DashboardStore>,
    kind: ToastKind,
    message: impl Into<String>,
    now_ms: u64,
) {
    let message = message.into();
    dispatch.reduce_mut(|state| {
        state.toasts.push(message, kind, now_ms);
    });
}

/// Global dispatch reset to `state`.
///
/// The store is thread-local, so each test thread starts from its own copy.
#[cfg(test)]
pub(crate) fn seeded_dispatch(state: DashboardStore) -> Dispatch<DashboardStore> {
    let dispatch = Dispatch::<DashboardStore>::new();
    dispatch.set(state);
    dispatch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: i64, name: &str) -> SectionSummary {
        SectionSummary {
            id,
            name: name.to_string(),
            spreadsheet_id: 1,
        }
    }

    #[test]
    fn prepend_section_replaces_stale_copy() {
        let mut store = DashboardStore {
            sections: vec![section(1, "A"), section(2, "B")],
            ..DashboardStore::default()
        };
        store.prepend_section(section(2, "B renamed"));
        let names: Vec<&str> = store.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["B renamed", "A"]);
    }

    #[test]
    fn prepend_link_is_noop_for_hidden_sections() {
        let mut store = DashboardStore {
            section_links: vec![SectionLinks {
                section_id: 4,
                links: Vec::new(),
            }],
            ..DashboardStore::default()
        };
        let link = LinkView {
            title: "Docs".to_string(),
            url: "https://docs.example.com".to_string(),
            status: "active".to_string(),
        };
        assert!(!store.prepend_link(9, link.clone()));
        assert!(store.prepend_link(4, link.clone()));
        assert_eq!(store.links_for(4), Some(&[link][..]));
        assert_eq!(store.links_for(9), None);
    }

    #[test]
    fn upload_panel_lifecycle() {
        let mut panel = UploadPanel::default();
        panel.start();
        assert!(panel.visible);
        assert_eq!(panel.percent_text, "0%");
        assert_eq!(
            panel.bar_classes(),
            "progress-bar progress-bar-striped progress-bar-animated"
        );

        panel.apply_progress(&UploadProgress {
            progress: 35.2,
            status: "Processing sheet: Links".to_string(),
            ..UploadProgress::default()
        });
        assert_eq!(panel.percent, 35);
        assert_eq!(panel.status_text, "Processing sheet: Links");

        panel.succeed("File processed successfully");
        assert_eq!(panel.percent_text, "100%");
        assert_eq!(panel.bar_classes(), "progress-bar");

        panel.apply_progress(&UploadProgress {
            progress: 50.0,
            ..UploadProgress::default()
        });
        assert_eq!(panel.percent, 100, "late report must not move the bar");

        panel.clear_after_success();
        assert!(!panel.visible);
        assert_eq!(panel.percent, 0);
        assert!(panel.percent_text.is_empty());
    }

    #[test]
    fn upload_panel_failure_styling() {
        let mut panel = UploadPanel::default();
        panel.start();
        panel.fail("Invalid server response");
        assert_eq!(panel.status_text, "Error: Invalid server response");
        assert!(panel.bar_classes().ends_with("bg-danger"));
        panel.clear_after_error();
        assert!(!panel.visible);
        assert_eq!(panel.bar_classes(), "progress-bar");
    }

    #[test]
    fn inline_errors_track_input() {
        let mut form = SectionFormState::default();
        form.set_name("x".repeat(256));
        assert_eq!(
            form.name_error.as_deref(),
            Some("Section name cannot exceed 255 characters")
        );
        form.set_name("ok");
        assert!(form.name_error.is_none());

        let mut link = LinkFormState::default();
        link.set_url("not a url");
        assert_eq!(link.url_error.as_deref(), Some("Please enter a valid URL"));
        link.set_url("https://example.com");
        assert!(link.url_error.is_none());
    }

    #[test]
    fn toasts_and_reductions_land_in_the_global_store() {
        let dispatch = seeded_dispatch(DashboardStore::default());

        dispatch.reduce_mut(|state| state.sections_epoch += 1);
        push_toast(&dispatch, ToastKind::Info, "hello", 0);

        let state = Dispatch::<DashboardStore>::new().get();
        assert_eq!(state.sections_epoch, 1);
        assert_eq!(state.toasts.toasts()[0].message, "hello");

        let reset = seeded_dispatch(DashboardStore::default());
        assert!(reset.get().toasts.is_empty());
    }
}
