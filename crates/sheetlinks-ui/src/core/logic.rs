//! Pure UI helpers extracted from components for non-wasm testing.

use chrono::NaiveDateTime;

use crate::core::store::StatusOptions;
use crate::models::{
    LinkItem, LinkView, QuickStats, SectionPill, SectionSummary, SelectOption, SpreadsheetOption,
};

/// Placeholder for the link form's section select.
pub const SECTION_PLACEHOLDER: &str = "Select Section";
/// Placeholder for the section form's spreadsheet select.
pub const SPREADSHEET_PLACEHOLDER: &str = "Select Spreadsheet";
/// Status select text while loading.
pub const STATUS_LOADING: &str = "Loading statuses...";
/// Status select placeholder once loaded.
pub const STATUS_PLACEHOLDER: &str = "Select Status";
/// Status select text for an empty list.
pub const STATUS_EMPTY: &str = "No statuses found";
/// Status select text after a failure.
pub const STATUS_FAILED: &str = "Error loading statuses";
/// Section submit label while the request is in flight.
pub const SECTION_BUSY_LABEL: &str = "Creating...";
/// Section submit label at rest.
pub const SECTION_IDLE_LABEL: &str = "Create Section";

/// Dashboard URL for a section.
#[must_use]
pub fn section_href(name: &str) -> String {
    format!("/dashboard/{}", urlencoding::encode(name))
}

/// Pills for the horizontal section list.
#[must_use]
pub fn section_pills(sections: &[SectionSummary]) -> Vec<SectionPill> {
    sections
        .iter()
        .map(|section| SectionPill {
            id: section.id,
            name: section.name.clone(),
            href: section_href(&section.name),
            badge: section.spreadsheet_id.to_string(),
        })
        .collect()
}

/// Options for the link form's section select; the placeholder always stays
/// first.
#[must_use]
pub fn section_options(sections: &[SectionSummary]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder(SECTION_PLACEHOLDER))
        .chain(
            sections
                .iter()
                .map(|section| SelectOption::new(section.id.to_string(), section.name.clone())),
        )
        .collect()
}

/// Options for the section form's spreadsheet select.
#[must_use]
pub fn spreadsheet_options(spreadsheets: &[SpreadsheetOption]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder(SPREADSHEET_PLACEHOLDER))
        .chain(
            spreadsheets
                .iter()
                .map(|sheet| SelectOption::new(sheet.id.to_string(), sheet.name.clone())),
        )
        .collect()
}

/// Options for the status select in each loader state.
#[must_use]
pub fn status_options(state: &StatusOptions) -> Vec<SelectOption> {
    match state {
        StatusOptions::Loading => vec![SelectOption::placeholder(STATUS_LOADING)],
        StatusOptions::Empty => vec![SelectOption::placeholder(STATUS_EMPTY)],
        StatusOptions::Failed => vec![SelectOption::placeholder(STATUS_FAILED)],
        StatusOptions::Ready(statuses) => std::iter::once(SelectOption::placeholder(
            STATUS_PLACEHOLDER,
        ))
        .chain(
            statuses
                .iter()
                .map(|status| SelectOption::new(status.clone(), status.clone())),
        )
        .collect(),
    }
}

/// Rendered rows for a link list.
#[must_use]
pub fn link_items(links: &[LinkView]) -> Vec<LinkItem> {
    links.iter().map(LinkItem::from).collect()
}

/// Label for the section submit button.
#[must_use]
pub const fn section_submit_label(busy: bool) -> &'static str {
    if busy {
        SECTION_BUSY_LABEL
    } else {
        SECTION_IDLE_LABEL
    }
}

/// Header counters as `(files, sections, last upload)` text.
#[must_use]
pub fn stats_labels(stats: Option<&QuickStats>) -> (String, String, String) {
    stats.map_or_else(
        || ("0".to_string(), "0".to_string(), format_last_upload(None)),
        |stats| {
            (
                stats.total_files.to_string(),
                stats.total_sections.to_string(),
                format_last_upload(stats.last_upload),
            )
        },
    )
}

/// Human-readable last upload time.
#[must_use]
pub fn format_last_upload(value: Option<NaiveDateTime>) -> String {
    value.map_or_else(
        || "Never".to_string(),
        |at| at.format("%Y-%m-%d %H:%M").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sections() -> Vec<SectionSummary> {
        vec![
            SectionSummary {
                id: 7,
                name: "R&D Notes".to_string(),
                spreadsheet_id: 2,
            },
            SectionSummary {
                id: 3,
                name: "Ops".to_string(),
                spreadsheet_id: 1,
            },
        ]
    }

    #[test]
    fn pills_and_options_come_from_one_list() {
        let sections = sections();
        let pills = section_pills(&sections);
        let options = section_options(&sections);

        assert_eq!(pills[0].href, "/dashboard/R%26D%20Notes");
        assert_eq!(pills[0].badge, "2");
        assert_eq!(options[0], SelectOption::placeholder(SECTION_PLACEHOLDER));
        assert_eq!(options.len(), sections.len() + 1);
        for (pill, option) in pills.iter().zip(options.iter().skip(1)) {
            assert_eq!(pill.id.to_string(), option.value);
            assert_eq!(pill.name, option.label);
        }
    }

    #[test]
    fn placeholder_survives_empty_lists() {
        assert_eq!(
            section_options(&[]),
            vec![SelectOption::placeholder(SECTION_PLACEHOLDER)]
        );
        assert_eq!(spreadsheet_options(&[]).len(), 1);
    }

    #[test]
    fn status_options_per_state() {
        assert_eq!(
            status_options(&StatusOptions::Loading)[0].label,
            STATUS_LOADING
        );
        assert_eq!(status_options(&StatusOptions::Empty)[0].label, STATUS_EMPTY);
        assert_eq!(
            status_options(&StatusOptions::Failed)[0].label,
            STATUS_FAILED
        );
        let ready = status_options(&StatusOptions::Ready(vec![
            "active".to_string(),
            "urgent".to_string(),
        ]));
        assert_eq!(ready.len(), 3);
        assert!(ready[0].disabled);
        assert_eq!(ready[0].label, STATUS_PLACEHOLDER);
        assert_eq!(ready[2], SelectOption::new("urgent", "urgent"));
    }

    #[test]
    fn submit_label_reflects_busy_flag() {
        assert_eq!(section_submit_label(true), "Creating...");
        assert_eq!(section_submit_label(false), "Create Section");
    }

    #[test]
    fn stats_labels_format_last_upload() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|date| date.and_hms_opt(9, 5, 0))
            .expect("valid timestamp");
        let stats = QuickStats {
            total_files: 2,
            total_sections: 9,
            last_upload: Some(at),
        };
        assert_eq!(
            stats_labels(Some(&stats)),
            ("2".to_string(), "9".to_string(), "2024-03-01 09:05".to_string())
        );
        assert_eq!(stats_labels(None).2, "Never");
    }
}
