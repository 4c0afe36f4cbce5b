//! Parse the server-rendered sections fragment.
//!
//! # Design
//! - The fragment is parsed once into `SectionSummary` values; the pill list
//!   and the link-form dropdown both render from that one list.
//! - A pill is any element whose `class` contains `section-pill` and that
//!   carries `data-section-id`. Its name is the link text with the badge
//!   removed; the badge holds the spreadsheet id unless the element carries
//!   `data-spreadsheet-id`.
//! - Markup outside pills is ignored; malformed pills are skipped with a
//!   warning rather than failing the whole refresh.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use sheetlinks_api_models::SectionSummary;

static OPEN_TAG: Lazy<Regex> = Lazy::new(|| compile(r"(?is)<([a-z][a-z0-9-]*)((?:\s[^>]*)?)>"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| compile(r"(?s)<[^>]*>"));
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    compile(r#"(?s)([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
});
static ANCHOR_BODY: Lazy<Regex> = Lazy::new(|| compile(r"(?is)<a\b[^>]*>(.*?)</a\s*>"));
static SPAN: Lazy<Regex> = Lazy::new(|| compile(r"(?is)<span\b([^>]*)>(.*?)</span\s*>"));
static ENTITY: Lazy<Regex> = Lazy::new(|| compile(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| compile(r"\s+"));

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static fragment pattern")
}

/// Extract every section pill from `html`, in document order.
#[must_use]
pub fn parse_sections(html: &str) -> Vec<SectionSummary> {
    let starts: Vec<PillStart> = OPEN_TAG
        .captures_iter(html)
        .filter_map(|caps| PillStart::from_tag(&caps))
        .collect();

    let mut sections = Vec::with_capacity(starts.len());
    for (index, start) in starts.iter().enumerate() {
        let end = starts
            .get(index + 1)
            .map_or(html.len(), |next| next.tag_start);
        let body = &html[start.body_start..end];
        match start.section(body) {
            Some(section) => sections.push(section),
            None => tracing::warn!(
                section_id = %start.raw_id,
                "skipping section pill without a usable id or name"
            ),
        }
    }
    sections
}

/// Decode the HTML entities the server's template engine emits.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity.strip_prefix('#').and_then(|number| {
                    let code = match number.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => number.parse().ok(),
                    };
                    code.and_then(char::from_u32)
                }),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

struct PillStart {
    tag_start: usize,
    body_start: usize,
    raw_id: String,
    spreadsheet_attr: Option<String>,
}

impl PillStart {
    fn from_tag(caps: &Captures<'_>) -> Option<Self> {
        let whole = caps.get(0)?;
        let attrs = caps.get(2).map_or("", |m| m.as_str());
        if !has_class(attrs, "section-pill") {
            return None;
        }
        let raw_id = attribute(attrs, "data-section-id")?;
        Some(Self {
            tag_start: whole.start(),
            body_start: whole.end(),
            raw_id,
            spreadsheet_attr: attribute(attrs, "data-spreadsheet-id"),
        })
    }

    fn section(&self, body: &str) -> Option<SectionSummary> {
        let id = self.raw_id.trim().parse::<i64>().ok()?;
        let label = ANCHOR_BODY
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map_or(body, |m| m.as_str());

        let mut badge = None;
        let without_badge = SPAN.replace_all(label, |caps: &Captures<'_>| {
            if has_class(&caps[1], "badge") {
                badge.get_or_insert_with(|| visible_text(&caps[2]));
                " ".to_string()
            } else {
                caps[0].to_string()
            }
        });
        let name = visible_text(&without_badge);
        if name.is_empty() {
            return None;
        }

        let spreadsheet_id = self
            .spreadsheet_attr
            .as_deref()
            .or(badge.as_deref())
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or_default();

        Some(SectionSummary {
            id,
            name,
            spreadsheet_id,
        })
    }
}

fn attribute(attrs: &str, name: &str) -> Option<String> {
    ATTRIBUTE.captures_iter(attrs).find_map(|caps| {
        if !caps[1].eq_ignore_ascii_case(name) {
            return None;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        Some(decode_entities(value))
    })
}

fn has_class(attrs: &str, class: &str) -> bool {
    attribute(attrs, "class")
        .is_some_and(|value| value.split_ascii_whitespace().any(|token| token == class))
}

fn visible_text(markup: &str) -> String {
    let stripped = ANY_TAG.replace_all(markup, " ");
    let decoded = decode_entities(&stripped).replace('\u{a0}', " ");
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"
        <div class="horizontal-section-list">
          <div class="section-pill" data-section-id="12">
            <a href="/dashboard/Q1%20Reports" class="section-link">
              Q1 Reports
              <span class="badge bg-secondary ms-2">3</span>
            </a>
          </div>
          <div class="section-pill active" data-section-id='7'>
            <a href="/dashboard/R%26D" class="section-link">R&amp;D <span class="badge">4</span></a>
          </div>
        </div>
    "#;

    #[test]
    fn pills_are_parsed_in_document_order() {
        let sections = parse_sections(FRAGMENT);
        assert_eq!(
            sections,
            vec![
                SectionSummary {
                    id: 12,
                    name: "Q1 Reports".to_string(),
                    spreadsheet_id: 3,
                },
                SectionSummary {
                    id: 7,
                    name: "R&D".to_string(),
                    spreadsheet_id: 4,
                },
            ]
        );
    }

    #[test]
    fn explicit_spreadsheet_attribute_wins_over_badge() {
        let html = r#"<div data-spreadsheet-id="9" class="section-pill" data-section-id="1"><a>Docs <span class="badge">2</span></a></div>"#;
        let sections = parse_sections(html);
        assert_eq!(sections[0].spreadsheet_id, 9);
    }

    #[test]
    fn elements_without_id_or_class_are_ignored() {
        let html = r#"
            <div class="section-pill"><a>No id</a></div>
            <div class="section-pill-wrapper" data-section-id="3"><a>Wrong class</a></div>
            <div class="section-pill" data-section-id="abc"><a>Bad id</a></div>
            <div class="section-pill" data-section-id="5"><a>Kept</a></div>
        "#;
        let sections = parse_sections(html);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, 5);
        assert_eq!(sections[0].spreadsheet_id, 0);
    }

    #[test]
    fn pill_without_anchor_uses_its_own_text() {
        let html = r#"<li class="section-pill" data-section-id="2">Plain <b>name</b></li>"#;
        assert_eq!(parse_sections(html)[0].name, "Plain name");
    }

    #[test]
    fn empty_fragment_yields_nothing() {
        assert!(parse_sections("").is_empty());
        assert!(parse_sections("<p>No sections yet</p>").is_empty());
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(
            decode_entities("a &lt;b&gt; &#39;c&#x27; &quot;d&quot; &bogus;"),
            "a <b> 'c' \"d\" &bogus;"
        );
    }
}
