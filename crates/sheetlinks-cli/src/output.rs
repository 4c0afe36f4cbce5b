//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use serde::Serialize;
use sheetlinks_api_models::{LinkView, QuickStats, SectionSummary, UploadProgress, UploadResponse};

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

/// Print `value` as pretty JSON or through the given table formatter.
pub(crate) fn render<T, F>(value: &T, format: OutputFormat, table: F) -> CliResult<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    let text = match format {
        OutputFormat::Json => to_json(value)?,
        OutputFormat::Table => table(value),
    };
    println!("{text}");
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))
}

pub(crate) fn format_sections(sections: &[SectionSummary]) -> String {
    if sections.is_empty() {
        return "no sections".to_string();
    }
    let mut out = format!("{:>6} {:>11} NAME", "ID", "SPREADSHEET");
    for section in sections {
        out.push_str(&format!(
            "\n{:>6} {:>11} {}",
            section.id, section.spreadsheet_id, section.name
        ));
    }
    out
}

pub(crate) fn format_section(section: &SectionSummary) -> String {
    format!(
        "created section {} '{}' in spreadsheet {}",
        section.id, section.name, section.spreadsheet_id
    )
}

pub(crate) fn format_link(link: &LinkView) -> String {
    format!("added [{}] {} -> {}", link.status, link.title, link.url)
}

pub(crate) fn format_statuses(statuses: &[String]) -> String {
    if statuses.is_empty() {
        "No statuses found".to_string()
    } else {
        statuses.join("\n")
    }
}

pub(crate) fn format_stats(stats: &QuickStats) -> String {
    let last_upload = stats.last_upload.map_or_else(
        || "never".to_string(),
        |value| value.format("%Y-%m-%d %H:%M").to_string(),
    );
    format!(
        "files: {}\nsections: {}\nlast upload: {last_upload}",
        stats.total_files, stats.total_sections
    )
}

pub(crate) fn format_progress(progress: &UploadProgress) -> String {
    let mut line = format!("{:>3}%", progress.percent());
    if !progress.status.is_empty() {
        line.push_str(&format!(" {}", progress.status));
    }
    if !progress.current_sheet.is_empty() {
        line.push_str(&format!(" [{}]", progress.current_sheet));
    }
    line
}

/// One line per poll update: compact JSON or the table line.
pub(crate) fn format_progress_update(progress: &UploadProgress, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string(progress).unwrap_or_else(|_| format_progress(progress))
        }
        OutputFormat::Table => format_progress(progress),
    }
}

pub(crate) fn format_upload(response: &UploadResponse) -> String {
    let message = if response.message.is_empty() {
        "upload complete"
    } else {
        response.message.as_str()
    };
    match &response.filename {
        Some(name) => format!("{message} ({name})"),
        None => message.to_string(),
    }
}
