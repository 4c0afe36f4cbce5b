use sheetlinks_client::fragment::parse_sections;
use sheetlinks_client::messages::section_failure;
use sheetlinks_client::validate::section_request;
use sheetlinks_client::{DashboardApi, Timer};

use crate::cli::{CreateSectionArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{format_section, format_sections, render};

pub(crate) async fn handle_sections(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let html = ctx
        .api
        .fetch_sections_fragment(ctx.timer.now_ms())
        .await?;
    let sections = parse_sections(&html);
    tracing::debug!(count = sections.len(), "sections parsed");
    render(sections.as_slice(), output, format_sections)
}

pub(crate) async fn handle_create_section(
    ctx: &AppContext,
    args: CreateSectionArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let request = section_request(&args.spreadsheet_id, &args.name)?;
    let section = ctx.api.create_section(&request).await.map_err(|err| {
        let message = section_failure(&err);
        CliError::from_client(err, message)
    })?;
    tracing::info!(section_id = section.id, name = %section.name, "section created");
    render(&section, output, format_section)
}
