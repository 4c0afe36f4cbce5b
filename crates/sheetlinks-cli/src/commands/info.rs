use sheetlinks_client::DashboardApi;
use sheetlinks_client::messages::STATUS_LOAD_FAILED;

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{format_stats, format_statuses, render};

pub(crate) async fn handle_statuses(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let statuses = ctx
        .api
        .fetch_statuses()
        .await
        .map_err(|err| CliError::from_client(err, STATUS_LOAD_FAILED))?;
    render(statuses.as_slice(), output, format_statuses)
}

pub(crate) async fn handle_stats(ctx: &AppContext, output: OutputFormat) -> CliResult<()> {
    let stats = ctx.api.fetch_stats().await?;
    render(&stats, output, format_stats)
}
