use sheetlinks_client::DashboardApi;
use sheetlinks_client::validate::{check_link_url, link_request};

use crate::cli::{AddLinkArgs, OutputFormat};
use crate::client::{AppContext, CliResult};
use crate::output::{format_link, render};

pub(crate) async fn handle_add_link(
    ctx: &AppContext,
    args: AddLinkArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let request = link_request(&args.section_id, &args.title, &args.url, &args.status)?;
    check_link_url(&request.url)?;
    let link = ctx.api.add_link(&request).await?;
    tracing::info!(section_id = %request.section_id, title = %link.title, "link added");
    render(&link, output, format_link)
}
