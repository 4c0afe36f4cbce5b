use std::path::Path;

use anyhow::Context;
use futures_util::future::{Either, select};
use futures_util::pin_mut;
use sheetlinks_api_models::UploadResponse;
use sheetlinks_client::validate::{check_upload_file_name, check_upload_size};
use sheetlinks_client::{
    CancelToken, ClientResult, DashboardApi, PROGRESS_POLL_INTERVAL, PollOutcome, UploadPayload,
    ValidationError, poll_progress,
};

use crate::cli::{OutputFormat, ProgressArgs, UploadArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::output::{format_progress, format_progress_update, format_upload, render};

pub(crate) async fn handle_upload(
    ctx: &AppContext,
    args: UploadArgs,
    output: OutputFormat,
) -> CliResult<()> {
    let payload = load_payload(&args.path, args.max_upload_bytes).await?;
    let file_name = payload.file_name.clone();

    let response = if args.watch {
        upload_with_progress(ctx, payload, output).await?
    } else {
        ctx.api.upload(payload).await?
    };

    tracing::info!(file = %file_name, stored = ?response.filename, "upload accepted");
    render(&response, output, format_upload)
}

/// Apply the name and size checks, then read the file.
async fn load_payload(path: &Path, max_bytes: u64) -> CliResult<UploadPayload> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string);
    check_upload_file_name(file_name.as_deref())?;
    let file_name = file_name.ok_or(ValidationError::NoFileSelected)?;

    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
        .map_err(CliError::failure)?;
    check_upload_size(metadata.len(), max_bytes)?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))
        .map_err(CliError::failure)?;
    Ok(UploadPayload::new(file_name, bytes))
}

/// Send the upload while printing server-reported progress to stderr.
///
/// The poller stops as soon as the request settles.
async fn upload_with_progress(
    ctx: &AppContext,
    payload: UploadPayload,
    output: OutputFormat,
) -> ClientResult<UploadResponse> {
    let token = CancelToken::new();
    let request = ctx.api.upload(payload);
    let poller = poll_progress(
        &ctx.api,
        &ctx.timer,
        &token,
        PROGRESS_POLL_INTERVAL,
        |progress| eprintln!("{}", format_progress_update(progress, output)),
    );
    pin_mut!(request, poller);

    let response = match select(request, poller).await {
        Either::Left((response, _poller)) => response,
        Either::Right((_outcome, request)) => request.await,
    };
    token.cancel();
    response
}

pub(crate) async fn handle_progress(
    ctx: &AppContext,
    args: ProgressArgs,
    output: OutputFormat,
) -> CliResult<()> {
    if !args.watch {
        let progress = ctx.api.fetch_progress().await?;
        return render(&progress, output, format_progress);
    }

    let token = CancelToken::new();
    let poller = poll_progress(
        &ctx.api,
        &ctx.timer,
        &token,
        PROGRESS_POLL_INTERVAL,
        |progress| println!("{}", format_progress_update(progress, output)),
    );
    let outcome = tokio::select! {
        outcome = poller => outcome,
        _ = tokio::signal::ctrl_c() => {
            token.cancel();
            PollOutcome::Cancelled
        }
    };

    match outcome {
        PollOutcome::Completed(_) => Ok(()),
        PollOutcome::Cancelled => {
            eprintln!("stopped watching");
            Ok(())
        }
        PollOutcome::Failed(err) => Err(err.into()),
    }
}
