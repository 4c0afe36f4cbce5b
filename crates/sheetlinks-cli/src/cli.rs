//! Argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sheetlinks_telemetry::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, command_span, init_logging};
use tracing::Instrument;
use url::Url;

use crate::client::{AppContext, CliResult, TRACE_ID_LEN, parse_url, random_string};
use crate::commands::info::{handle_stats, handle_statuses};
use crate::commands::links::handle_add_link;
use crate::commands::sections::{handle_create_section, handle_sections};
use crate::commands::upload::{handle_progress, handle_upload};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Server-side upload cap (10 MiB).
pub(crate) const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Parses CLI arguments, installs logging, and executes the requested command.
/// Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.unwrap_or_else(LogFormat::infer),
        build_sha: option_env!("SHEETLINKS_BUILD_SHA").unwrap_or(env!("CARGO_PKG_VERSION")),
    };
    if let Err(err) = init_logging(&logging) {
        eprintln!("warning: logging disabled: {err}");
    }

    let trace_id = random_string(TRACE_ID_LEN);
    let span = command_span(command_label(&cli.command), &trace_id);
    let result = execute(cli, &trace_id).instrument(span).await;

    match result {
        Ok(()) => 0,
        Err(err) => {
            let exit_code = err.exit_code();
            let message = err.display_message();
            tracing::debug!(exit_code, error = %message, "command failed");
            eprintln!("error: {message}");
            exit_code
        }
    }
}

async fn execute(cli: Cli, trace_id: &str) -> CliResult<()> {
    let ctx = AppContext::from_cli(&cli, trace_id)?;
    dispatch(&ctx, cli.command, cli.output).await
}

async fn dispatch(
    ctx: &AppContext,
    command: Command,
    output: OutputFormat,
) -> CliResult<()> {
    match command {
        Command::Upload(args) => handle_upload(ctx, args, output).await,
        Command::Sections => handle_sections(ctx, output).await,
        Command::CreateSection(args) => handle_create_section(ctx, args, output).await,
        Command::AddLink(args) => handle_add_link(ctx, args, output).await,
        Command::Statuses => handle_statuses(ctx, output).await,
        Command::Progress(args) => handle_progress(ctx, args, output).await,
        Command::Stats => handle_stats(ctx, output).await,
    }
}

#[derive(Parser)]
#[command(name = "sheetlinks", about = "Command-line client for a SheetLinks dashboard")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "SHEETLINKS_BASE_URL",
        value_parser = parse_url,
        default_value = DEFAULT_BASE_URL
    )]
    pub(crate) base_url: Url,
    #[arg(
        long,
        global = true,
        env = "SHEETLINKS_SESSION_COOKIE",
        hide_env_values = true,
        help = "Raw Cookie header carrying the login session"
    )]
    pub(crate) session_cookie: Option<String>,
    #[arg(long, global = true, env = "SHEETLINKS_CSRF_TOKEN", hide_env_values = true)]
    pub(crate) csrf_token: Option<String>,
    #[arg(
        long,
        global = true,
        env = "SHEETLINKS_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = "SHEETLINKS_LOG_LEVEL",
        default_value = DEFAULT_LOG_LEVEL
    )]
    pub(crate) log_level: String,
    #[arg(
        long,
        global = true,
        env = "SHEETLINKS_LOG_FORMAT",
        value_parser = parse_log_format,
        help = "Log output format (pretty or json); inferred from the build when unset"
    )]
    pub(crate) log_format: Option<LogFormat>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Upload a spreadsheet (csv, xls, xlsx).
    Upload(UploadArgs),
    /// List sections as the dashboard shows them.
    Sections,
    /// Create a section in a spreadsheet.
    CreateSection(CreateSectionArgs),
    /// Add a link to a section.
    AddLink(AddLinkArgs),
    /// List the status labels links may carry.
    Statuses,
    /// Show upload progress.
    Progress(ProgressArgs),
    /// Show dashboard counters.
    Stats,
}

#[derive(Args, Debug)]
pub(crate) struct UploadArgs {
    /// Spreadsheet to upload.
    pub(crate) path: PathBuf,
    /// Print server-reported progress while the upload runs.
    #[arg(long)]
    pub(crate) watch: bool,
    #[arg(
        long,
        env = "SHEETLINKS_MAX_UPLOAD_BYTES",
        default_value_t = DEFAULT_MAX_UPLOAD_BYTES
    )]
    pub(crate) max_upload_bytes: u64,
}

#[derive(Args, Debug)]
pub(crate) struct CreateSectionArgs {
    #[arg(long)]
    pub(crate) spreadsheet_id: String,
    #[arg(long)]
    pub(crate) name: String,
}

#[derive(Args, Debug)]
pub(crate) struct AddLinkArgs {
    #[arg(long)]
    pub(crate) section_id: String,
    #[arg(long)]
    pub(crate) title: String,
    #[arg(long)]
    pub(crate) url: String,
    #[arg(long)]
    pub(crate) status: String,
}

#[derive(Args, Debug)]
pub(crate) struct ProgressArgs {
    /// Keep polling until the server reports 100% or Ctrl-C.
    #[arg(long)]
    pub(crate) watch: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

pub(crate) const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Upload(_) => "upload",
        Command::Sections => "sections",
        Command::CreateSection(_) => "create_section",
        Command::AddLink(_) => "add_link",
        Command::Statuses => "statuses",
        Command::Progress(_) => "progress",
        Command::Stats => "stats",
    }
}

fn parse_log_format(input: &str) -> Result<LogFormat, String> {
    input.parse::<LogFormat>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let cli = Cli::try_parse_from(["sheetlinks", "stats"]).expect("parse");
        assert_eq!(cli.base_url.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cli.output, OutputFormat::Table);
        assert!(cli.session_cookie.is_none());
        assert_eq!(command_label(&cli.command), "stats");
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "sheetlinks",
            "upload",
            "report.xlsx",
            "--watch",
            "--format",
            "json",
            "--log-format",
            "json",
            "--base-url",
            "https://links.example",
        ])
        .expect("parse");
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert_eq!(cli.base_url.host_str(), Some("links.example"));
        match cli.command {
            Command::Upload(args) => {
                assert_eq!(args.path, PathBuf::from("report.xlsx"));
                assert!(args.watch);
                assert_eq!(args.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn add_link_requires_every_field() {
        assert!(
            Cli::try_parse_from(["sheetlinks", "add-link", "--section-id", "1", "--title", "x"])
                .is_err()
        );
        let cli = Cli::try_parse_from([
            "sheetlinks",
            "add-link",
            "--section-id",
            "1",
            "--title",
            "Wiki",
            "--url",
            "https://wiki.example",
            "--status",
            "active",
        ])
        .expect("parse");
        assert_eq!(command_label(&cli.command), "add_link");
    }

    #[test]
    fn bad_values_are_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["sheetlinks", "--base-url", "nope", "stats"]).is_err());
        assert!(Cli::try_parse_from(["sheetlinks", "--log-format", "xml", "stats"]).is_err());
        assert!(Cli::try_parse_from(["sheetlinks", "--output", "yaml", "stats"]).is_err());
    }
}
