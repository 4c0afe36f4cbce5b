//! Shared context, error types, and trace helpers for the CLI.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use rand::{Rng, distr::Alphanumeric};
use reqwest::header::{HeaderMap, HeaderValue};
use sheetlinks_client::{
    AppUrls, ClientError, HttpDashboardClient, HttpOptions, TokioTimer, ValidationError,
};
use url::Url;

use crate::cli::Cli;

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";
/// Length of the per-invocation trace identifier.
pub(crate) const TRACE_ID_LEN: usize = 16;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    /// Classify a client error, showing `message` instead of the error's own
    /// text.
    pub(crate) fn from_client(error: ClientError, message: impl Into<String>) -> Self {
        let message = message.into();
        if is_rejection(&error) {
            Self::Validation(message)
        } else {
            Self::Failure(anyhow::Error::new(error).context(message))
        }
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ValidationError> for CliError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl From<ClientError> for CliError {
    fn from(error: ClientError) -> Self {
        if is_rejection(&error) {
            Self::Validation(error.to_string())
        } else {
            Self::Failure(anyhow::Error::new(error))
        }
    }
}

/// The server (or the pre-flight checks) refused the input itself.
fn is_rejection(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::Validation(_) | ClientError::PayloadTooLarge
    ) || matches!(error.status(), Some(400 | 409 | 422))
}

/// Application context passed to command handlers.
#[derive(Debug, Clone)]
pub(crate) struct AppContext {
    pub(crate) api: HttpDashboardClient,
    pub(crate) timer: TokioTimer,
}

impl AppContext {
    /// Build the dashboard client from global flags.
    pub(crate) fn from_cli(cli: &Cli, trace_id: &str) -> CliResult<Self> {
        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(trace_id).map_err(|_| {
            CliError::failure(anyhow!("trace identifier contains invalid characters"))
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let urls = AppUrls::default().with_csrf_token(cli.csrf_token.clone());
        let options = HttpOptions {
            timeout: Duration::from_secs(cli.timeout),
            session_cookie: cli.session_cookie.clone(),
            default_headers,
        };
        let api = HttpDashboardClient::new(cli.base_url.clone(), urls, options)
            .map_err(|err| CliError::failure(anyhow!("failed to build dashboard client: {err}")))?;
        Ok(Self {
            api,
            timer: TokioTimer,
        })
    }
}

/// Parse the server URL provided to the CLI.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Generate a random alphanumeric string of the requested length.
#[must_use]
pub(crate) fn random_string(len: usize) -> String {
    let mut rng = rand::rng();
    std::iter::repeat_with(|| rng.sample(Alphanumeric) as char)
        .take(len)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use anyhow::Result;
    use httpmock::MockServer;

    pub(crate) fn context_for(server: &MockServer) -> Result<AppContext> {
        let base = server
            .base_url()
            .parse()
            .map_err(|_| anyhow!("valid URL"))?;
        let api = HttpDashboardClient::new(base, AppUrls::default(), HttpOptions::default())?;
        Ok(AppContext {
            api,
            timer: TokioTimer,
        })
    }

    #[test]
    fn random_string_produces_expected_length() {
        let generated = random_string(TRACE_ID_LEN);
        assert_eq!(generated.len(), TRACE_ID_LEN);
        assert!(generated.chars().all(|ch| ch.is_ascii_alphanumeric()));
    }

    #[test]
    fn rejections_exit_with_validation_code() {
        let duplicate = CliError::from(ClientError::Server {
            status: 409,
            message: "exists".to_string(),
            code: None,
        });
        assert_eq!(duplicate.exit_code(), 2);
        assert_eq!(CliError::from(ClientError::PayloadTooLarge).exit_code(), 2);
        assert_eq!(
            CliError::from(ValidationError::LinkFieldsMissing).display_message(),
            "All fields are required"
        );

        let outage = CliError::from(ClientError::Status {
            status: 503,
            message: "HTTP error! status: 503".to_string(),
        });
        assert_eq!(outage.exit_code(), 3);
        assert_eq!(outage.display_message(), "HTTP error! status: 503");
    }

    #[test]
    fn from_client_replaces_message() {
        let err = CliError::from_client(
            ClientError::Transport("connection refused".to_string()),
            "Failed to create section",
        );
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.display_message(),
            "Failed to create section: Network error: connection refused"
        );
    }

    #[test]
    fn parse_url_rejects_garbage() {
        assert!(parse_url("http://127.0.0.1:5000").is_ok());
        assert!(parse_url("not a url").is_err());
    }
}
