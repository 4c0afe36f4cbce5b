#![forbid(unsafe_code)]
#![deny(unused_must_use, rustdoc::broken_intra_doc_links, rustdoc::bare_urls)]
#![warn(
    missing_docs,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]
//! Client layer for the SheetLinks dashboard endpoints.
//!
//! # Design
//! - One `DashboardApi` trait sits in front of every endpoint so the browser
//!   workflows, the CLI and the tests share the same call surface.
//! - Response interpretation is transport-free: both transports reduce a reply
//!   to a `RawResponse` and hand it to `interpret`.
//! - Futures are `?Send`; the browser is single-threaded and the CLI drives
//!   everything from one task.

pub mod api;
pub mod config;
pub mod error;
pub mod fragment;
pub mod interpret;
pub mod messages;
pub mod poll;
pub mod validate;

#[cfg(target_arch = "wasm32")]
pub mod browser;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api::{DashboardApi, UploadPayload};
pub use config::AppUrls;
pub use error::{ClientError, ClientResult, ValidationError};
pub use poll::{CancelToken, PROGRESS_POLL_INTERVAL, PollOutcome, Timer, poll_progress};

#[cfg(target_arch = "wasm32")]
pub use browser::{BrowserDashboardClient, GlooTimer};
#[cfg(not(target_arch = "wasm32"))]
pub use http::{HttpDashboardClient, HttpOptions, TokioTimer};
