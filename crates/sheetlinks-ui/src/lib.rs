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
#![allow(clippy::multiple_crate_versions)]
//! SheetLinks dashboard front end.
//!
//! # Design
//! - All page state lives in one yewdux [`core::store::DashboardStore`];
//!   components are render functions of it.
//! - Workflows (upload, section and link creation, refreshes, status loading)
//!   are DOM-free and generic over the client traits, so they run natively in
//!   tests with fakes.
//! - Yew components and browser glue compile only for `wasm32`.

pub mod core;
pub mod features;
pub mod models;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;
