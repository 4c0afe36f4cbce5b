//! Page workflows, one module per user-facing flow.
//!
//! # Design
//! - Each workflow catches failures at its own boundary, reports them and
//!   turns them into toasts; nothing propagates to the caller as a panic.
//! - Network access goes through [`sheetlinks_client::DashboardApi`] only.

pub mod bootstrap;
pub mod links;
pub mod refresh;
pub mod sections;
pub mod status;
pub mod upload;
