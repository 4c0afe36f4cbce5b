//! Core, DOM-free primitives and helpers for the dashboard UI.
pub mod dom;
pub mod logic;
pub mod report;
pub mod store;
pub mod toast;
