//! Command handlers grouped by concern.

pub(crate) mod info;
pub(crate) mod links;
pub(crate) mod sections;
pub(crate) mod upload;
