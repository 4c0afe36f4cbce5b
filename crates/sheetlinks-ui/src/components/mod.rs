pub(crate) mod links;
pub(crate) mod sections;
pub(crate) mod stats;
pub(crate) mod toast;
pub(crate) mod upload;
