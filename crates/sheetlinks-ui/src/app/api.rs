//! Shared dashboard client context.
//!
//! # Design
//! - Exactly one client per page mount; components compare contexts by
//!   pointer so re-renders never rebuild it.

use std::rc::Rc;

use sheetlinks_client::{AppUrls, BrowserDashboardClient};

/// Dashboard client handed to workflows.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    /// Singleton client instance.
    pub client: Rc<BrowserDashboardClient>,
}

impl ApiCtx {
    /// Context for the page's endpoint set.
    pub(crate) fn new(urls: AppUrls) -> Self {
        Self {
            client: Rc::new(BrowserDashboardClient::new(urls)),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
