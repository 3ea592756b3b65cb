//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use pagination::DEFAULT_PER_PAGE;

use crate::domain::ports::{LoginService, ShopPolicy, ShopService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub shops: Arc<dyn ShopService>,
    pub policy: Arc<dyn ShopPolicy>,
    /// Page size used when a listing request omits `per_page`.
    pub default_per_page: u32,
}

impl HttpState {
    /// Construct state with the default page size.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use shops::domain::ports::{FixtureLoginService, FixtureShopPolicy};
    /// use shops::inbound::http::state::HttpState;
    /// use shops::outbound::memory::InMemoryShopService;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(InMemoryShopService::default()),
    ///     Arc::new(FixtureShopPolicy),
    /// )
    /// .with_default_per_page(25);
    /// assert_eq!(state.default_per_page, 25);
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        shops: Arc<dyn ShopService>,
        policy: Arc<dyn ShopPolicy>,
    ) -> Self {
        Self {
            login,
            shops,
            policy,
            default_per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Override the default page size.
    #[must_use]
    pub fn with_default_per_page(mut self, per_page: u32) -> Self {
        self.default_per_page = per_page;
        self
    }
}
