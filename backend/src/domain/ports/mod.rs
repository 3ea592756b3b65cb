//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod shop_policy;
mod shop_service;

pub use login_service::{FIXTURE_ADMIN_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use shop_policy::MockShopPolicy;
pub use shop_policy::{FixtureShopPolicy, ShopAction, ShopPolicy};
#[cfg(test)]
pub use shop_service::MockShopService;
pub use shop_service::{ShopService, ShopServiceError};
