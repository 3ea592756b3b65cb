//! HTTP inbound adapter: session-authenticated shop pages plus login and
//! health probes.

pub mod error;
pub mod health;
pub mod page;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod shops;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;
