//! Shop administration backend: session-authenticated CRUD pages over a
//! pluggable shop service.
//!
//! - [`domain`] holds shop records, caller identity and the driving ports.
//! - [`inbound::http`] is the actix-web adapter: authorization, the error
//!   taxonomy and page responses.
//! - [`outbound`] provides the in-memory shop service.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use middleware::Trace;
