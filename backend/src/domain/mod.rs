//! Domain primitives and driving ports.
//!
//! Purpose: define strongly typed shop entities, caller identity and the
//! transport-agnostic error payload used by the HTTP adapter. Keep types
//! immutable and document invariants and serialisation contracts (serde) in
//! each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Shop, ShopId, ShopDraft, ShopChanges, ShopListQuery: shop records and
//!   the inputs the shop service accepts.
//! - FieldErrors: field name to messages mapping for form feedback.
//! - Caller, LoginCredentials, UserId: who is acting.
//! - TraceId: request correlation identifier.

pub mod auth;
pub mod error;
pub mod field_errors;
pub mod ports;
pub mod shop;
pub mod trace_id;
pub mod user;

pub use self::auth::{Caller, LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::field_errors::FieldErrors;
pub use self::shop::{Shop, ShopChanges, ShopDraft, ShopId, ShopIdParseError, ShopListQuery};
pub use self::trace_id::TraceId;
pub use self::user::{UserId, UserValidationError};

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";
