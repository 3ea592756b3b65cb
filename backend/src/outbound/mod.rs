//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local shop storage used until a database is wired
//!
//! Adapters translate between domain types and their storage representation
//! and carry no HTTP concerns.

pub mod memory;
