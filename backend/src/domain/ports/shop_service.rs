//! Driving port for shop persistence use-cases.
//!
//! The service owns storage, search, and field-level validation of shop
//! values. It knows nothing about callers or permissions; authorisation is
//! enforced before any of these methods run.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{FieldErrors, Shop, ShopChanges, ShopDraft, ShopId, ShopListQuery};

use super::define_port_error;

define_port_error! {
    /// Failures a shop service may report.
    ///
    /// Each variant maps to a distinct HTTP outcome at the inbound boundary.
    pub enum ShopServiceError {
        /// No shop exists for the identifier.
        NotFound { id: ShopId } => "shop {id} not found",
        /// Submitted values failed field-level checks.
        ValidationFailed { errors: FieldErrors } => "shop values failed validation",
        /// The shop could not be created.
        NotCreated { message: String } => "shop not created: {message}",
        /// The shop could not be updated.
        NotUpdated { message: String } => "shop not updated: {message}",
        /// The shop could not be deleted.
        NotDeleted { message: String } => "shop not deleted: {message}",
    }
}

/// Domain use-case port for shop records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopService: Send + Sync {
    /// Return the page of shops matching `query`, ordered by id.
    ///
    /// Unknown search terms yield an empty page rather than an error.
    async fn list(&self, query: &ShopListQuery) -> Page<Shop>;

    /// Fetch a single shop.
    async fn get_by_id(&self, id: ShopId) -> Result<Shop, ShopServiceError>;

    /// Persist a new shop and return it with its assigned id.
    async fn create(&self, draft: ShopDraft) -> Result<Shop, ShopServiceError>;

    /// Apply `changes` to an existing shop.
    async fn update(&self, id: ShopId, changes: ShopChanges) -> Result<Shop, ShopServiceError>;

    /// Remove a shop.
    async fn delete(&self, id: ShopId) -> Result<(), ShopServiceError>;
}
