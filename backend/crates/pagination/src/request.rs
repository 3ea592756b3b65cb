//! Validated page-number requests.

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 15;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page numbers start at one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// The requested page size is outside `1..=max`.
    #[error("per_page must be between 1 and {max}, got {per_page}")]
    PerPageOutOfRange {
        /// Page size the caller asked for.
        per_page: u32,
        /// Largest accepted page size.
        max: u32,
    },
}

/// A one-based page number plus page size.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= per_page <= MAX_PER_PAGE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Validate and build a request.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either bound is violated.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, PageRequestError};
    ///
    /// assert!(PageRequest::new(1, 15).is_ok());
    /// assert_eq!(PageRequest::new(0, 15), Err(PageRequestError::ZeroPage));
    /// ```
    pub const fn new(page: u32, per_page: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(PageRequestError::PerPageOutOfRange {
                per_page,
                max: MAX_PER_PAGE,
            });
        }
        Ok(Self { page, per_page })
    }

    /// Build a request from optional query values, falling back to page one
    /// and `default_per_page`.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when a supplied value (or the default) is
    /// out of range.
    pub fn from_parts(
        page: Option<u32>,
        per_page: Option<u32>,
        default_per_page: u32,
    ) -> Result<Self, PageRequestError> {
        Self::new(page.unwrap_or(1), per_page.unwrap_or(default_per_page))
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn per_page(self) -> u32 {
        self.per_page
    }

    /// Number of items preceding this page in the full collection.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}
