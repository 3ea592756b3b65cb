//! Shop records and the inputs the shop service accepts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};

/// Opaque numeric shop identifier owned by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopId(u64);

/// Error returned when a path segment does not name a shop id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("shop id must be a positive integer, got {raw:?}")]
pub struct ShopIdParseError {
    raw: String,
}

impl ShopId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ShopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ShopId {
    type Err = ShopIdParseError;

    /// Parse a decimal path segment such as `"42"`.
    ///
    /// # Examples
    /// ```
    /// use shops::domain::ShopId;
    ///
    /// assert_eq!("42".parse::<ShopId>().map(ShopId::get), Ok(42));
    /// assert!("+42".parse::<ShopId>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ShopIdParseError { raw: s.to_owned() });
        }
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| ShopIdParseError { raw: s.to_owned() })
    }
}

/// Flat snapshot of a shop, decoupled from its persistence representation.
///
/// Serialises as `{"id": 1, "title": "...", "url": "...", "created_at": "<RFC 3339>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    id: ShopId,
    title: String,
    url: String,
    created_at: DateTime<Utc>,
}

impl Shop {
    /// Assemble a snapshot.
    pub fn new(
        id: ShopId,
        title: impl Into<String>,
        url: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            created_at,
        }
    }

    /// Shop identifier.
    pub fn id(&self) -> ShopId {
        self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Storefront URL as entered.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy of this snapshot with `changes` applied; `None` fields keep
    /// their current value.
    pub fn with_changes(&self, changes: &ShopChanges) -> Self {
        Self {
            id: self.id,
            title: changes.title.clone().unwrap_or_else(|| self.title.clone()),
            url: changes.url.clone().unwrap_or_else(|| self.url.clone()),
            created_at: self.created_at,
        }
    }
}

/// Values for a new shop. Both fields are required by the create form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopDraft {
    /// Display title.
    pub title: String,
    /// Storefront URL.
    pub url: String,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopChanges {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement URL.
    pub url: Option<String>,
}

/// Listing request: optional free-text search plus the page to return.
///
/// ## Invariants
/// - `search` is trimmed; blank input is treated as no search.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
/// use shops::domain::ShopListQuery;
///
/// let query = ShopListQuery::new(Some("   ".into()), PageRequest::default());
/// assert_eq!(query.search(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopListQuery {
    search: Option<String>,
    page: PageRequest,
}

impl ShopListQuery {
    /// Build a query, normalising the search text.
    pub fn new(search: Option<String>, page: PageRequest) -> Self {
        let search = search
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        Self { search, page }
    }

    /// Search text, passed to the service as given.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Requested page.
    pub fn page(&self) -> PageRequest {
        self.page
    }
}
