//! Page envelope and metadata.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use url::Url;

use crate::links::PageLinks;
use crate::request::PageRequest;

/// Position of a page within the full ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageMeta {
    request: PageRequest,
    total: u64,
}

impl PageMeta {
    /// Describe `request` within a collection of `total` items.
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        Self { request, total }
    }

    /// One-based index of this page.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.request.page()
    }

    /// Requested page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.request.per_page()
    }

    /// Number of items in the full collection.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// The request this page answers.
    #[must_use]
    pub const fn request(&self) -> PageRequest {
        self.request
    }

    /// Index of the last page; an empty collection still has page one.
    #[must_use]
    pub fn last_page(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.per_page())).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Whether pages follow this one.
    #[must_use]
    pub fn has_more_pages(&self) -> bool {
        self.current_page() < self.last_page()
    }
}

/// Ordered items of one page plus its metadata.
///
/// ## Invariants
/// - `items` keeps the order the producer supplied.
/// - Projection never changes `meta` or `links`.
///
/// Serialises as `{"data": [...], "meta": {...}, "links": {...}}`, where
/// `links` is omitted until [`Page::with_links`] has been called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    meta: PageMeta,
    links: Option<PageLinks>,
}

impl<T> Page<T> {
    /// Wrap an already sliced set of items.
    #[must_use]
    pub const fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self {
            items,
            meta,
            links: None,
        }
    }

    /// A page with no items over an empty collection.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), PageMeta::new(request, 0))
    }

    /// Cut the page `request` names out of a full ordered collection.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let request = PageRequest::new(3, 2).expect("valid request");
    /// let page = Page::from_ordered(vec![1, 2, 3, 4, 5], request);
    /// assert_eq!(page.items(), [5]);
    /// assert_eq!(page.meta().total(), 5);
    /// ```
    #[must_use]
    pub fn from_ordered(ordered: Vec<T>, request: PageRequest) -> Self {
        let total = u64::try_from(ordered.len()).unwrap_or(u64::MAX);
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.per_page()).unwrap_or(usize::MAX);
        let items = ordered.into_iter().skip(skip).take(take).collect();
        Self::new(items, PageMeta::new(request, total))
    }

    /// Items on this page in producer order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Page metadata.
    #[must_use]
    pub const fn meta(&self) -> PageMeta {
        self.meta
    }

    /// Navigation links, when attached.
    #[must_use]
    pub const fn links(&self) -> Option<&PageLinks> {
        self.links.as_ref()
    }

    /// Number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consume the page, keeping only its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// One-based position of the first item on this page, if any.
    #[must_use]
    pub fn first_item(&self) -> Option<u64> {
        (!self.is_empty()).then(|| self.meta.request().offset() + 1)
    }

    /// One-based position of the last item on this page, if any.
    #[must_use]
    pub fn last_item(&self) -> Option<u64> {
        let len = u64::try_from(self.len()).unwrap_or(u64::MAX);
        (!self.is_empty()).then(|| self.meta.request().offset() + len)
    }

    /// Build a page of output records by applying `projection` to every
    /// item exactly once, leaving `self` untouched.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let page = Page::from_ordered(Vec::<u32>::new(), PageRequest::default());
    /// let projected = page.project(|n| n * 2);
    /// assert!(projected.is_empty());
    /// assert_eq!(projected.meta(), page.meta());
    /// ```
    #[must_use]
    pub fn project<U, F>(&self, projection: F) -> Page<U>
    where
        F: FnMut(&T) -> U,
    {
        Page {
            items: self.items.iter().map(projection).collect(),
            meta: self.meta,
            links: self.links.clone(),
        }
    }

    /// Consuming variant of [`Page::project`].
    #[must_use]
    pub fn map<U, F>(self, projection: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(projection).collect(),
            meta: self.meta,
            links: self.links,
        }
    }

    /// Attach first/last/prev/next links derived from `base`.
    ///
    /// `base` is normally the URL of the request that produced the page;
    /// its query string is kept apart from the `page` parameter.
    #[must_use]
    pub fn with_links(mut self, base: &Url) -> Self {
        self.links = Some(PageLinks::for_meta(&self.meta, base));
        self
    }
}

#[derive(serde::Serialize)]
struct MetaView {
    current_page: u32,
    per_page: u32,
    total: u64,
    last_page: u32,
    from: Option<u64>,
    to: Option<u64>,
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let meta = MetaView {
            current_page: self.meta.current_page(),
            per_page: self.meta.per_page(),
            total: self.meta.total(),
            last_page: self.meta.last_page(),
            from: self.first_item(),
            to: self.last_item(),
        };
        let mut state = serializer.serialize_struct("Page", 3)?;
        state.serialize_field("data", &self.items)?;
        state.serialize_field("meta", &meta)?;
        match &self.links {
            Some(links) => state.serialize_field("links", links)?,
            None => state.skip_field("links")?,
        }
        state.end()
    }
}
