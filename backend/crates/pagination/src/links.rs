//! Navigation links between pages.

use serde::Serialize;
use url::Url;

use crate::page::PageMeta;

const PAGE_PARAM: &str = "page";

/// Absolute URLs for the pages around the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    /// URL of page one.
    pub first: String,
    /// URL of the last page.
    pub last: String,
    /// URL of the preceding page, absent on page one.
    pub prev: Option<String>,
    /// URL of the following page, absent on the last page.
    pub next: Option<String>,
}

impl PageLinks {
    /// Derive links for `meta`, rewriting only the `page` query parameter of
    /// `base`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageLinks, PageMeta, PageRequest};
    /// use url::Url;
    ///
    /// let base = Url::parse("https://shops.test/shops?q=acme").expect("valid url");
    /// let meta = PageMeta::new(PageRequest::new(1, 10).expect("valid"), 25);
    /// let links = PageLinks::for_meta(&meta, &base);
    ///
    /// assert_eq!(links.next.as_deref(), Some("https://shops.test/shops?q=acme&page=2"));
    /// assert_eq!(links.prev, None);
    /// ```
    #[must_use]
    pub fn for_meta(meta: &PageMeta, base: &Url) -> Self {
        let current = meta.current_page();
        let last = meta.last_page();
        Self {
            first: page_url(base, 1),
            last: page_url(base, last),
            prev: (current > 1).then(|| page_url(base, current - 1)),
            next: (current < last).then(|| page_url(base, current + 1)),
        }
    }
}

fn page_url(base: &Url, page: u32) -> String {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(PAGE_PARAM, &page.to_string());
    url.into()
}
