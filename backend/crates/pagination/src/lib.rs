//! Page-number pagination primitives shared by backend endpoints.
//!
//! A [`PageRequest`] names the slice of an ordered collection a caller wants,
//! a [`Page`] carries the items of that slice together with [`PageMeta`], and
//! [`Page::project`] turns a page of domain records into a page of output
//! records without touching the metadata.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(2, 2).expect("valid request");
//! let page = Page::from_ordered(vec!["a", "b", "c", "d", "e"], request);
//! let upper = page.project(|item| item.to_uppercase());
//!
//! assert_eq!(upper.items(), ["C", "D"]);
//! assert_eq!(upper.meta(), page.meta());
//! assert_eq!(upper.meta().last_page(), 3);
//! ```

mod links;
mod page;
mod request;

pub use links::PageLinks;
pub use page::{Page, PageMeta};
pub use request::{DEFAULT_PER_PAGE, MAX_PER_PAGE, PageRequest, PageRequestError};
