//! Paginated response envelope.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::PageNumber;

/// Paging metadata reported alongside one page of results.
///
/// `next` and `prev` are fully qualified URLs of the neighbouring pages, or
/// `None` at either end of the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of matching records across all pages.
    pub count: u32,
    /// Total number of pages.
    pub pages: u32,
    /// URL of the next page, when one exists.
    pub next: Option<String>,
    /// URL of the previous page, when one exists.
    pub prev: Option<String>,
}

impl PageInfo {
    /// Page number encoded in the `next` link, if any.
    ///
    /// Links without a parseable `page` query parameter yield `None`.
    #[must_use]
    pub fn next_page(&self) -> Option<PageNumber> {
        self.next.as_deref().and_then(page_from_link)
    }

    /// Page number encoded in the `prev` link, if any.
    #[must_use]
    pub fn prev_page(&self) -> Option<PageNumber> {
        self.prev.as_deref().and_then(page_from_link)
    }
}

fn page_from_link(link: &str) -> Option<PageNumber> {
    let url = Url::parse(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

/// One page of results plus its paging metadata.
///
/// # Examples
/// ```
/// use pagination::Page;
///
/// let page: Page<u32> = Page::empty();
/// assert_eq!(page.info.count, 0);
/// assert!(page.results.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Paging metadata.
    pub info: PageInfo,
    /// Records on this page, in upstream order.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// The zero-result envelope: no records, no pages, no links.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            info: PageInfo::default(),
            results: Vec::new(),
        }
    }

    /// Whether the listing matched nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.info.count == 0 && self.results.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}
