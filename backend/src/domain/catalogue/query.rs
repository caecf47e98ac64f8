//! Pure URL construction for upstream catalogue requests.

use std::fmt;

use pagination::PageNumber;
use url::Url;

use crate::domain::{EntityId, FilterSet, ResourceKind};

/// Public upstream API root.
pub const DEFAULT_API_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Errors raised when validating a [`CatalogueBaseUrl`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueBaseUrlError {
    /// The value is not a URL.
    #[error("catalogue base url is invalid: {message}")]
    Invalid {
        /// Parser message.
        message: String,
    },
    /// The URL cannot carry path segments (e.g. `mailto:`).
    #[error("catalogue base url cannot be a base: {raw}")]
    NotABase {
        /// Rejected URL.
        raw: String,
    },
}

/// Root URL that collection paths are appended to.
///
/// ## Invariants
/// - Accepts path segments, so appending a collection name cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueBaseUrl(Url);

impl CatalogueBaseUrl {
    /// Validate an already parsed URL.
    pub fn new(url: Url) -> Result<Self, CatalogueBaseUrlError> {
        if url.cannot_be_a_base() {
            return Err(CatalogueBaseUrlError::NotABase {
                raw: url.to_string(),
            });
        }
        Ok(Self(url))
    }

    /// Parse and validate a base URL.
    pub fn parse(raw: &str) -> Result<Self, CatalogueBaseUrlError> {
        let url = Url::parse(raw.trim()).map_err(|err| CatalogueBaseUrlError::Invalid {
            message: err.to_string(),
        })?;
        Self::new(url)
    }

    /// Borrow the underlying URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    fn collection(&self, kind: ResourceKind) -> Url {
        let mut url = self.0.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(kind.path_segment());
        }
        url
    }
}

impl fmt::Display for CatalogueBaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Listing URL: `page` first, then each non-blank filter in API order.
///
/// Filter values are trimmed and otherwise forwarded verbatim.
///
/// # Examples
/// ```
/// use multiverse::domain::catalogue::{CatalogueBaseUrl, build_url};
/// use multiverse::domain::{CharacterFilters, ResourceKind};
/// use pagination::PageNumber;
///
/// let base = CatalogueBaseUrl::parse("https://rickandmortyapi.com/api").unwrap();
/// let filters = CharacterFilters { name: Some("rick".into()), ..Default::default() };
/// let url = build_url(&base, ResourceKind::Character, PageNumber::new(3).unwrap(), &filters);
/// assert_eq!(url.as_str(), "https://rickandmortyapi.com/api/character?page=3&name=rick");
/// ```
pub fn build_url<F: FilterSet>(
    base: &CatalogueBaseUrl,
    kind: ResourceKind,
    page: PageNumber,
    filters: &F,
) -> Url {
    let mut url = base.collection(kind);
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("page", &page.to_string());
        for (name, value) in filters.query_pairs() {
            query.append_pair(name, &value);
        }
    }
    url
}

/// URL of a single entity.
pub fn entity_url(base: &CatalogueBaseUrl, kind: ResourceKind, id: EntityId) -> Url {
    let mut url = base.collection(kind);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(&id.to_string());
    }
    url
}

/// URL fetching several entities at once, or `None` when `ids` is empty.
pub fn batch_url(base: &CatalogueBaseUrl, kind: ResourceKind, ids: &[EntityId]) -> Option<Url> {
    if ids.is_empty() {
        return None;
    }
    let joined = ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let mut url = base.collection(kind);
    if let Ok(mut segments) = url.path_segments_mut() {
        segments.push(&joined);
    }
    Some(url)
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{CharacterFilters, EpisodeFilters, LocationFilters};
    use rstest::{fixture, rstest};

    #[fixture]
    fn base() -> CatalogueBaseUrl {
        CatalogueBaseUrl::parse(DEFAULT_API_BASE_URL).expect("default base url")
    }

    fn page(n: u32) -> PageNumber {
        PageNumber::new(n).expect("page")
    }

    #[rstest]
    fn page_comes_first_and_blank_filters_are_dropped(base: CatalogueBaseUrl) {
        let filters = CharacterFilters {
            name: Some("rick".to_owned()),
            status: Some("  ".to_owned()),
            ..CharacterFilters::default()
        };
        let url = build_url(&base, ResourceKind::Character, page(3), &filters);
        assert_eq!(
            url.as_str(),
            "https://rickandmortyapi.com/api/character?page=3&name=rick"
        );
    }

    #[rstest]
    fn values_are_trimmed_and_encoded(base: CatalogueBaseUrl) {
        let filters = LocationFilters {
            name: Some(" Citadel of Ricks ".to_owned()),
            kind: None,
            dimension: Some("unknown".to_owned()),
        };
        let url = build_url(&base, ResourceKind::Location, page(1), &filters);
        assert_eq!(
            url.as_str(),
            "https://rickandmortyapi.com/api/location?page=1&name=Citadel+of+Ricks&dimension=unknown"
        );
    }

    #[rstest]
    #[case("https://example.test/api")]
    #[case("https://example.test/api/")]
    #[case("https://example.test/api/?stale=1#frag")]
    fn base_variants_produce_same_collection(#[case] raw: &str) {
        let base = CatalogueBaseUrl::parse(raw).expect("base");
        let url = build_url(&base, ResourceKind::Episode, page(2), &EpisodeFilters::default());
        assert_eq!(url.as_str(), "https://example.test/api/episode?page=2");
    }

    #[rstest]
    fn entity_and_batch_urls(base: CatalogueBaseUrl) {
        let id = |n| EntityId::new(n).expect("id");
        assert_eq!(
            entity_url(&base, ResourceKind::Character, id(7)).as_str(),
            "https://rickandmortyapi.com/api/character/7"
        );
        assert_eq!(
            batch_url(&base, ResourceKind::Character, &[id(1), id(2), id(38)])
                .expect("batch")
                .as_str(),
            "https://rickandmortyapi.com/api/character/1,2,38"
        );
        assert!(batch_url(&base, ResourceKind::Character, &[]).is_none());
    }

    #[rstest]
    #[case("not a url")]
    #[case("mailto:rick@citadel.test")]
    fn rejects_unusable_base_urls(#[case] raw: &str) {
        assert!(CatalogueBaseUrl::parse(raw).is_err());
    }
}
