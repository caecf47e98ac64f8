//! Resource kinds served by the upstream catalogue and their identifiers.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::filters::FilterSet;

/// The three entity collections exposed by the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// `/character`
    Character,
    /// `/location`
    Location,
    /// `/episode`
    Episode,
}

impl ResourceKind {
    /// Path segment of the collection endpoint.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Location => "location",
            Self::Episode => "episode",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Errors raised when parsing an [`EntityId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityIdError {
    /// The identifier was not a positive integer.
    #[error("entity id must be a positive integer, got {raw:?}")]
    Invalid {
        /// Raw text that failed to parse.
        raw: String,
    },
}

/// Numeric identifier of one upstream entity.
///
/// ## Invariants
/// - Always `>= 1`; the upstream numbers entities from one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u32);

impl EntityId {
    /// Validate and construct an identifier.
    pub fn new(raw: u32) -> Result<Self, EntityIdError> {
        if raw == 0 {
            return Err(EntityIdError::Invalid {
                raw: raw.to_string(),
            });
        }
        Ok(Self(raw))
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Extract the identifier from the trailing path segment of an entity URL.
    ///
    /// # Examples
    /// ```
    /// use multiverse::domain::EntityId;
    ///
    /// let id = EntityId::from_url("https://rickandmortyapi.com/api/character/5");
    /// assert_eq!(id.map(EntityId::get), Some(5));
    /// assert!(EntityId::from_url("https://rickandmortyapi.com/api/character/").is_none());
    /// ```
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        url.rsplit('/').next().and_then(|segment| segment.parse().ok())
    }
}

impl FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EntityIdError::Invalid { raw: s.to_owned() };
        let raw = s.trim().parse::<u32>().map_err(|_| invalid())?;
        Self::new(raw).map_err(|_| invalid())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An entity type served by one upstream collection.
///
/// Implementors tie a record type to its [`ResourceKind`] and its filter set
/// so the catalogue service can stay generic over all three collections.
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Collection this record belongs to.
    const KIND: ResourceKind;

    /// Filters accepted by the collection's listing endpoint.
    type Filters: FilterSet;
}
