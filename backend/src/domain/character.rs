//! Character records as served by `GET /character`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CharacterFilters, EntityId, Resource, ResourceKind};

/// Life status of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterStatus {
    /// `Alive`
    Alive,
    /// `Dead`
    Dead,
    /// `unknown`
    #[serde(rename = "unknown")]
    Unknown,
}

/// Gender of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// `Female`
    Female,
    /// `Male`
    Male,
    /// `Genderless`
    Genderless,
    /// `unknown`
    #[serde(rename = "unknown")]
    Unknown,
}

/// Named link to a location; `url` is empty when the location is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationLink {
    /// Display name, e.g. `Earth (C-137)` or `unknown`.
    pub name: String,
    /// Canonical location URL or an empty string.
    pub url: String,
}

/// One character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Numeric identifier.
    pub id: EntityId,
    /// Full name.
    pub name: String,
    /// Life status.
    pub status: CharacterStatus,
    /// Species.
    pub species: String,
    /// Subspecies or type; often empty.
    #[serde(rename = "type")]
    pub kind: String,
    /// Gender.
    pub gender: Gender,
    /// Place of origin.
    pub origin: LocationLink,
    /// Last known location.
    pub location: LocationLink,
    /// Avatar image URL.
    pub image: String,
    /// URLs of the episodes the character appears in.
    pub episode: Vec<String>,
    /// Canonical URL.
    pub url: String,
    /// Creation time in the upstream database.
    pub created: DateTime<Utc>,
}

impl Resource for Character {
    const KIND: ResourceKind = ResourceKind::Character;
    type Filters = CharacterFilters;
}
