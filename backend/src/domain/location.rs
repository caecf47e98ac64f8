//! Location records as served by `GET /location`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, LocationFilters, Resource, ResourceKind};

/// One location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Numeric identifier.
    pub id: EntityId,
    /// Name.
    pub name: String,
    /// Location type, e.g. `Planet`; may be empty.
    #[serde(rename = "type")]
    pub kind: String,
    /// Dimension; may be empty.
    pub dimension: String,
    /// URLs of the characters last seen here.
    pub residents: Vec<String>,
    /// Canonical URL.
    pub url: String,
    /// Creation time in the upstream database.
    pub created: DateTime<Utc>,
}

impl Resource for Location {
    const KIND: ResourceKind = ResourceKind::Location;
    type Filters = LocationFilters;
}
