//! Listing filter sets for each resource kind.
//!
//! Values are forwarded to the upstream API verbatim apart from trimming;
//! blank values are treated as absent and never sent as `field=`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A set of optional listing filters with API-defined parameter names.
pub trait FilterSet: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Every filter field in API order, paired with its raw value.
    fn fields(&self) -> Vec<(&'static str, Option<&str>)>;

    /// Query parameters to send: trimmed, non-blank values only, in API order.
    ///
    /// # Examples
    /// ```
    /// use multiverse::domain::{CharacterFilters, FilterSet};
    ///
    /// let filters = CharacterFilters {
    ///     name: Some("  rick ".to_owned()),
    ///     species: Some("   ".to_owned()),
    ///     ..CharacterFilters::default()
    /// };
    /// assert_eq!(filters.query_pairs(), vec![("name", "rick".to_owned())]);
    /// ```
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.fields()
            .into_iter()
            .filter_map(|(name, value)| {
                let trimmed = value?.trim();
                (!trimmed.is_empty()).then(|| (name, trimmed.to_owned()))
            })
            .collect()
    }

    /// Whether no filter would be sent.
    fn is_blank(&self) -> bool {
        self.query_pairs().is_empty()
    }
}

/// Filters accepted by `GET /character`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterFilters {
    /// Substring match on the character name.
    pub name: Option<String>,
    /// `alive`, `dead` or `unknown`.
    pub status: Option<String>,
    /// Species, e.g. `Human`.
    pub species: Option<String>,
    /// Subspecies or type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// `female`, `male`, `genderless` or `unknown`.
    pub gender: Option<String>,
}

impl FilterSet for CharacterFilters {
    fn fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("name", self.name.as_deref()),
            ("status", self.status.as_deref()),
            ("species", self.species.as_deref()),
            ("type", self.kind.as_deref()),
            ("gender", self.gender.as_deref()),
        ]
    }
}

/// Filters accepted by `GET /location`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFilters {
    /// Substring match on the location name.
    pub name: Option<String>,
    /// Location type, e.g. `Planet`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Dimension the location belongs to.
    pub dimension: Option<String>,
}

impl FilterSet for LocationFilters {
    fn fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("name", self.name.as_deref()),
            ("type", self.kind.as_deref()),
            ("dimension", self.dimension.as_deref()),
        ]
    }
}

/// Filters accepted by `GET /episode`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeFilters {
    /// Substring match on the episode name.
    pub name: Option<String>,
    /// Episode code, e.g. `S01` or `S01E03`.
    pub episode: Option<String>,
}

impl FilterSet for EpisodeFilters {
    fn fields(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("name", self.name.as_deref()),
            ("episode", self.episode.as_deref()),
        ]
    }
}
