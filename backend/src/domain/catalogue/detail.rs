//! Detail views: one entity plus its resolved cross-references.

use serde::Serialize;
use tracing::warn;

use super::{CatalogueError, CatalogueService};
use crate::domain::{Character, EntityId, Episode, Location, Resource, SeasonEpisode};

/// Most characters resolved for one episode.
pub const EPISODE_CHARACTER_CAP: usize = 40;
/// Most residents resolved for one location.
pub const LOCATION_RESIDENT_CAP: usize = 20;

/// Whether a cross-reference section could be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionStatus {
    /// The batch request succeeded.
    Loaded,
    /// The batch request failed; no entities are shown.
    Unavailable,
}

/// Resolved cross-references of a parent entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrossReferences<T> {
    /// Number of references on the parent, before capping.
    pub total: usize,
    /// Number of references asked for after capping.
    pub requested: usize,
    /// Resolved entities, at most the cap, in upstream order.
    pub items: Vec<T>,
    /// Resolution outcome.
    pub status: SectionStatus,
}

impl<T> CrossReferences<T> {
    fn loaded(total: usize, requested: usize, items: Vec<T>) -> Self {
        Self {
            total,
            requested,
            items,
            status: SectionStatus::Loaded,
        }
    }

    fn unavailable(total: usize, requested: usize) -> Self {
        Self {
            total,
            requested,
            items: Vec::new(),
            status: SectionStatus::Unavailable,
        }
    }

    /// Whether the cap left references unrequested.
    ///
    /// Unresolvable references that upstream silently drops from a batch do
    /// not count; only the cap truncates.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.status == SectionStatus::Loaded && self.total > self.requested
    }
}

/// A character with every episode it appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterDetail {
    /// The character.
    pub character: Character,
    /// Episodes the character appears in.
    pub episodes: CrossReferences<Episode>,
}

/// A location with its first residents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationDetail {
    /// The location.
    pub location: Location,
    /// Up to [`LOCATION_RESIDENT_CAP`] residents.
    pub residents: CrossReferences<Character>,
}

/// An episode with its first characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeDetail {
    /// The episode.
    pub episode: Episode,
    /// Parsed season and episode numbers, when the code matches `SxxEyy`.
    pub season_episode: Option<SeasonEpisode>,
    /// Up to [`EPISODE_CHARACTER_CAP`] characters.
    pub characters: CrossReferences<Character>,
}

impl CatalogueService {
    async fn cross_references<R: Resource>(
        &self,
        urls: &[String],
        cap: Option<usize>,
    ) -> CrossReferences<R> {
        let total = urls.len();
        let wanted = cap.and_then(|cap| urls.get(..cap)).unwrap_or(urls);
        let requested = wanted.len();
        match self.resolve_many::<R>(wanted).await {
            Ok(items) => CrossReferences::loaded(total, requested, items),
            Err(err) => {
                warn!(kind = %R::KIND, error = %err, "cross-references unavailable");
                CrossReferences::unavailable(total, requested)
            }
        }
    }

    /// Character detail with all of its episodes.
    pub async fn character_detail(&self, id: EntityId) -> Result<CharacterDetail, CatalogueError> {
        let character: Character = self.fetch_one(id).await?;
        let episodes = self.cross_references(&character.episode, None).await;
        Ok(CharacterDetail {
            character,
            episodes,
        })
    }

    /// Location detail with up to [`LOCATION_RESIDENT_CAP`] residents.
    pub async fn location_detail(&self, id: EntityId) -> Result<LocationDetail, CatalogueError> {
        let location: Location = self.fetch_one(id).await?;
        let residents = self
            .cross_references(&location.residents, Some(LOCATION_RESIDENT_CAP))
            .await;
        Ok(LocationDetail {
            location,
            residents,
        })
    }

    /// Episode detail with up to [`EPISODE_CHARACTER_CAP`] characters.
    pub async fn episode_detail(&self, id: EntityId) -> Result<EpisodeDetail, CatalogueError> {
        let episode: Episode = self.fetch_one(id).await?;
        let characters = self
            .cross_references(&episode.characters, Some(EPISODE_CHARACTER_CAP))
            .await;
        Ok(EpisodeDetail {
            season_episode: episode.season_episode(),
            episode,
            characters,
        })
    }
}
