//! Episode records as served by `GET /episode`, plus episode-code parsing.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{EntityId, EpisodeFilters, Resource, ResourceKind};

/// One episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Numeric identifier.
    pub id: EntityId,
    /// Title.
    pub name: String,
    /// Air date as printed by the upstream, e.g. `December 2, 2013`.
    pub air_date: String,
    /// Episode code, e.g. `S01E01`.
    pub episode: String,
    /// URLs of the characters appearing in the episode.
    pub characters: Vec<String>,
    /// Canonical URL.
    pub url: String,
    /// Creation time in the upstream database.
    pub created: DateTime<Utc>,
}

impl Episode {
    /// Season and episode numbers parsed from [`Episode::episode`].
    #[must_use]
    pub fn season_episode(&self) -> Option<SeasonEpisode> {
        SeasonEpisode::parse(&self.episode)
    }
}

impl Resource for Episode {
    const KIND: ResourceKind = ResourceKind::Episode;
    type Filters = EpisodeFilters;
}

/// Season and episode numbers extracted from an `SxxEyy` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonEpisode {
    /// Season number.
    pub season: u32,
    /// Episode number within the season.
    pub episode: u32,
}

static EPISODE_CODE_RE: OnceLock<Regex> = OnceLock::new();

fn episode_code_regex() -> &'static Regex {
    EPISODE_CODE_RE.get_or_init(|| {
        // Unanchored: the code may be embedded in a longer label.
        let pattern = r"S(\d+)E(\d+)";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("episode code regex failed to compile: {error}"))
    })
}

impl SeasonEpisode {
    /// Parse the first `S<digits>E<digits>` occurrence in `code`.
    ///
    /// Codes that do not match, or whose numbers overflow, yield `None`;
    /// callers then show the raw code only.
    ///
    /// # Examples
    /// ```
    /// use multiverse::domain::SeasonEpisode;
    ///
    /// let parsed = SeasonEpisode::parse("S03E07").unwrap();
    /// assert_eq!((parsed.season, parsed.episode), (3, 7));
    /// assert!(SeasonEpisode::parse("Pilot").is_none());
    /// ```
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        let captures = episode_code_regex().captures(code)?;
        let season = captures.get(1)?.as_str().parse().ok()?;
        let episode = captures.get(2)?.as_str().parse().ok()?;
        Some(Self { season, episode })
    }
}
