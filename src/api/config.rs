use serde::{Deserialize, Serialize};

use crate::core::{GenreMatchMode, RankQuery, SortKey, TimelineFilter, TrendTuning};
use crate::error::{AnalyticsError, AnalyticsResult};

use super::Collection;

/// Host-facing analytics configuration.
///
/// Serializable so back offices can keep it next to their other settings;
/// every field has a default, so partial JSON documents load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub trend_tuning: TrendTuning,
    pub genre_match: GenreMatchMode,
    pub default_sort_key: SortKey,
    /// Collections whose fetch failure degrades to an empty set.
    pub optional_collections: Vec<Collection>,
    pub timeline_filter: TimelineFilter,
}

impl AnalyticsConfig {
    pub fn validate(&self) -> AnalyticsResult<()> {
        self.trend_tuning.validate()?;
        if self.optional_collections.contains(&Collection::Artists) {
            return Err(AnalyticsError::InvalidConfig(
                "artists collection cannot be optional".to_owned(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_trend_tuning(mut self, tuning: TrendTuning) -> Self {
        self.trend_tuning = tuning;
        self
    }

    #[must_use]
    pub fn with_genre_match(mut self, mode: GenreMatchMode) -> Self {
        self.genre_match = mode;
        self
    }

    #[must_use]
    pub fn with_default_sort_key(mut self, sort_key: SortKey) -> Self {
        self.default_sort_key = sort_key;
        self
    }

    #[must_use]
    pub fn with_optional_collection(mut self, collection: Collection) -> Self {
        if !self.optional_collections.contains(&collection) {
            self.optional_collections.push(collection);
        }
        self
    }

    #[must_use]
    pub fn with_timeline_filter(mut self, filter: TimelineFilter) -> Self {
        self.timeline_filter = filter;
        self
    }

    #[must_use]
    pub fn is_optional(&self, collection: Collection) -> bool {
        self.optional_collections.contains(&collection)
    }

    /// Leaderboard query seeded with the configured sort key and genre mode.
    #[must_use]
    pub fn rank_query(&self) -> RankQuery {
        RankQuery::default()
            .with_sort_key(self.default_sort_key)
            .with_genre_match(self.genre_match)
    }

    pub fn from_json_str(input: &str) -> AnalyticsResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            AnalyticsError::InvalidConfig(format!("failed to parse analytics config: {e}"))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> AnalyticsResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AnalyticsError::InvalidConfig(format!("failed to serialize analytics config: {e}"))
        })
    }
}
