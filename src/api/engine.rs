use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{
    Artist, ArtistProfile, DirectoryQuery, FestivalDay, FromRecord, LeaderboardEntry, Performance,
    PopularityScore, RankQuery, Record, RecordId, Review, TimelineRow, Venue, build_leaderboard,
    build_profile, build_rows_filtered, decode_all, filter_directory, rank,
};
use crate::error::AnalyticsResult;

use super::{
    AnalyticsConfig, Collection, CollectionRequest, FetchedCollections, RecordSource,
    fetch_collections,
};

const LEADERBOARD_INPUTS: [Collection; 3] = [
    Collection::Artists,
    Collection::Reviews,
    Collection::PopularityScores,
];

const TIMELINE_INPUTS: [Collection; 4] = [
    Collection::Performances,
    Collection::Venues,
    Collection::Artists,
    Collection::FestivalDays,
];

/// Decoded records from the last successful fetch of each collection.
#[derive(Debug, Clone, Default)]
pub struct RecordSnapshot {
    pub artists: Arc<Vec<Artist>>,
    pub reviews: Arc<Vec<Review>>,
    pub popularity_scores: Arc<Vec<PopularityScore>>,
    pub performances: Arc<Vec<Performance>>,
    pub venues: Arc<Vec<Venue>>,
    pub festival_days: Arc<Vec<FestivalDay>>,
}

impl RecordSnapshot {
    /// Copy of `self` with every fetched collection replaced.
    fn merged(&self, fetched: &FetchedCollections) -> Self {
        let mut next = self.clone();
        for (collection, records) in fetched {
            let name = collection.as_str();
            match collection {
                Collection::Artists => next.artists = decoded(name, records),
                Collection::Reviews => next.reviews = decoded(name, records),
                Collection::PopularityScores => next.popularity_scores = decoded(name, records),
                Collection::Performances => next.performances = decoded(name, records),
                Collection::Venues => next.venues = decoded(name, records),
                Collection::FestivalDays => next.festival_days = decoded(name, records),
            }
        }
        next
    }
}

fn decoded<T: FromRecord>(collection: &str, records: &[Record]) -> Arc<Vec<T>> {
    Arc::new(decode_all(collection, records))
}

/// Everything the caller keeps between refreshes.
///
/// Each successful refresh builds a new value and swaps it in whole, so a
/// consumer holding the `Arc`s from an earlier state keeps a consistent view.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsState {
    pub records: RecordSnapshot,
    /// Unranked entries, one per artist.
    pub leaderboard: Arc<Vec<LeaderboardEntry>>,
    pub timeline: Arc<Vec<TimelineRow>>,
}

/// Facade owning the record source, configuration and derived views.
pub struct FestivalAnalytics<S: RecordSource> {
    source: S,
    config: AnalyticsConfig,
    state: AnalyticsState,
}

impl<S: RecordSource> FestivalAnalytics<S> {
    pub fn new(source: S, config: AnalyticsConfig) -> AnalyticsResult<Self> {
        config.validate()?;
        Ok(Self {
            source,
            config,
            state: AnalyticsState::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Replaces the configuration and rebuilds the views from the kept records.
    pub fn set_config(&mut self, config: AnalyticsConfig) -> AnalyticsResult<()> {
        config.validate()?;
        self.config = config;
        let records = self.state.records.clone();
        self.state = self.derive(records, true, true);
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> &AnalyticsState {
        &self.state
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    #[must_use]
    pub fn into_source(self) -> S {
        self.source
    }

    pub async fn refresh_leaderboard(&mut self) -> AnalyticsResult<()> {
        self.refresh(&LEADERBOARD_INPUTS).await
    }

    pub async fn refresh_timeline(&mut self) -> AnalyticsResult<()> {
        self.refresh(&TIMELINE_INPUTS).await
    }

    pub async fn refresh_all(&mut self) -> AnalyticsResult<()> {
        self.refresh(&Collection::ALL).await
    }

    /// Fetches `collections` in one join and rebuilds the affected views.
    ///
    /// Collections are fetched whole. The timeline filter narrows only the
    /// timeline rows, so profiles still see every set of an artist.
    ///
    /// On failure nothing is touched: the previous records and views stay
    /// in place and the aggregate error is returned.
    pub async fn refresh(&mut self, collections: &[Collection]) -> AnalyticsResult<()> {
        let requests: Vec<CollectionRequest> = collections
            .iter()
            .map(|&collection| {
                CollectionRequest::new(collection).optional(self.config.is_optional(collection))
            })
            .collect();

        let fetched = match fetch_collections(&self.source, &requests).await {
            Ok(fetched) => fetched,
            Err(err) => {
                warn!(error = %err, "refresh failed, previous view retained");
                return Err(err);
            }
        };

        let touches = |inputs: &[Collection]| inputs.iter().any(|c| fetched.contains_key(c));
        let rebuild_leaderboard = touches(&LEADERBOARD_INPUTS);
        let rebuild_timeline = touches(&TIMELINE_INPUTS);
        let records = self.state.records.merged(&fetched);
        self.state = self.derive(records, rebuild_leaderboard, rebuild_timeline);
        debug!(rebuild_leaderboard, rebuild_timeline, "refresh applied");
        Ok(())
    }

    fn derive(
        &self,
        records: RecordSnapshot,
        rebuild_leaderboard: bool,
        rebuild_timeline: bool,
    ) -> AnalyticsState {
        let leaderboard = if rebuild_leaderboard {
            Arc::new(build_leaderboard(
                &records.artists,
                &records.reviews,
                &records.popularity_scores,
                self.config.trend_tuning,
            ))
        } else {
            Arc::clone(&self.state.leaderboard)
        };
        let timeline = if rebuild_timeline {
            Arc::new(build_rows_filtered(
                &records.performances,
                &records.venues,
                &records.artists,
                &records.festival_days,
                self.config.timeline_filter,
            ))
        } else {
            Arc::clone(&self.state.timeline)
        };
        AnalyticsState {
            records,
            leaderboard,
            timeline,
        }
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<Vec<LeaderboardEntry>> {
        Arc::clone(&self.state.leaderboard)
    }

    /// Filtered, sorted and ranked copy of the current leaderboard.
    #[must_use]
    pub fn ranked_leaderboard(&self, query: &RankQuery) -> Vec<LeaderboardEntry> {
        rank(&self.state.leaderboard, query)
    }

    /// Ranked leaderboard using the configured defaults.
    #[must_use]
    pub fn default_ranking(&self) -> Vec<LeaderboardEntry> {
        self.ranked_leaderboard(&self.config.rank_query())
    }

    #[must_use]
    pub fn timeline(&self) -> Arc<Vec<TimelineRow>> {
        Arc::clone(&self.state.timeline)
    }

    #[must_use]
    pub fn directory(&self, query: &DirectoryQuery) -> Vec<Artist> {
        filter_directory(&self.state.records.artists, query)
    }

    #[must_use]
    pub fn profile(&self, artist_id: RecordId) -> Option<ArtistProfile> {
        let records = &self.state.records;
        let artist = records.artists.iter().find(|a| a.id == artist_id)?;
        Some(build_profile(
            artist,
            &records.reviews,
            &records.performances,
            &records.venues,
            &records.festival_days,
        ))
    }
}
