use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::aggregator::{build_popularity_series, build_rating_series, build_rating_stats};
use crate::core::genre::GenreMatchMode;
use crate::core::primitives::{case_insensitive_cmp, contains_case_insensitive};
use crate::core::trend::{TrendMode, TrendPoint, TrendTuning, sample_tuned};
use crate::core::types::{Artist, PopularityScore, RecordId, Review};

/// One leaderboard row: rating statistics plus a trend sparkline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub artist_id: RecordId,
    pub name: String,
    /// Raw comma-separated genre text.
    pub genre: String,
    pub genres: Vec<String>,
    pub country: String,
    pub avg_rating: f64,
    pub review_count: usize,
    /// 1-based position from the last [`rank`] call; `0` before ranking.
    pub rank: usize,
    pub trend_points: Vec<TrendPoint>,
    pub trend_min: f64,
    pub trend_max: f64,
    /// `Score` when popularity samples drove the trend, `Rating` for the review fallback.
    pub trend_mode: TrendMode,
}

/// Primary numeric sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortKey {
    #[default]
    #[serde(rename = "avgRating")]
    AvgRating,
    #[serde(rename = "reviewCount")]
    ReviewCount,
}

impl SortKey {
    /// Parses the wire name; unknown keys fall back to `AvgRating`.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "reviewCount" => Self::ReviewCount,
            _ => Self::AvgRating,
        }
    }

    #[must_use]
    pub fn as_key(self) -> &'static str {
        match self {
            Self::AvgRating => "avgRating",
            Self::ReviewCount => "reviewCount",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RankQuery {
    pub search_term: Option<String>,
    pub genre_filter: Option<String>,
    pub sort_key: SortKey,
    pub genre_match: GenreMatchMode,
}

impl RankQuery {
    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    #[must_use]
    pub fn with_genre_filter(mut self, genre: impl Into<String>) -> Self {
        self.genre_filter = Some(genre.into());
        self
    }

    #[must_use]
    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    #[must_use]
    pub fn with_genre_match(mut self, mode: GenreMatchMode) -> Self {
        self.genre_match = mode;
        self
    }

    fn accepts(&self, entry: &LeaderboardEntry) -> bool {
        if let Some(genre) = self.genre_filter.as_deref().filter(|g| !g.is_empty()) {
            if !self.genre_match.matches(genre, &entry.genres, &entry.genre) {
                return false;
            }
        }
        match self.search_term.as_deref().map(str::trim) {
            Some(term) => contains_case_insensitive(&entry.name, term),
            None => true,
        }
    }
}

/// Builds one unranked entry per artist.
///
/// The trend uses popularity samples when the artist has any; otherwise it
/// falls back to the running mean of the artist's review ratings.
#[must_use]
pub fn build_leaderboard(
    artists: &[Artist],
    reviews: &[Review],
    scores: &[PopularityScore],
    tuning: TrendTuning,
) -> Vec<LeaderboardEntry> {
    let stats = build_rating_stats(reviews);
    let popularity = build_popularity_series(scores);
    let ratings = build_rating_series(reviews);
    debug!(
        artists = artists.len(),
        rated_artists = stats.len(),
        scored_artists = popularity.len(),
        "build leaderboard"
    );

    artists
        .iter()
        .map(|artist| {
            let artist_stats = stats.get(&artist.id).copied().unwrap_or_default();
            let (trend, trend_mode) = match popularity.get(&artist.id).filter(|s| !s.is_empty()) {
                Some(series) => (sample_tuned(series, TrendMode::Score, tuning), TrendMode::Score),
                None => {
                    let series = ratings.get(&artist.id).map_or(&[][..], Vec::as_slice);
                    (sample_tuned(series, TrendMode::Rating, tuning), TrendMode::Rating)
                }
            };

            LeaderboardEntry {
                artist_id: artist.id,
                name: artist.name.clone(),
                genre: artist.genre.clone(),
                genres: artist.genres.clone(),
                country: artist.country.clone(),
                avg_rating: artist_stats.average(),
                review_count: artist_stats.count,
                rank: 0,
                trend_points: trend.points,
                trend_min: trend.axis_min,
                trend_max: trend.axis_max,
                trend_mode,
            }
        })
        .collect()
}

/// Filters and orders entries, assigning 1-based ranks to the result.
///
/// Unreviewed entries always trail reviewed ones. Within each group the
/// query's sort key is compared first, the other numeric field second and
/// the case-insensitive name last; remaining ties keep input order.
#[must_use]
pub fn rank(entries: &[LeaderboardEntry], query: &RankQuery) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<LeaderboardEntry> = entries
        .iter()
        .filter(|entry| query.accepts(entry))
        .cloned()
        .collect();
    ranked.sort_by(|a, b| compare_entries(a, b, query.sort_key));
    for (idx, entry) in ranked.iter_mut().enumerate() {
        entry.rank = idx + 1;
    }
    debug!(
        total = entries.len(),
        ranked = ranked.len(),
        sort_key = query.sort_key.as_key(),
        "rank leaderboard"
    );
    ranked
}

fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry, sort_key: SortKey) -> Ordering {
    let by_rating = || OrderedFloat(b.avg_rating).cmp(&OrderedFloat(a.avg_rating));
    let by_count = || b.review_count.cmp(&a.review_count);

    (a.review_count == 0)
        .cmp(&(b.review_count == 0))
        .then_with(|| match sort_key {
            SortKey::AvgRating => by_rating().then_with(by_count),
            SortKey::ReviewCount => by_count().then_with(by_rating),
        })
        .then_with(|| case_insensitive_cmp(&a.name, &b.name))
}
