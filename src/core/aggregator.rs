use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{date_sort_key, round_to};
use crate::core::types::{PopularityScore, RecordId, Review};

/// Running rating totals for one artist.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingStats {
    pub sum: f64,
    pub count: usize,
}

impl RatingStats {
    pub fn push(&mut self, rating: f64) {
        self.sum += rating;
        self.count += 1;
    }

    /// Mean rating rounded to one decimal; `0` without reviews.
    #[must_use]
    pub fn average(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        round_to(self.sum / self.count as f64, 1)
    }
}

/// One dated sample of a time series.
///
/// `date_key` is unix milliseconds, `0` for unparsable dates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSample {
    pub date_key: i64,
    pub value: f64,
}

impl SeriesSample {
    #[must_use]
    pub fn new(date_key: i64, value: f64) -> Self {
        Self { date_key, value }
    }

    #[must_use]
    pub fn dated(date: &str, value: f64) -> Self {
        Self::new(date_sort_key(date), value)
    }
}

pub type SeriesByArtist = IndexMap<RecordId, Vec<SeriesSample>>;

/// Sums and counts ratings per artist, in first-seen artist order.
#[must_use]
pub fn build_rating_stats(reviews: &[Review]) -> IndexMap<RecordId, RatingStats> {
    let mut stats: IndexMap<RecordId, RatingStats> = IndexMap::new();
    for review in reviews {
        stats.entry(review.artist_id).or_default().push(review.rating);
    }
    stats
}

/// Groups popularity samples per artist, keeping source order within each artist.
#[must_use]
pub fn build_popularity_series(scores: &[PopularityScore]) -> SeriesByArtist {
    let mut series = SeriesByArtist::new();
    for score in scores {
        series
            .entry(score.artist_id)
            .or_default()
            .push(SeriesSample::dated(&score.date, score.score));
    }
    series
}

/// Groups dated ratings per artist; input to the rating-mode trend fallback.
#[must_use]
pub fn build_rating_series(reviews: &[Review]) -> SeriesByArtist {
    let mut series = SeriesByArtist::new();
    for review in reviews {
        series
            .entry(review.artist_id)
            .or_default()
            .push(SeriesSample::new(review.date_key(), review.rating));
    }
    series
}
