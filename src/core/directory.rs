use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::NaiveDateTime;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::aggregator::RatingStats;
use crate::core::genre::GenreMatchMode;
use crate::core::primitives::{
    case_insensitive_cmp, contains_case_insensitive, parse_calendar_date, parse_time_of_day,
};
use crate::core::timeline::resolve_interval;
use crate::core::types::{Artist, FestivalDay, Performance, RecordId, Review, Venue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DirectorySort {
    #[default]
    Name,
    /// Highest popularity first, name as tie-break.
    Popularity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryQuery {
    pub search_term: Option<String>,
    pub genre: Option<String>,
    pub country: Option<String>,
    pub sort: DirectorySort,
    pub genre_match: GenreMatchMode,
}

impl Default for DirectoryQuery {
    fn default() -> Self {
        Self {
            search_term: None,
            genre: None,
            country: None,
            sort: DirectorySort::Name,
            genre_match: GenreMatchMode::Contains,
        }
    }
}

impl DirectoryQuery {
    fn accepts(&self, artist: &Artist) -> bool {
        let name_ok = self
            .search_term
            .as_deref()
            .is_none_or(|term| contains_case_insensitive(&artist.name, term.trim()));
        let genre_ok = self
            .genre
            .as_deref()
            .filter(|genre| !genre.is_empty())
            .is_none_or(|genre| self.genre_match.matches(genre, &artist.genres, &artist.genre));
        let country_ok = self
            .country
            .as_deref()
            .is_none_or(|country| contains_case_insensitive(&artist.country, country.trim()));
        name_ok && genre_ok && country_ok
    }
}

/// Filters and sorts the artist list for the management overview.
#[must_use]
pub fn filter_directory(artists: &[Artist], query: &DirectoryQuery) -> Vec<Artist> {
    let mut listed: Vec<Artist> = artists
        .iter()
        .filter(|artist| query.accepts(artist))
        .cloned()
        .collect();
    match query.sort {
        DirectorySort::Name => listed.sort_by(|a, b| case_insensitive_cmp(&a.name, &b.name)),
        DirectorySort::Popularity => listed.sort_by(|a, b| {
            OrderedFloat(b.popularity)
                .cmp(&OrderedFloat(a.popularity))
                .then_with(|| case_insensitive_cmp(&a.name, &b.name))
        }),
    }
    listed
}

/// One set of an artist's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSet {
    pub performance_id: Option<RecordId>,
    pub venue_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistProfile {
    pub artist: Artist,
    /// Mean of the numeric ratings only.
    pub avg_rating: f64,
    /// Reviews with a numeric rating; `reviews` may hold more.
    pub review_count: usize,
    /// Newest first.
    pub reviews: Vec<Review>,
    /// Festival date, then start time.
    pub schedule: Vec<ScheduledSet>,
}

/// Collects the detail view for one artist.
#[must_use]
pub fn build_profile(
    artist: &Artist,
    reviews: &[Review],
    performances: &[Performance],
    venues: &[Venue],
    festival_days: &[FestivalDay],
) -> ArtistProfile {
    let mut stats = RatingStats::default();
    let mut artist_reviews: Vec<Review> = reviews
        .iter()
        .filter(|review| review.artist_id == artist.id)
        .inspect(|review| {
            // A stored 0 marks a non-numeric rating; the detail view leaves it out.
            if review.rating > 0.0 {
                stats.push(review.rating);
            }
        })
        .cloned()
        .collect();
    artist_reviews.sort_by_key(|review| Reverse(review.date_key()));

    let venues_by_id: HashMap<RecordId, &Venue> = venues.iter().map(|v| (v.id, v)).collect();
    let days_by_id: HashMap<RecordId, &FestivalDay> =
        festival_days.iter().map(|d| (d.id, d)).collect();

    let mut schedule: Vec<ScheduledSet> = performances
        .iter()
        .filter(|performance| performance.artist_id == artist.id)
        .filter_map(|performance| {
            let venue = venues_by_id.get(&performance.venue_id)?;
            let day = days_by_id.get(&performance.festival_day_id)?;
            let date = parse_calendar_date(&day.date, "date").ok()?;
            let start_time = parse_time_of_day(&performance.start_time, "start_time").ok()?;
            let end_time = parse_time_of_day(&performance.end_time, "end_time").ok()?;
            let (start, end) = resolve_interval(date, start_time, end_time)?;
            Some(ScheduledSet {
                performance_id: performance.id,
                venue_name: venue.name.clone(),
                date: day.date.clone(),
                start_time: performance.start_time.clone(),
                end_time: performance.end_time.clone(),
                start,
                end,
            })
        })
        .collect();
    schedule.sort_by_key(|set| set.start);

    debug!(
        artist_id = artist.id,
        reviews = artist_reviews.len(),
        sets = schedule.len(),
        "build artist profile"
    );

    ArtistProfile {
        artist: artist.clone(),
        avg_rating: stats.average(),
        review_count: stats.count,
        reviews: artist_reviews,
        schedule,
    }
}
