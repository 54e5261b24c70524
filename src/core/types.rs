use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::genre::{display_genres, parse_genre_list};
use crate::core::primitives::{
    date_sort_key, number_or_zero, parse_id, parse_number, required_id, required_text,
    resolve_reference, text_field,
};
use crate::error::RecordError;

pub type RecordId = i64;

/// One raw record as delivered by a record source: field name to primitive value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Decoding from a raw [`Record`].
pub trait FromRecord: Sized {
    fn from_record(record: &Record) -> Result<Self, RecordError>;
}

/// Decodes every record of a collection, skipping the ones that fail.
#[must_use]
pub fn decode_all<T: FromRecord>(collection: &str, records: &[Record]) -> Vec<T> {
    let mut decoded = Vec::with_capacity(records.len());
    let mut skipped = 0_usize;
    for record in records {
        match T::from_record(record) {
            Ok(value) => decoded.push(value),
            Err(err) => {
                skipped += 1;
                debug!(collection, error = %err, "skipping malformed record");
            }
        }
    }
    if skipped > 0 {
        warn!(
            collection,
            skipped,
            decoded = decoded.len(),
            "skipped malformed records"
        );
    }
    decoded
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: RecordId,
    pub name: String,
    /// Raw comma-separated genre text.
    pub genre: String,
    pub genres: Vec<String>,
    pub country: String,
    pub popularity: f64,
}

impl Artist {
    #[must_use]
    pub fn new(id: RecordId, name: impl Into<String>, genre: impl Into<String>) -> Self {
        let genre = genre.into();
        Self {
            id,
            name: name.into(),
            genres: parse_genre_list(&genre),
            genre,
            country: String::new(),
            popularity: 0.0,
        }
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    #[must_use]
    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }

    /// First three genres, in source order.
    #[must_use]
    pub fn display_genres(&self) -> SmallVec<[&str; 3]> {
        display_genres(&self.genres)
    }
}

impl FromRecord for Artist {
    fn from_record(record: &Record) -> Result<Self, RecordError> {
        let id = required_id(record, "id")?;
        Ok(Self::new(id, text_field(record, "name"), text_field(record, "genre"))
            .with_country(text_field(record, "country"))
            .with_popularity(number_or_zero(record, "popularity")))
    }
}

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Option<RecordId>,
    pub artist_id: RecordId,
    /// Rating clamped to `[1, 5]`, or `0` when the source value was not numeric.
    pub rating: f64,
    pub comment: String,
    pub date: String,
    pub customer_name: String,
}

impl Review {
    #[must_use]
    pub fn new(artist_id: RecordId, rating: f64, date: impl Into<String>) -> Self {
        Self {
            id: None,
            artist_id,
            rating: clamp_rating(rating),
            comment: String::new(),
            date: date.into(),
            customer_name: String::new(),
        }
    }

    #[must_use]
    pub fn date_key(&self) -> i64 {
        date_sort_key(&self.date)
    }
}

fn clamp_rating(rating: f64) -> f64 {
    if rating.is_finite() {
        rating.clamp(MIN_RATING, MAX_RATING)
    } else {
        0.0
    }
}

impl FromRecord for Review {
    fn from_record(record: &Record) -> Result<Self, RecordError> {
        let artist_id = resolve_reference(record, "artist_id", "artist")?;
        let rating = match parse_number(record.get("rating"), "rating") {
            Ok(value) => clamp_rating(value),
            Err(err) => {
                tracing::trace!(artist_id, error = %err, "rating counted as 0");
                0.0
            }
        };
        Ok(Self {
            id: parse_id(record.get("id")),
            artist_id,
            rating,
            comment: text_field(record, "comment"),
            date: text_field(record, "date"),
            customer_name: text_field(record, "customer_name"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularityScore {
    pub artist_id: RecordId,
    pub date: String,
    pub score: f64,
}

impl PopularityScore {
    #[must_use]
    pub fn new(artist_id: RecordId, date: impl Into<String>, score: f64) -> Self {
        Self {
            artist_id,
            date: date.into(),
            score,
        }
    }
}

impl FromRecord for PopularityScore {
    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            artist_id: resolve_reference(record, "artist_id", "artist")?,
            date: text_field(record, "date"),
            score: number_or_zero(record, "score"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performance {
    pub id: Option<RecordId>,
    pub artist_id: RecordId,
    pub venue_id: RecordId,
    pub festival_day_id: RecordId,
    pub start_time: String,
    pub end_time: String,
}

impl Performance {
    #[must_use]
    pub fn new(
        artist_id: RecordId,
        venue_id: RecordId,
        festival_day_id: RecordId,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            artist_id,
            venue_id,
            festival_day_id,
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

impl FromRecord for Performance {
    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self {
            id: parse_id(record.get("id")),
            artist_id: resolve_reference(record, "artist_id", "artist")?,
            venue_id: resolve_reference(record, "venue_id", "venue")?,
            festival_day_id: resolve_reference(record, "festival_day_id", "festival_day")?,
            start_time: required_text(record, "start_time")?,
            end_time: required_text(record, "end_time")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
    pub id: RecordId,
    pub name: String,
}

impl Venue {
    #[must_use]
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl FromRecord for Venue {
    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self::new(
            required_id(record, "id")?,
            text_field(record, "name"),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FestivalDay {
    pub id: RecordId,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
}

impl FestivalDay {
    #[must_use]
    pub fn new(id: RecordId, date: impl Into<String>) -> Self {
        Self {
            id,
            date: date.into(),
        }
    }
}

impl FromRecord for FestivalDay {
    fn from_record(record: &Record) -> Result<Self, RecordError> {
        Ok(Self::new(
            required_id(record, "id")?,
            required_text(record, "date")?,
        ))
    }
}
