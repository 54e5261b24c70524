use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::primitives::{format_hhmm, locale_cmp, parse_calendar_date, parse_time_of_day};
use crate::core::types::{Artist, FestivalDay, Performance, RecordId, Venue};
use crate::error::RecordError;

/// Raw fields an appointment was derived from, kept for detail views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSource {
    pub performance_id: Option<RecordId>,
    pub artist_id: RecordId,
    pub artist_name: String,
    pub genre: String,
    pub venue_name: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub title: String,
    pub subtitle: String,
    pub start: NaiveDateTime,
    /// Always strictly after `start`.
    pub end: NaiveDateTime,
    pub source: AppointmentSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineRow {
    pub venue_id: RecordId,
    pub venue_name: String,
    pub appointments: Vec<Appointment>,
}

/// Narrows the timeline to one venue and/or one artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineFilter {
    pub venue_id: Option<RecordId>,
    pub artist_id: Option<RecordId>,
}

impl TimelineFilter {
    #[must_use]
    pub fn with_venue(mut self, venue_id: RecordId) -> Self {
        self.venue_id = Some(venue_id);
        self
    }

    #[must_use]
    pub fn with_artist(mut self, artist_id: RecordId) -> Self {
        self.artist_id = Some(artist_id);
        self
    }

    #[must_use]
    pub fn accepts(self, performance: &Performance) -> bool {
        self.venue_id.is_none_or(|id| id == performance.venue_id)
            && self.artist_id.is_none_or(|id| id == performance.artist_id)
    }
}

/// Anchors a set's times to its festival date.
///
/// An end time at or before the start time means the set runs past midnight,
/// so the end moves to the following day. Returns `None` only when the date
/// arithmetic overflows.
#[must_use]
pub fn resolve_interval(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start_at = date.and_time(start);
    let mut end_at = date.and_time(end);
    if end_at <= start_at {
        end_at = end_at.checked_add_signed(TimeDelta::days(1))?;
    }
    Some((start_at, end_at))
}

/// Formats `HH:MM–HH:MM`, dropping seconds.
#[must_use]
pub fn format_time_range(start: NaiveTime, end: NaiveTime) -> String {
    format!("{}–{}", format_hhmm(start), format_hhmm(end))
}

#[must_use]
pub fn build_rows(
    performances: &[Performance],
    venues: &[Venue],
    artists: &[Artist],
    festival_days: &[FestivalDay],
) -> Vec<TimelineRow> {
    build_rows_filtered(
        performances,
        venues,
        artists,
        festival_days,
        TimelineFilter::default(),
    )
}

/// Groups performances into per-venue rows.
///
/// Performances whose artist, venue or festival day is unknown, or whose
/// date or times do not parse, are skipped. Rows are ordered by venue name
/// and appointments by start instant.
#[must_use]
pub fn build_rows_filtered(
    performances: &[Performance],
    venues: &[Venue],
    artists: &[Artist],
    festival_days: &[FestivalDay],
    filter: TimelineFilter,
) -> Vec<TimelineRow> {
    let venues_by_id: HashMap<RecordId, &Venue> = venues.iter().map(|v| (v.id, v)).collect();
    let artists_by_id: HashMap<RecordId, &Artist> = artists.iter().map(|a| (a.id, a)).collect();
    let days_by_id: HashMap<RecordId, &FestivalDay> =
        festival_days.iter().map(|d| (d.id, d)).collect();
    let lookup = Lookup {
        venues: &venues_by_id,
        artists: &artists_by_id,
        days: &days_by_id,
    };

    let mut rows: IndexMap<RecordId, TimelineRow> = IndexMap::new();
    let mut skipped = 0_usize;
    for performance in performances.iter().filter(|p| filter.accepts(p)) {
        match lookup.appointment(performance) {
            Ok((venue, appointment)) => rows
                .entry(venue.id)
                .or_insert_with(|| TimelineRow {
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    appointments: Vec::new(),
                })
                .appointments
                .push(appointment),
            Err(err) => {
                skipped += 1;
                debug!(
                    performance_id = ?performance.id,
                    error = %err,
                    "skipping performance"
                );
            }
        }
    }
    if skipped > 0 {
        warn!(skipped, "performances dropped from timeline");
    }

    let mut rows: Vec<TimelineRow> = rows.into_values().collect();
    rows.sort_by(|a, b| locale_cmp(&a.venue_name, &b.venue_name));
    for row in &mut rows {
        row.appointments.sort_by_key(|appointment| appointment.start);
    }
    debug!(rows = rows.len(), "build timeline rows");
    rows
}

struct Lookup<'a> {
    venues: &'a HashMap<RecordId, &'a Venue>,
    artists: &'a HashMap<RecordId, &'a Artist>,
    days: &'a HashMap<RecordId, &'a FestivalDay>,
}

impl<'a> Lookup<'a> {
    fn appointment(
        &self,
        performance: &Performance,
    ) -> Result<(&'a Venue, Appointment), RecordError> {
        let artist = *self.artists.get(&performance.artist_id).ok_or(
            RecordError::UnresolvedReference {
                field: "artist_id",
                id: performance.artist_id,
            },
        )?;
        let venue = *self.venues.get(&performance.venue_id).ok_or(
            RecordError::UnresolvedReference {
                field: "venue_id",
                id: performance.venue_id,
            },
        )?;
        let day = *self.days.get(&performance.festival_day_id).ok_or(
            RecordError::UnresolvedReference {
                field: "festival_day_id",
                id: performance.festival_day_id,
            },
        )?;

        let date = parse_calendar_date(&day.date, "date")?;
        let start_time = parse_time_of_day(&performance.start_time, "start_time")?;
        let end_time = parse_time_of_day(&performance.end_time, "end_time")?;
        let (start, end) = resolve_interval(date, start_time, end_time).ok_or_else(|| {
            RecordError::MalformedDate {
                field: "date",
                value: day.date.clone(),
            }
        })?;

        let appointment = Appointment {
            title: format!(
                "{} ({})",
                artist.name,
                format_time_range(start_time, end_time)
            ),
            subtitle: artist.genre.clone(),
            start,
            end,
            source: AppointmentSource {
                performance_id: performance.id,
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                genre: artist.genre.clone(),
                venue_name: venue.name.clone(),
                date: day.date.clone(),
                start_time: performance.start_time.clone(),
                end_time: performance.end_time.clone(),
            },
        };
        Ok((venue, appointment))
    }
}
