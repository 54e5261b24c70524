use std::collections::{HashMap, HashSet};
use std::fmt;
use std::future::Future;

use futures::future::{ready, try_join_all};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::primitives::reference_id;
use crate::core::{Record, RecordId};
use crate::error::{AnalyticsError, AnalyticsResult, SourceError};

/// Record collections served by a record source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Artists,
    Reviews,
    PopularityScores,
    Performances,
    Venues,
    FestivalDays,
}

impl Collection {
    pub const ALL: [Self; 6] = [
        Self::Artists,
        Self::Reviews,
        Self::PopularityScores,
        Self::Performances,
        Self::Venues,
        Self::FestivalDays,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Artists => "artists",
            Self::Reviews => "reviews",
            Self::PopularityScores => "popularity_scores",
            Self::Performances => "performances",
            Self::Venues => "venues",
            Self::FestivalDays => "festival_days",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference filter forwarded to the record source.
///
/// Matches a record whose `<name>_id` field, or the `id` of its expanded
/// `<name>` object, resolves to `id`. Ids given as numeric strings match too,
/// the same way records decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub id_field: String,
    pub nested_field: String,
    pub id: RecordId,
}

impl FieldFilter {
    #[must_use]
    pub fn reference(
        id_field: impl Into<String>,
        nested_field: impl Into<String>,
        id: RecordId,
    ) -> Self {
        Self {
            id_field: id_field.into(),
            nested_field: nested_field.into(),
            id,
        }
    }

    #[must_use]
    pub fn venue(id: RecordId) -> Self {
        Self::reference("venue_id", "venue", id)
    }

    #[must_use]
    pub fn artist(id: RecordId) -> Self {
        Self::reference("artist_id", "artist", id)
    }

    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        reference_id(record, &self.id_field, &self.nested_field) == Some(self.id)
    }
}

/// Contract implemented by whatever owns the raw records (OData service,
/// database, fixture files).
///
/// `filters` narrow the result; a source may ignore them and return the
/// whole collection, so callers that need the narrowing apply it again.
pub trait RecordSource {
    fn fetch_all(
        &self,
        collection: Collection,
        filters: &[FieldFilter],
    ) -> impl Future<Output = Result<Vec<Record>, SourceError>>;
}

/// Headless source backed by in-memory collections.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    collections: HashMap<Collection, Vec<Record>>,
    unavailable: HashSet<Collection>,
}

impl InMemorySource {
    #[must_use]
    pub fn with_collection(mut self, collection: Collection, records: Vec<Record>) -> Self {
        self.set_collection(collection, records);
        self
    }

    pub fn set_collection(&mut self, collection: Collection, records: Vec<Record>) {
        self.collections.insert(collection, records);
    }

    /// Makes every fetch of `collection` fail until [`Self::restore`] is called.
    pub fn fail(&mut self, collection: Collection) {
        self.unavailable.insert(collection);
    }

    pub fn restore(&mut self, collection: Collection) {
        self.unavailable.remove(&collection);
    }
}

impl RecordSource for InMemorySource {
    fn fetch_all(
        &self,
        collection: Collection,
        filters: &[FieldFilter],
    ) -> impl Future<Output = Result<Vec<Record>, SourceError>> {
        if self.unavailable.contains(&collection) {
            return ready(Err(SourceError::Unavailable {
                reason: format!("{collection} is offline"),
            }));
        }
        let Some(records) = self.collections.get(&collection) else {
            return ready(Err(SourceError::UnknownCollection { collection }));
        };
        let matching = records
            .iter()
            .filter(|record| filters.iter().all(|filter| filter.matches(record)))
            .cloned()
            .collect();
        ready(Ok(matching))
    }
}

/// One collection to fetch as part of a fan-out join.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionRequest {
    pub collection: Collection,
    pub filters: Vec<FieldFilter>,
    /// Degrade to an empty collection instead of failing the join.
    pub optional: bool,
}

impl CollectionRequest {
    #[must_use]
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            filters: Vec::new(),
            optional: false,
        }
    }

    #[must_use]
    pub fn with_filters(mut self, filters: Vec<FieldFilter>) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }
}

pub type FetchedCollections = IndexMap<Collection, Vec<Record>>;

/// Fetches every requested collection concurrently and waits for all of them.
///
/// The first required fetch to fail aborts the join: fetches still in flight
/// are dropped and a single [`AnalyticsError::AggregateFetch`] is returned.
pub async fn fetch_collections<S: RecordSource>(
    source: &S,
    requests: &[CollectionRequest],
) -> AnalyticsResult<FetchedCollections> {
    let fetches = requests.iter().map(|request| async move {
        match source.fetch_all(request.collection, &request.filters).await {
            Ok(records) => Ok((request.collection, records)),
            Err(err) if request.optional => {
                warn!(
                    collection = %request.collection,
                    error = %err,
                    "optional collection unavailable, using empty set"
                );
                Ok((request.collection, Vec::new()))
            }
            Err(err) => Err(AnalyticsError::AggregateFetch {
                collection: request.collection,
                source: err,
            }),
        }
    });

    let fetched: FetchedCollections = try_join_all(fetches).await?.into_iter().collect();
    debug!(
        collections = fetched.len(),
        records = fetched.values().map(Vec::len).sum::<usize>(),
        "fan-out fetch joined"
    );
    Ok(fetched)
}
