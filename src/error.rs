use thiserror::Error;

use crate::api::Collection;

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// One fetch of a fan-out join failed; the whole refresh is aborted.
    #[error("refresh aborted: fetching `{collection}` failed: {source}")]
    AggregateFetch {
        collection: Collection,
        #[source]
        source: SourceError,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Failure reported by a [`crate::api::RecordSource`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("record source unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("collection `{collection}` is not served by this source")]
    UnknownCollection { collection: Collection },
}

/// Per-record decoding problems.
///
/// These never leave the crate's core: the offending record is skipped (or a
/// numeric field is substituted with `0`) and the problem is logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing field `{field}`")]
    MissingField { field: &'static str },

    #[error("record has no resolvable `{field}` reference")]
    MissingReference { field: &'static str },

    #[error("`{field}` references unknown id {id}")]
    UnresolvedReference { field: &'static str, id: i64 },

    #[error("`{field}` is not a calendar date: {value:?}")]
    MalformedDate { field: &'static str, value: String },

    #[error("`{field}` is not a time of day: {value:?}")]
    MalformedTime { field: &'static str, value: String },

    #[error("`{field}` is not numeric")]
    InvalidNumericField { field: &'static str },
}
