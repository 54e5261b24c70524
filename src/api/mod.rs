mod config;
mod engine;
mod json_contract;
mod source;

pub use config::AnalyticsConfig;
pub use engine::{AnalyticsState, FestivalAnalytics, RecordSnapshot};
pub use json_contract::{DERIVED_VIEWS_JSON_SCHEMA_V1, DerivedViewsJsonContractV1};
pub use source::{
    Collection, CollectionRequest, FetchedCollections, FieldFilter, InMemorySource, RecordSource,
    fetch_collections,
};
