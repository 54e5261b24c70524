//! festival-analytics: derived views for festival back offices.
//!
//! Turns raw artist, review, popularity and schedule records into a ranked
//! leaderboard with trend sparklines and a per-venue line-up timeline. The
//! derivation functions in [`core`] are pure; [`api`] adds the fan-out fetch
//! and the caller-owned state that keeps the last good views.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{AnalyticsConfig, FestivalAnalytics};
pub use error::{AnalyticsError, AnalyticsResult};
