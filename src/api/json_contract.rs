use serde::{Deserialize, Serialize};

use crate::core::{LeaderboardEntry, TimelineRow};
use crate::error::{AnalyticsError, AnalyticsResult};

use super::AnalyticsState;

pub const DERIVED_VIEWS_JSON_SCHEMA_V1: u32 = 1;

/// Versioned export of the derived views, free of any rendering concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedViewsJsonContractV1 {
    pub schema_version: u32,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub timeline: Vec<TimelineRow>,
}

impl DerivedViewsJsonContractV1 {
    pub fn from_json_str(input: &str) -> AnalyticsResult<Self> {
        let payload: Self = serde_json::from_str(input).map_err(|e| {
            AnalyticsError::InvalidData(format!("failed to parse derived views payload: {e}"))
        })?;
        if payload.schema_version != DERIVED_VIEWS_JSON_SCHEMA_V1 {
            return Err(AnalyticsError::InvalidData(format!(
                "unsupported derived views schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload)
    }
}

impl AnalyticsState {
    #[must_use]
    pub fn to_json_contract_v1(&self) -> DerivedViewsJsonContractV1 {
        DerivedViewsJsonContractV1 {
            schema_version: DERIVED_VIEWS_JSON_SCHEMA_V1,
            leaderboard: self.leaderboard.as_ref().clone(),
            timeline: self.timeline.as_ref().clone(),
        }
    }

    pub fn to_json_contract_v1_pretty(&self) -> AnalyticsResult<String> {
        serde_json::to_string_pretty(&self.to_json_contract_v1()).map_err(|e| {
            AnalyticsError::InvalidData(format!("failed to serialize derived views contract v1: {e}"))
        })
    }
}
