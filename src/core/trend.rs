use serde::{Deserialize, Serialize};

use crate::core::aggregator::SeriesSample;
use crate::core::primitives::round_to;
use crate::core::types::MAX_RATING;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Tuning controls for trend downsampling and axis fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendTuning {
    /// Most recent samples kept per series.
    pub max_points: usize,
    /// Share of the value range added above and below the data.
    pub padding_ratio: f64,
    /// Half of the span used when every value is equal.
    pub flat_padding: f64,
    /// Conventional value range; also the bounds of an empty trend.
    pub display_min: f64,
    pub display_max: f64,
    /// Distance outside the display range that still snaps to it.
    pub snap_margin: f64,
}

impl Default for TrendTuning {
    fn default() -> Self {
        Self {
            max_points: 6,
            padding_ratio: 0.15,
            flat_padding: 1.0,
            display_min: 0.0,
            display_max: 10.0,
            snap_margin: 0.5,
        }
    }
}

impl TrendTuning {
    pub fn validate(self) -> AnalyticsResult<Self> {
        if self.max_points < 2 {
            return Err(AnalyticsError::InvalidConfig(
                "trend max points must be >= 2".to_owned(),
            ));
        }
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(AnalyticsError::InvalidConfig(
                "trend padding ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.flat_padding.is_finite() || self.flat_padding <= 0.0 {
            return Err(AnalyticsError::InvalidConfig(
                "trend flat padding must be finite and > 0".to_owned(),
            ));
        }
        if !self.display_min.is_finite()
            || !self.display_max.is_finite()
            || self.display_min >= self.display_max
        {
            return Err(AnalyticsError::InvalidConfig(
                "trend display range must be finite and non-empty".to_owned(),
            ));
        }
        if !self.snap_margin.is_finite() || self.snap_margin < 0.0 {
            return Err(AnalyticsError::InvalidConfig(
                "trend snap margin must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// How sample values become trend y-values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrendMode {
    /// Each sample's own value.
    #[default]
    Score,
    /// Running mean of the ratings seen so far, within `[0, 5]`.
    Rating,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub x: f64,
    pub y: f64,
}

impl TrendPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSample {
    pub points: Vec<TrendPoint>,
    pub axis_min: f64,
    pub axis_max: f64,
}

#[must_use]
pub fn sample(series: &[SeriesSample], mode: TrendMode) -> TrendSample {
    sample_tuned(series, mode, TrendTuning::default())
}

/// Downsamples `series` into sparkline points on a `0..=100` x-axis.
///
/// Samples are ordered by date (stable for equal dates), the most recent
/// `max_points` are kept, and a lone point is mirrored at `x = 100` so the
/// line always has two endpoints.
#[must_use]
pub fn sample_tuned(series: &[SeriesSample], mode: TrendMode, tuning: TrendTuning) -> TrendSample {
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|sample| sample.date_key);
    let start = sorted.len().saturating_sub(tuning.max_points);
    let window = &sorted[start..];

    let values: Vec<f64> = match mode {
        TrendMode::Score => window
            .iter()
            .map(|sample| round_to(finite_or_zero(sample.value), 2))
            .collect(),
        TrendMode::Rating => {
            let mut sum = 0.0;
            window
                .iter()
                .enumerate()
                .map(|(i, sample)| {
                    sum += finite_or_zero(sample.value);
                    let mean = sum / (i + 1) as f64;
                    round_to(mean.clamp(0.0, MAX_RATING), 2)
                })
                .collect()
        }
    };

    let n = values.len();
    let mut points: Vec<TrendPoint> = values
        .iter()
        .enumerate()
        .map(|(i, &y)| TrendPoint::new(x_coordinate(i, n), y))
        .collect();
    if points.len() == 1 {
        let y = points[0].y;
        points.push(TrendPoint::new(100.0, y));
    }

    let bounds = axis_bounds_tuned(&points, tuning);
    TrendSample {
        points,
        axis_min: bounds.min,
        axis_max: bounds.max,
    }
}

#[must_use]
pub fn axis_bounds(points: &[TrendPoint]) -> AxisBounds {
    axis_bounds_tuned(points, TrendTuning::default())
}

/// Fits display bounds around the y-values of `points`.
///
/// Floors and caps never cut inside the observed y extent, so every point
/// stays within the returned bounds.
#[must_use]
pub fn axis_bounds_tuned(points: &[TrendPoint], tuning: TrendTuning) -> AxisBounds {
    let Some((lo, hi)) = y_extent(points) else {
        return AxisBounds {
            min: tuning.display_min,
            max: tuning.display_max,
        };
    };

    let floor = tuning.display_min.min(lo);
    let ceiling = tuning.display_max.max(hi);
    let flat_span = 2.0 * tuning.flat_padding;

    let (mut min, mut max) = if lo == hi {
        let min = (lo - tuning.flat_padding).max(floor);
        (min, min + flat_span)
    } else {
        let pad = (hi - lo) * tuning.padding_ratio;
        ((lo - pad).max(floor), hi + pad)
    };
    // Padding can overflow near the ends of the f64 range.
    if !max.is_finite() {
        max = hi;
    }

    if min >= tuning.display_min - tuning.snap_margin
        && max <= tuning.display_max + tuning.snap_margin
    {
        min = min.max(floor);
        max = max.min(ceiling);
        if max == min {
            max = (min + flat_span).min(ceiling);
        }
    }

    AxisBounds {
        min: round_to(min, 2),
        max: round_to(max, 2),
    }
}

fn y_extent(points: &[TrendPoint]) -> Option<(f64, f64)> {
    points
        .iter()
        .map(|point| point.y)
        .filter(|y| y.is_finite())
        .fold(None, |extent, y| match extent {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
}

fn x_coordinate(index: usize, count: usize) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    (index as f64 * 100.0 / (count - 1) as f64).round()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
