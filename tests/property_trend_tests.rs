use festival_analytics::core::{SeriesSample, TrendMode, sample};
use proptest::prelude::*;

fn value_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => -50.0f64..150.0,
        1 => -1e307f64..1e307,
        1 => prop_oneof![Just(f64::MAX), Just(f64::MIN), Just(1e306), Just(-1e306)],
    ]
}

fn series_strategy() -> impl Strategy<Value = Vec<SeriesSample>> {
    proptest::collection::vec(
        (-5_000_i64..5_000, value_strategy())
            .prop_map(|(day, value)| SeriesSample::new(day * 86_400_000, value)),
        0..24,
    )
}

proptest! {
    #[test]
    fn trend_length_follows_series_length(series in series_strategy()) {
        let trend = sample(&series, TrendMode::Score);
        let expected = match series.len() {
            0 => 0,
            1 => 2,
            len => len.min(6),
        };
        prop_assert_eq!(trend.points.len(), expected);
        if series.len() == 1 {
            prop_assert_eq!(trend.points[0].y, trend.points[1].y);
        }
    }

    #[test]
    fn trend_x_spans_zero_to_hundred(series in series_strategy()) {
        let trend = sample(&series, TrendMode::Score);
        if let (Some(first), Some(last)) = (trend.points.first(), trend.points.last()) {
            prop_assert_eq!(first.x, 0.0);
            prop_assert_eq!(last.x, 100.0);
        }
        for pair in trend.points.windows(2) {
            prop_assert!(pair[0].x <= pair[1].x);
        }
    }

    #[test]
    fn axis_bounds_contain_every_point(series in series_strategy(), rating_mode in any::<bool>()) {
        let mode = if rating_mode { TrendMode::Rating } else { TrendMode::Score };
        let trend = sample(&series, mode);
        prop_assert!(trend.axis_min <= trend.axis_max);
        prop_assert!(trend.axis_min.is_finite() && trend.axis_max.is_finite());
        for point in &trend.points {
            prop_assert!(point.y.is_finite());
            prop_assert!(trend.axis_min <= point.y, "min {} above {}", trend.axis_min, point.y);
            prop_assert!(point.y <= trend.axis_max, "max {} below {}", trend.axis_max, point.y);
        }
    }

    #[test]
    fn rating_trend_stays_on_rating_scale(
        ratings in proptest::collection::vec(0.0f64..5.0, 1..12)
    ) {
        let series: Vec<SeriesSample> = ratings
            .iter()
            .enumerate()
            .map(|(i, &r)| SeriesSample::new(i as i64, r))
            .collect();
        let trend = sample(&series, TrendMode::Rating);
        for point in &trend.points {
            prop_assert!((0.0..=5.0).contains(&point.y));
        }
    }
}
