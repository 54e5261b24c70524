use festival_analytics::core::{
    Artist, RankQuery, Review, SortKey, TrendTuning, build_leaderboard, rank,
};
use proptest::prelude::*;

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

proptest! {
    #[test]
    fn average_is_rounded_mean(ratings in proptest::collection::vec(1u8..=5, 0..40)) {
        let artists = vec![Artist::new(1, "Solo", "POP")];
        let reviews: Vec<Review> = ratings
            .iter()
            .map(|&r| Review::new(1, f64::from(r), "2026-07-01"))
            .collect();

        let entries = build_leaderboard(&artists, &reviews, &[], TrendTuning::default());
        let entry = &entries[0];
        prop_assert_eq!(entry.review_count, ratings.len());
        if ratings.is_empty() {
            prop_assert_eq!(entry.avg_rating, 0.0);
        } else {
            let mean = ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / ratings.len() as f64;
            prop_assert_eq!(entry.avg_rating, round_one(mean));
        }
    }

    #[test]
    fn unreviewed_artists_always_rank_last(
        counts in proptest::collection::vec(0usize..4, 1..20),
        by_count in any::<bool>()
    ) {
        let artists: Vec<Artist> = (0..counts.len())
            .map(|i| Artist::new(i as i64, format!("Artist {i}"), "POP"))
            .collect();
        let reviews: Vec<Review> = counts
            .iter()
            .enumerate()
            .flat_map(|(i, &n)| {
                (0..n).map(move |k| Review::new(i as i64, (1 + (i + k) % 5) as f64, "2026-07-01"))
            })
            .collect();

        let entries = build_leaderboard(&artists, &reviews, &[], TrendTuning::default());
        let sort_key = if by_count { SortKey::ReviewCount } else { SortKey::AvgRating };
        let ranked = rank(&entries, &RankQuery::default().with_sort_key(sort_key));

        prop_assert_eq!(ranked.len(), artists.len());
        let first_unreviewed = ranked.iter().position(|e| e.review_count == 0);
        if let Some(start) = first_unreviewed {
            prop_assert!(ranked[start..].iter().all(|e| e.review_count == 0));
        }
        for (idx, entry) in ranked.iter().enumerate() {
            prop_assert_eq!(entry.rank, idx + 1);
        }
    }
}
