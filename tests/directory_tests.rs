use festival_analytics::core::{
    Artist, DirectoryQuery, DirectorySort, FestivalDay, GenreMatchMode, Performance, Review,
    Venue, build_profile, filter_directory,
};

fn roster() -> Vec<Artist> {
    vec![
        Artist::new(1, "charlotte de Witte", "TECHNO")
            .with_country("Belgium")
            .with_popularity(88.0),
        Artist::new(2, "Amelie Lens", "TECHNO, HOUSE")
            .with_country("Belgium")
            .with_popularity(91.5),
        Artist::new(3, "Dua Lipa", "POP")
            .with_country("United Kingdom")
            .with_popularity(97.0),
        Artist::new(4, "Boris Brejcha", "DEEP HOUSE")
            .with_country("Germany")
            .with_popularity(88.0),
    ]
}

fn names(artists: &[Artist]) -> Vec<&str> {
    artists.iter().map(|a| a.name.as_str()).collect()
}

#[test]
fn default_query_lists_everyone_by_name() {
    let listed = filter_directory(&roster(), &DirectoryQuery::default());
    assert_eq!(
        names(&listed),
        vec!["Amelie Lens", "Boris Brejcha", "charlotte de Witte", "Dua Lipa"]
    );
}

#[test]
fn filters_combine_name_genre_and_country() {
    let query = DirectoryQuery {
        search_term: Some(" LENS".to_owned()),
        ..DirectoryQuery::default()
    };
    assert_eq!(names(&filter_directory(&roster(), &query)), vec!["Amelie Lens"]);

    let query = DirectoryQuery {
        genre: Some("HOUSE".to_owned()),
        country: Some("belgium".to_owned()),
        ..DirectoryQuery::default()
    };
    assert_eq!(names(&filter_directory(&roster(), &query)), vec!["Amelie Lens"]);

    let query = DirectoryQuery {
        genre: Some("HOUSE".to_owned()),
        ..DirectoryQuery::default()
    };
    assert_eq!(
        names(&filter_directory(&roster(), &query)),
        vec!["Amelie Lens", "Boris Brejcha"]
    );

    let query = DirectoryQuery {
        genre: Some("HOUSE".to_owned()),
        genre_match: GenreMatchMode::Exact,
        ..DirectoryQuery::default()
    };
    assert_eq!(names(&filter_directory(&roster(), &query)), vec!["Amelie Lens"]);
}

#[test]
fn popularity_sort_is_descending_with_name_tie_break() {
    let query = DirectoryQuery {
        sort: DirectorySort::Popularity,
        ..DirectoryQuery::default()
    };
    assert_eq!(
        names(&filter_directory(&roster(), &query)),
        vec!["Dua Lipa", "Amelie Lens", "Boris Brejcha", "charlotte de Witte"]
    );
}

#[test]
fn profile_orders_reviews_newest_first_and_sets_by_start() {
    let artist = Artist::new(7, "Peggy Gou", "HOUSE");
    let reviews = vec![
        Review::new(7, 4.0, "2026-07-01"),
        Review::new(7, 5.0, "2026-07-12"),
        Review::new(8, 1.0, "2026-07-12"),
        Review::new(7, 3.0, "2026-07-05"),
    ];
    let venues = vec![Venue::new(1, "Main"), Venue::new(2, "Garden")];
    let days = vec![
        FestivalDay::new(10, "2026-07-10"),
        FestivalDay::new(11, "2026-07-11"),
    ];
    let performances = vec![
        Performance::new(7, 2, 11, "14:00", "15:00"),
        Performance::new(7, 1, 10, "23:30", "00:30"),
        Performance::new(8, 1, 10, "12:00", "13:00"),
        Performance::new(7, 99, 10, "12:00", "13:00"),
    ];

    let profile = build_profile(&artist, &reviews, &performances, &venues, &days);
    assert_eq!(profile.review_count, 3);
    assert_eq!(profile.avg_rating, 4.0);
    let dates: Vec<&str> = profile.reviews.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["2026-07-12", "2026-07-05", "2026-07-01"]);

    let venues: Vec<&str> = profile
        .schedule
        .iter()
        .map(|s| s.venue_name.as_str())
        .collect();
    assert_eq!(venues, vec!["Main", "Garden"]);
    assert!(profile.schedule[0].end > profile.schedule[0].start);
}

#[test]
fn profile_without_reviews_averages_zero() {
    let artist = Artist::new(1, "Newcomer", "INDIE");
    let profile = build_profile(&artist, &[], &[], &[], &[]);
    assert_eq!(profile.review_count, 0);
    assert_eq!(profile.avg_rating, 0.0);
    assert!(profile.schedule.is_empty());
}

#[test]
fn profile_average_ignores_non_numeric_ratings() {
    let artist = Artist::new(3, "Bicep", "HOUSE");
    let mut unrated = Review::new(3, 1.0, "2026-07-13");
    unrated.rating = 0.0;
    let reviews = vec![
        Review::new(3, 5.0, "2026-07-10"),
        Review::new(3, 4.0, "2026-07-11"),
        unrated,
    ];

    let profile = build_profile(&artist, &reviews, &[], &[], &[]);
    assert_eq!(profile.reviews.len(), 3);
    assert_eq!(profile.review_count, 2);
    assert_eq!(profile.avg_rating, 4.5);
    assert_eq!(profile.reviews[0].date, "2026-07-13");
}
