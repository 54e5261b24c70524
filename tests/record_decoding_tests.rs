use festival_analytics::core::{
    Artist, FestivalDay, FromRecord, Performance, PopularityScore, Record, Review, Venue,
    decode_all,
};
use serde_json::{Value, json};

fn record(value: Value) -> Record {
    value.as_object().cloned().expect("object literal")
}

#[test]
fn artist_decodes_numeric_strings_and_defaults_missing_fields() {
    let artist = Artist::from_record(&record(json!({
        "id": "12",
        "name": "Kölsch",
        "genre": "TECHNO, HOUSE",
        "popularity": "73.25"
    })))
    .expect("artist");
    assert_eq!(artist.id, 12);
    assert_eq!(artist.genres, vec!["TECHNO", "HOUSE"]);
    assert_eq!(artist.country, "");
    assert_eq!(artist.popularity, 73.25);

    assert!(Artist::from_record(&record(json!({ "name": "No id" }))).is_err());
}

#[test]
fn review_reference_falls_back_to_nested_artist() {
    let review = Review::from_record(&record(json!({
        "ID": 1,
        "artist": { "id": 5, "name": "Expanded" },
        "rating": 4,
        "date": "2026-07-11",
        "customer_name": "Sam"
    })))
    .expect("review");
    assert_eq!(review.artist_id, 5);
    assert_eq!(review.rating, 4.0);
    assert_eq!(review.customer_name, "Sam");

    let flat_wins = Review::from_record(&record(json!({
        "artist_id": 6,
        "artist": { "id": 5 },
        "rating": 2
    })))
    .expect("review");
    assert_eq!(flat_wins.artist_id, 6);

    assert!(Review::from_record(&record(json!({ "rating": 5 }))).is_err());
}

#[test]
fn review_rating_is_clamped_or_zeroed() {
    let decode = |rating: Value| {
        Review::from_record(&record(json!({ "artist_id": 1, "rating": rating })))
            .expect("review")
            .rating
    };
    assert_eq!(decode(json!(9)), 5.0);
    assert_eq!(decode(json!(-3)), 1.0);
    assert_eq!(decode(json!("3.5")), 3.5);
    assert_eq!(decode(json!("great")), 0.0);
    assert_eq!(decode(Value::Null), 0.0);
}

#[test]
fn performance_requires_every_reference_and_both_times() {
    let performance = Performance::from_record(&record(json!({
        "id": 40,
        "artist": { "id": 1 },
        "venue_id": "2",
        "festival_day": { "id": 3 },
        "start_time": "20:00:00",
        "end_time": "21:30:00"
    })))
    .expect("performance");
    assert_eq!(performance.id, Some(40));
    assert_eq!(
        (performance.artist_id, performance.venue_id, performance.festival_day_id),
        (1, 2, 3)
    );

    assert!(
        Performance::from_record(&record(json!({
            "artist_id": 1,
            "venue_id": 2,
            "start_time": "20:00",
            "end_time": "21:00"
        })))
        .is_err()
    );
    assert!(
        Performance::from_record(&record(json!({
            "artist_id": 1,
            "venue_id": 2,
            "festival_day_id": 3,
            "start_time": "20:00"
        })))
        .is_err()
    );
}

#[test]
fn score_venue_and_day_decode() {
    let score = PopularityScore::from_record(&record(json!({
        "artist_id": 1,
        "date": "2026-06-01",
        "score": "not a number"
    })))
    .expect("score");
    assert_eq!(score.score, 0.0);

    let venue = Venue::from_record(&record(json!({ "id": 3, "name": "Hangar" }))).expect("venue");
    assert_eq!(venue, Venue::new(3, "Hangar"));

    let day = FestivalDay::from_record(&record(json!({ "id": 9, "date": "2026-07-12" })))
        .expect("day");
    assert_eq!(day, FestivalDay::new(9, "2026-07-12"));
    assert!(FestivalDay::from_record(&record(json!({ "id": 9 }))).is_err());
}

#[test]
fn decode_all_skips_malformed_records() {
    let records = vec![
        record(json!({ "id": 1, "name": "Main" })),
        record(json!({ "name": "Nowhere" })),
        record(json!({ "id": 2, "name": "Tent" })),
    ];
    let venues: Vec<Venue> = decode_all("venues", &records);
    assert_eq!(venues, vec![Venue::new(1, "Main"), Venue::new(2, "Tent")]);
}
