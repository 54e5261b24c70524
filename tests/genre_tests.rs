use festival_analytics::core::{
    Artist, DisplayCategory, Genre, GenreMatchMode, display_genres, parse_genre_list,
};

#[test]
fn catalogue_genres_map_to_their_display_category() {
    let cases = [
        ("TECHNO", DisplayCategory::Information),
        ("house", DisplayCategory::Success),
        (" Pop ", DisplayCategory::Success),
        ("INDIE", DisplayCategory::Warning),
        ("Hardstyle", DisplayCategory::Error),
        ("OTHER", DisplayCategory::Neutral),
        ("ANDERS", DisplayCategory::Neutral),
    ];
    for (text, expected) in cases {
        assert_eq!(Genre::parse(text).display_category(), expected, "{text}");
    }
}

#[test]
fn unknown_genres_fall_back_to_neutral() {
    let genre = Genre::parse("Drum & Bass");
    assert_eq!(genre, Genre::Unrecognized);
    assert_eq!(genre.display_category(), DisplayCategory::Neutral);
    assert_eq!(Genre::parse("").display_category(), DisplayCategory::Neutral);
}

#[test]
fn genre_list_is_trimmed_and_skips_empty_entries() {
    assert_eq!(
        parse_genre_list(" TECHNO ,HOUSE,, INDIE "),
        vec!["TECHNO", "HOUSE", "INDIE"]
    );
    assert!(parse_genre_list("").is_empty());
    assert!(parse_genre_list(" , ").is_empty());
}

#[test]
fn at_most_three_genres_are_displayed() {
    let artist = Artist::new(1, "Busy", "TECHNO, HOUSE, POP, INDIE, HARDSTYLE");
    assert_eq!(artist.genres.len(), 5);
    assert_eq!(
        artist.display_genres().as_slice(),
        &["TECHNO", "HOUSE", "POP"]
    );

    let short = parse_genre_list("POP");
    assert_eq!(display_genres(&short).as_slice(), &["POP"]);
}

#[test]
fn match_modes_differ_on_substrings() {
    let artist = Artist::new(1, "Deep", "DEEP HOUSE, TECHNO");
    assert!(!GenreMatchMode::Exact.matches("HOUSE", &artist.genres, &artist.genre));
    assert!(GenreMatchMode::Contains.matches("HOUSE", &artist.genres, &artist.genre));
    assert!(GenreMatchMode::Exact.matches("TECHNO", &artist.genres, &artist.genre));
    assert_eq!(GenreMatchMode::default(), GenreMatchMode::Exact);
}
