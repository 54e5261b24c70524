use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of genre tags shown per artist.
pub const DISPLAY_GENRE_LIMIT: usize = 3;

/// Genres known to the festival catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Techno,
    House,
    Pop,
    Indie,
    Hardstyle,
    /// The catalogue's explicit catch-all entry.
    Other,
    Unrecognized,
}

/// Semantic colour class a view applies to a genre tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DisplayCategory {
    Information,
    Success,
    Warning,
    Error,
    #[default]
    Neutral,
}

const GENRE_CATEGORIES: [(Genre, DisplayCategory); 6] = [
    (Genre::Techno, DisplayCategory::Information),
    (Genre::House, DisplayCategory::Success),
    (Genre::Pop, DisplayCategory::Success),
    (Genre::Indie, DisplayCategory::Warning),
    (Genre::Hardstyle, DisplayCategory::Error),
    (Genre::Other, DisplayCategory::Neutral),
];

const GENRE_NAMES: [(&str, Genre); 7] = [
    ("TECHNO", Genre::Techno),
    ("HOUSE", Genre::House),
    ("POP", Genre::Pop),
    ("INDIE", Genre::Indie),
    ("HARDSTYLE", Genre::Hardstyle),
    ("OTHER", Genre::Other),
    ("ANDERS", Genre::Other),
];

impl Genre {
    /// Case-insensitive lookup; anything outside the catalogue is `Unrecognized`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        GENRE_NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map_or(Self::Unrecognized, |(_, genre)| *genre)
    }

    #[must_use]
    pub fn display_category(self) -> DisplayCategory {
        GENRE_CATEGORIES
            .iter()
            .find(|(genre, _)| *genre == self)
            .map(|(_, category)| *category)
            .unwrap_or_default()
    }
}

/// Splits comma-separated genre text, trimming entries and dropping empty ones.
#[must_use]
pub fn parse_genre_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|genre| !genre.is_empty())
        .map(str::to_owned)
        .collect()
}

#[must_use]
pub fn display_genres(genres: &[String]) -> SmallVec<[&str; DISPLAY_GENRE_LIMIT]> {
    genres
        .iter()
        .take(DISPLAY_GENRE_LIMIT)
        .map(String::as_str)
        .collect()
}

/// How a genre filter is matched against an artist's genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GenreMatchMode {
    /// The filter must equal one element of the parsed genre list.
    #[default]
    Exact,
    /// The filter may appear anywhere in the raw genre text.
    Contains,
}

impl GenreMatchMode {
    #[must_use]
    pub fn matches(self, filter: &str, genres: &[String], raw: &str) -> bool {
        match self {
            Self::Exact => genres.iter().any(|genre| genre == filter),
            Self::Contains => raw.contains(filter),
        }
    }
}
