pub mod aggregator;
pub mod directory;
pub mod genre;
pub mod primitives;
pub mod ranking;
pub mod timeline;
pub mod trend;
pub mod types;

pub use aggregator::{
    RatingStats, SeriesByArtist, SeriesSample, build_popularity_series, build_rating_series,
    build_rating_stats,
};
pub use directory::{
    ArtistProfile, DirectoryQuery, DirectorySort, ScheduledSet, build_profile, filter_directory,
};
pub use genre::{DisplayCategory, Genre, GenreMatchMode, display_genres, parse_genre_list};
pub use ranking::{LeaderboardEntry, RankQuery, SortKey, build_leaderboard, rank};
pub use timeline::{
    Appointment, AppointmentSource, TimelineFilter, TimelineRow, build_rows, build_rows_filtered,
    format_time_range, resolve_interval,
};
pub use trend::{
    AxisBounds, TrendMode, TrendPoint, TrendSample, TrendTuning, axis_bounds, axis_bounds_tuned,
    sample, sample_tuned,
};
pub use types::{
    Artist, FestivalDay, FromRecord, PopularityScore, Performance, Record, RecordId, Review,
    Venue, decode_all,
};
