//! Enumerated column values.
//!
//! All choice columns are stored as TEXT with CHECK constraints; these
//! constants are the single source of truth on the Rust side. Filter
//! endpoints expose them as facet values, and handlers validate incoming
//! values against them (an unknown value filters to an empty result, it
//! is not an error).

pub const MOVIE_KIND_MOVIE: &str = "movie";
pub const MOVIE_KIND_SERIES: &str = "series";
pub const MOVIE_KINDS: &[&str] = &[MOVIE_KIND_MOVIE, MOVIE_KIND_SERIES];

pub const SEX_MALE: &str = "male";
pub const SEX_FEMALE: &str = "female";
pub const SEXES: &[&str] = &[SEX_MALE, SEX_FEMALE];

pub const PROFESSION_ACTOR: &str = "actor";
pub const PROFESSION_DIRECTOR: &str = "director";
pub const PROFESSIONS: &[&str] = &[PROFESSION_ACTOR, PROFESSION_DIRECTOR];

pub const REVIEW_KIND_POSITIVE: &str = "positive";
pub const REVIEW_KIND_NEGATIVE: &str = "negative";
pub const REVIEW_KIND_NEUTRAL: &str = "neutral";
pub const REVIEW_KINDS: &[&str] = &[
    REVIEW_KIND_POSITIVE,
    REVIEW_KIND_NEGATIVE,
    REVIEW_KIND_NEUTRAL,
];

pub const REVIEW_STATUS_IN_PROGRESS: &str = "in_progress";
pub const REVIEW_STATUS_APPROVED: &str = "approved";
pub const REVIEW_STATUS_REJECTED: &str = "rejected";
pub const REVIEW_STATUSES: &[&str] = &[
    REVIEW_STATUS_IN_PROGRESS,
    REVIEW_STATUS_APPROVED,
    REVIEW_STATUS_REJECTED,
];

/// Valid rating values, 1 through 10.
pub const RATING_VALUES: &[i16] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Maximum review text length in characters.
pub const REVIEW_TEXT_MAX_CHARS: usize = 2000;
