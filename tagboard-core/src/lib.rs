//! Hashtag engine for the Tagboard community bulletin board.
//!
//! `hashtag` and `stats` are pure functions over in-memory data. The
//! remaining modules wire them to the surrounding application: sessions,
//! the post store, post composition and legacy data migration.

pub mod board;
pub mod compose;
pub mod config;
pub mod error;
pub mod hashtag;
pub mod highlight;
pub mod ingest;
pub mod legacy;
pub mod session;
pub mod stats;
pub mod value;

pub use error::{BoardError, BoardResult, HashtagError};
pub use hashtag::{
    extract_hashtags, normalize_hashtag, normalize_hashtags, process_hashtags_from_text,
    validate_hashtag, validate_hashtags, HashtagLimits, MAX_HASHTAGS, MAX_HASHTAG_LENGTH,
};
pub use stats::{
    analyze_hashtag_trends, calculate_hashtag_stats, filter_posts_by_hashtag,
    get_co_occurring_hashtags, get_hashtag_suggestions, get_popular_hashtags,
};
