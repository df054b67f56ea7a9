use config::{Config, ConfigBuilder, ConfigError, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::hashtag::{HashtagLimits, MAX_HASHTAGS, MAX_HASHTAG_LENGTH};
use crate::session::MAX_NICKNAME_LENGTH;
use crate::stats::{DEFAULT_POPULAR_LIMIT, DEFAULT_RECENT_WINDOW, DEFAULT_SUGGESTION_LIMIT};

pub const MAX_POST_LENGTH: usize = 500;

#[derive(Debug, Clone, Deserialize)]
pub struct Limits {
    pub max_hashtag_length: usize,
    pub max_hashtags: usize,
    pub max_post_length: usize,
    pub max_nickname_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Stats {
    pub popular_limit: usize,
    pub suggestion_limit: usize,
    pub recent_window: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Data {
    pub posts_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub limits: Limits,
    pub stats: Stats,
    pub data: Data,
}

impl Settings {
    /// Load settings from `settings.toml` (if present), then environment
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Self::defaults()?;

        // 1. Try to load from settings.toml
        let config_file_name = "settings.toml";

        // Check in current directory
        let current_dir_path = PathBuf::from(config_file_name);
        if current_dir_path.exists() {
            builder = builder.add_source(File::from(current_dir_path).required(false));
        }

        // Check in tagboard-cli directory (for development)
        let dev_path = PathBuf::from("tagboard-cli").join(config_file_name);
        if dev_path.exists() {
            builder = builder.add_source(File::from(dev_path).required(false));
        }

        Self::finish(builder)
    }

    /// Load settings from an explicit file, then environment
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let builder = Self::defaults()?.add_source(File::from(path.to_path_buf()));
        Self::finish(builder)
    }

    pub fn hashtag_limits(&self) -> HashtagLimits {
        HashtagLimits {
            max_length: self.limits.max_hashtag_length,
            max_count: self.limits.max_hashtags,
        }
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("limits.max_hashtag_length", MAX_HASHTAG_LENGTH as i64)?
            .set_default("limits.max_hashtags", MAX_HASHTAGS as i64)?
            .set_default("limits.max_post_length", MAX_POST_LENGTH as i64)?
            .set_default("limits.max_nickname_length", MAX_NICKNAME_LENGTH as i64)?
            .set_default("stats.popular_limit", DEFAULT_POPULAR_LIMIT as i64)?
            .set_default("stats.suggestion_limit", DEFAULT_SUGGESTION_LIMIT as i64)?
            .set_default("stats.recent_window", DEFAULT_RECENT_WINDOW as i64)?
            .set_default("data.posts_path", "posts.json")
    }

    // 2. Override with environment variables (highest priority)
    fn finish(mut builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var("TAGBOARD_POSTS_PATH") {
            builder = builder.set_override("data.posts_path", path)?;
        }
        if let Ok(max) = std::env::var("TAGBOARD_MAX_HASHTAGS") {
            builder = builder.set_override("limits.max_hashtags", max)?;
        }
        if let Ok(max) = std::env::var("TAGBOARD_MAX_HASHTAG_LENGTH") {
            builder = builder.set_override("limits.max_hashtag_length", max)?;
        }

        let s = builder.build()?;
        s.try_deserialize()
    }
}
