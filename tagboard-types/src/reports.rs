use serde::{Deserialize, Serialize};

/// Usage of one hashtag across a post collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagStat {
    /// Display form: the first spelling encountered
    pub hashtag: String,
    pub count: usize,
    /// Contributing post ids, in iteration order
    pub posts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagCount {
    pub hashtag: String,
    pub count: usize,
}

impl From<&HashtagStat> for HashtagCount {
    fn from(stat: &HashtagStat) -> Self {
        Self {
            hashtag: stat.hashtag.clone(),
            count: stat.count,
        }
    }
}

/// Aggregate usage summary for a post collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashtagTrends {
    pub total_hashtags: usize,
    pub unique_hashtags: usize,
    pub average_hashtags_per_post: f64,
    pub most_popular: Option<String>,
    pub least_used: Vec<String>,
}

/// Result of validating a hashtag list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashtagValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Result of validating a single hashtag candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashtagCheck {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HashtagCheck {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }

    /// Rejected without a message, e.g. a blank entry the UI just ignores
    pub fn rejected() -> Self {
        Self {
            is_valid: false,
            error: None,
        }
    }
}

/// Hashtags extracted from text together with their validation outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedHashtags {
    pub hashtags: Vec<String>,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Snapshot of how far the category-to-hashtag migration has progressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStatus {
    pub total_posts: usize,
    pub legacy_posts: usize,
    pub migrated_posts: usize,
    pub migration_complete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationFailure {
    pub id: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationResult {
    pub total_processed: usize,
    pub success_count: usize,
    pub error_count: usize,
    pub errors: Vec<MigrationFailure>,
}

/// Reported after each migrated batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationProgress {
    pub current: usize,
    pub total: usize,
    pub percentage: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_doc_id: Option<String>,
}

/// What the migration would write for one legacy record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationPreview {
    pub id: String,
    pub category_id: String,
    pub converted_hashtags: Vec<String>,
}
