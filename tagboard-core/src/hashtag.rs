use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tagboard_types::{HashtagCheck, HashtagValidation, ProcessedHashtags};

use crate::error::HashtagError;

pub const HASHTAG_MARKER: char = '#';
pub const MAX_HASHTAG_LENGTH: usize = 50;
pub const MAX_HASHTAGS: usize = 10;

/// Regex pattern for matching hashtags
/// Matches: # followed by a run of anything except whitespace, another #,
/// ASCII punctuation `.,!?;:()[]{}` or full-width CJK punctuation
pub(crate) static HASHTAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#([^\s#.,!?;:()\[\]\{\}「」『』。、！？；：（）［］｛｝]+)")
        .expect("Failed to compile hashtag regex")
});

/// Length and count limits applied by validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashtagLimits {
    /// Maximum characters per hashtag
    pub max_length: usize,
    /// Maximum hashtags per post
    pub max_count: usize,
}

impl Default for HashtagLimits {
    fn default() -> Self {
        Self {
            max_length: MAX_HASHTAG_LENGTH,
            max_count: MAX_HASHTAGS,
        }
    }
}

/// Extract hashtags from post text
///
/// Returns normalized hashtags (without the # prefix) in order of first
/// appearance. ASCII letters are lowercased, other scripts pass through
/// untouched, and duplicates are removed.
///
/// # Examples
///
/// ```
/// use tagboard_core::hashtag::extract_hashtags;
/// let text = "Great festival! #festival #文化祭 #Fun #楽しい #FUN";
/// assert_eq!(extract_hashtags(text), vec!["festival", "文化祭", "fun", "楽しい"]);
/// ```
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let raw = HASHTAG_REGEX
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str());

    normalize_hashtags(raw)
}

/// Normalize a single hashtag: trim, drop one leading #, lowercase ASCII only.
///
/// Whitespace between the marker and the tag is trimmed as well. May return
/// an empty string when the input held nothing but whitespace or the marker.
pub fn normalize_hashtag(raw: &str) -> String {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix(HASHTAG_MARKER).unwrap_or(trimmed);
    body.trim().to_ascii_lowercase()
}

/// Normalize a list of hashtags, dropping empty results and duplicates
/// (first occurrence wins).
pub fn normalize_hashtags<I, S>(hashtags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();

    for raw in hashtags {
        let tag = normalize_hashtag(raw.as_ref());
        if tag.is_empty() {
            continue;
        }
        if seen.insert(tag.clone()) {
            normalized.push(tag);
        }
    }

    normalized
}

/// Validate a hashtag list against the default limits
pub fn validate_hashtags<S: AsRef<str>>(hashtags: &[S]) -> HashtagValidation {
    validate_hashtags_with(hashtags, &HashtagLimits::default())
}

/// Validate a hashtag list, collecting every problem rather than stopping at
/// the first one.
pub fn validate_hashtags_with<S: AsRef<str>>(
    hashtags: &[S],
    limits: &HashtagLimits,
) -> HashtagValidation {
    let mut errors = Vec::new();

    if let Some(err) = count_error(hashtags.len(), limits) {
        errors.push(err);
    }
    errors.extend(
        hashtags
            .iter()
            .enumerate()
            .filter_map(|(i, tag)| entry_error(tag.as_ref(), Some(i + 1), limits)),
    );

    into_validation(errors)
}

/// Validate one hashtag candidate against the default limits
pub fn validate_hashtag(hashtag: &str) -> HashtagCheck {
    validate_hashtag_with(hashtag, &HashtagLimits::default())
}

pub fn validate_hashtag_with(hashtag: &str, limits: &HashtagLimits) -> HashtagCheck {
    match entry_error(hashtag, None, limits) {
        Some(err) => HashtagCheck::invalid(err.to_string()),
        None => HashtagCheck::valid(),
    }
}

/// Extract hashtags from text and validate the result in one step
pub fn process_hashtags_from_text(text: &str) -> ProcessedHashtags {
    let hashtags = extract_hashtags(text);
    let validation = validate_hashtags(&hashtags);

    ProcessedHashtags {
        hashtags,
        is_valid: validation.is_valid,
        errors: validation.errors,
    }
}

pub(crate) fn count_error(count: usize, limits: &HashtagLimits) -> Option<HashtagError> {
    (count > limits.max_count).then_some(HashtagError::TooMany {
        max: limits.max_count,
    })
}

pub(crate) fn entry_error(
    hashtag: &str,
    index: Option<usize>,
    limits: &HashtagLimits,
) -> Option<HashtagError> {
    if hashtag.is_empty() {
        return Some(HashtagError::Empty { index });
    }
    if hashtag.chars().count() > limits.max_length {
        return Some(HashtagError::TooLong {
            index,
            max: limits.max_length,
        });
    }
    None
}

pub(crate) fn into_validation(errors: Vec<HashtagError>) -> HashtagValidation {
    HashtagValidation {
        is_valid: errors.is_empty(),
        errors: errors.iter().map(ToString::to_string).collect(),
    }
}
