//! Hashtag operations over untyped JSON input.
//!
//! Request bodies and stored documents are not guaranteed to have the shape
//! the typed API expects: text may be missing or a number, hashtag lists may
//! be objects or hold nulls. These entry points accept any `Value` and
//! degrade to empty results or validation errors instead of failing.

use serde_json::Value;
use tagboard_types::{HashtagCheck, HashtagValidation, ProcessedHashtags};

use crate::error::HashtagError;
use crate::hashtag::{self, HashtagLimits};

/// Extract hashtags from a value that should be text; anything else yields
/// no hashtags.
pub fn extract_hashtags_from_value(text: &Value) -> Vec<String> {
    text.as_str()
        .map(hashtag::extract_hashtags)
        .unwrap_or_default()
}

pub fn normalize_hashtag_value(raw: &Value) -> String {
    raw.as_str().map(hashtag::normalize_hashtag).unwrap_or_default()
}

/// Normalize a value that should be a list of hashtags. Non-arrays yield an
/// empty list; non-string entries are dropped.
pub fn normalize_hashtag_values(list: &Value) -> Vec<String> {
    match list.as_array() {
        Some(entries) => hashtag::normalize_hashtags(entries.iter().filter_map(Value::as_str)),
        None => Vec::new(),
    }
}

pub fn validate_hashtag_values(list: &Value) -> HashtagValidation {
    validate_hashtag_values_with(list, &HashtagLimits::default())
}

pub fn validate_hashtag_values_with(list: &Value, limits: &HashtagLimits) -> HashtagValidation {
    let Some(entries) = list.as_array() else {
        return hashtag::into_validation(vec![HashtagError::NotArray]);
    };

    let mut errors = Vec::new();
    if let Some(err) = hashtag::count_error(entries.len(), limits) {
        errors.push(err);
    }
    for (i, entry) in entries.iter().enumerate() {
        let index = Some(i + 1);
        let problem = match entry.as_str() {
            Some(tag) => hashtag::entry_error(tag, index, limits),
            None => Some(HashtagError::NotString { index }),
        };
        errors.extend(problem);
    }

    hashtag::into_validation(errors)
}

pub fn validate_hashtag_value(candidate: &Value) -> HashtagCheck {
    match candidate.as_str() {
        Some(tag) => hashtag::validate_hashtag(tag),
        None => HashtagCheck::invalid(HashtagError::NotString { index: None }.to_string()),
    }
}

pub fn process_hashtags_from_value(text: &Value) -> ProcessedHashtags {
    text.as_str()
        .map(hashtag::process_hashtags_from_text)
        .unwrap_or_else(|| hashtag::process_hashtags_from_text(""))
}
