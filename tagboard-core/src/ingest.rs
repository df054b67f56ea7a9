use tagboard_types::{Post, RawPost};

use crate::legacy::convert_category_to_hashtags;

/// Turn a stored record into a `Post` for the statistics engine.
///
/// Records without a hashtag list fall back to their legacy category. String
/// entries are kept as stored (the statistics skip blank ones); entries of
/// any other type are dropped.
pub fn into_post(raw: RawPost) -> Post {
    let hashtags = match raw.hashtag_entries() {
        Some(entries) => entries
            .iter()
            .filter_map(|entry| entry.as_str().map(str::to_string))
            .collect(),
        None if raw.is_legacy() => raw
            .category_str()
            .map(convert_category_to_hashtags)
            .unwrap_or_default(),
        None => Vec::new(),
    };

    Post {
        id: raw.id,
        text: raw.text,
        nickname: raw.nickname,
        hashtags,
        created_at: raw.created_at,
        user_id: raw.user_id,
    }
}

pub fn ingest_posts(records: Vec<RawPost>) -> Vec<Post> {
    records.into_iter().map(into_post).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn raw(value: Value) -> RawPost {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_hashtag_list_is_kept_verbatim() {
        let post = into_post(raw(json!({
            "id": "p1",
            "text": "#Rust",
            "nickname": "ferris",
            "hashtags": ["Rust", null, 3, "  "],
            "createdAt": "2024-05-01T10:00:00Z",
            "userId": "u1"
        })));
        assert_eq!(post.hashtags, vec!["Rust", "  "]);
        assert_eq!(post.nickname, "ferris");
        assert_eq!(post.user_id, "u1");
    }

    #[test]
    fn test_legacy_category_fallback() {
        let post = into_post(raw(json!({
            "id": "p1",
            "categoryId": " Notice ",
            "createdAt": "2024-05-01T10:00:00Z"
        })));
        assert_eq!(post.hashtags, vec!["notice"]);
    }

    #[test]
    fn test_hashtag_list_wins_over_category() {
        let post = into_post(raw(json!({
            "id": "p1",
            "categoryId": "感想",
            "hashtags": [],
            "createdAt": "2024-05-01T10:00:00Z"
        })));
        assert!(post.hashtags.is_empty());
    }

    #[test]
    fn test_malformed_hashtag_field() {
        let post = into_post(raw(json!({
            "id": "p1",
            "categoryId": "感想",
            "hashtags": "感想",
            "createdAt": "2024-05-01T10:00:00Z"
        })));
        assert!(post.hashtags.is_empty());
    }
}
