use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// Custom serde module for DateTime to ensure RFC3339 string format
mod datetime_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<DateTime<Utc>>().map_err(serde::de::Error::custom)
    }
}

/// A board member. Anonymous sign-in yields a user without a nickname;
/// posting requires one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    #[serde(default)]
    pub nickname: Option<String>,
    pub is_anonymous: bool,
}

impl User {
    /// Nickname if one has been set and is not blank
    pub fn display_name(&self) -> Option<&str> {
        self.nickname
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// A finalized post as seen by the statistics engine.
///
/// Posts are never mutated after creation. `created_at` is only an ordering
/// key for the surrounding application; the hashtag engine never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub text: String,
    pub nickname: String,
    pub hashtags: Vec<String>,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

/// A post record as stored by the document database.
///
/// Older records carry a single `categoryId` instead of a hashtag list, and
/// hashtag lists written by old clients may hold non-string entries. Fields
/// this type does not know about are kept in `extra` so records survive a
/// read/modify/write cycle unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Value>,
    #[serde(with = "datetime_format")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawPost {
    /// Legacy records have a category set and no hashtag list
    pub fn is_legacy(&self) -> bool {
        !is_set(self.hashtags.as_ref()) && is_set(self.category_id.as_ref())
    }

    /// Records that already carry a hashtag field of any shape
    pub fn has_hashtag_field(&self) -> bool {
        is_set(self.hashtags.as_ref())
    }

    /// The legacy category, if it is a string
    pub fn category_str(&self) -> Option<&str> {
        self.category_id.as_ref().and_then(Value::as_str)
    }

    /// The hashtag list, if the stored field is an array
    pub fn hashtag_entries(&self) -> Option<&[Value]> {
        self.hashtags
            .as_ref()
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }
}

/// Whether a stored field counts as present: null, false, zero and the
/// empty string do not.
fn is_set(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawPost {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_legacy_record_detection() {
        let legacy = raw(json!({
            "id": "p1",
            "text": "hello",
            "categoryId": "感想",
            "createdAt": "2024-05-01T10:00:00Z"
        }));
        assert!(legacy.is_legacy());
        assert_eq!(legacy.category_str(), Some("感想"));

        let migrated = raw(json!({
            "id": "p2",
            "categoryId": "感想",
            "hashtags": ["感想"],
            "createdAt": "2024-05-01T10:00:00Z"
        }));
        assert!(!migrated.is_legacy());
        assert!(migrated.has_hashtag_field());

        let blank_category = raw(json!({
            "id": "p3",
            "categoryId": "",
            "createdAt": "2024-05-01T10:00:00Z"
        }));
        assert!(!blank_category.is_legacy());
    }

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let record = raw(json!({
            "id": "p1",
            "categoryId": "質問",
            "createdAt": "2024-05-01T10:00:00Z",
            "likes": 3
        }));
        assert_eq!(record.extra.get("likes"), Some(&json!(3)));

        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["likes"], json!(3));
        assert_eq!(back["categoryId"], json!("質問"));
        assert!(back.get("hashtags").is_none());
    }

    #[test]
    fn test_non_array_hashtags_have_no_entries() {
        let record = raw(json!({
            "id": "p1",
            "hashtags": "rust",
            "createdAt": "2024-05-01T10:00:00Z"
        }));
        assert!(record.hashtag_entries().is_none());
        assert!(!record.is_legacy());
    }

    #[test]
    fn test_display_name_ignores_blank_nickname() {
        let user = User {
            uid: "u1".to_string(),
            nickname: Some("   ".to_string()),
            is_anonymous: true,
        };
        assert_eq!(user.display_name(), None);
    }
}

/// What the author typed: free text plus explicitly chosen hashtags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub text: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
}

/// A validated post ready to be handed to the post sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub text: String,
    pub nickname: String,
    pub hashtags: Vec<String>,
    pub user_id: String,
}
