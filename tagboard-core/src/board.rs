use chrono::Utc;
use tagboard_types::{NewPost, Post};
use uuid::Uuid;

use crate::error::{BoardError, BoardResult};

/// Read side of the post store: a stable snapshot for one computation
pub trait PostSource {
    /// All posts, newest first
    fn snapshot(&self) -> BoardResult<Vec<Post>>;
}

/// Write side of the post store
pub trait PostSink {
    /// Persist a validated post, assigning its id and creation time
    fn publish(&mut self, post: NewPost) -> BoardResult<Post>;
}

/// Post store kept in memory, used by tools and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryBoard {
    posts: Vec<Post>,
}

impl MemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing posts, e.g. loaded from an export
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn get(&self, id: &str) -> BoardResult<&Post> {
        self.posts
            .iter()
            .find(|post| post.id == id)
            .ok_or_else(|| BoardError::NotFound(format!("post {}", id)))
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl PostSource for MemoryBoard {
    fn snapshot(&self) -> BoardResult<Vec<Post>> {
        let mut posts = self.posts.clone();
        // equal timestamps: later insert first
        posts.reverse();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

impl PostSink for MemoryBoard {
    fn publish(&mut self, post: NewPost) -> BoardResult<Post> {
        let post = Post {
            id: Uuid::new_v4().to_string(),
            text: post.text,
            nickname: post.nickname,
            hashtags: post.hashtags,
            created_at: Utc::now(),
            user_id: post.user_id,
        };

        tracing::info!("Created post {} with {} hashtags", post.id, post.hashtags.len());
        self.posts.push(post.clone());
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(text: &str, hashtags: &[&str]) -> NewPost {
        NewPost {
            text: text.to_string(),
            nickname: "ferris".to_string(),
            hashtags: hashtags.iter().map(|s| s.to_string()).collect(),
            user_id: "u1".to_string(),
        }
    }

    #[test]
    fn test_publish_assigns_id() {
        let mut board = MemoryBoard::new();
        let post = board.publish(new_post("hello #rust", &["rust"])).unwrap();
        assert!(!post.id.is_empty());
        assert_eq!(board.len(), 1);
        assert_eq!(board.get(&post.id).unwrap(), &post);
    }

    #[test]
    fn test_snapshot_is_newest_first() {
        let mut board = MemoryBoard::new();
        let first = board.publish(new_post("one", &[])).unwrap();
        let second = board.publish(new_post("two", &[])).unwrap();

        let ids: Vec<String> = board.snapshot().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_get_missing_post() {
        let board = MemoryBoard::new();
        assert!(matches!(board.get("nope"), Err(BoardError::NotFound(_))));
    }
}
