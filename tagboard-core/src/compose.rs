use tagboard_types::{HashtagCheck, NewPost, Post, PostDraft, User};

use crate::board::PostSink;
use crate::config::{Settings, MAX_POST_LENGTH};
use crate::error::{BoardError, BoardResult, HashtagError};
use crate::hashtag::{
    extract_hashtags, normalize_hashtag, normalize_hashtags, validate_hashtag_with,
    validate_hashtags_with, HashtagLimits,
};
use crate::session::SessionProvider;

/// Turns drafts into validated posts
#[derive(Debug, Clone)]
pub struct Composer {
    limits: HashtagLimits,
    max_post_length: usize,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(HashtagLimits::default(), MAX_POST_LENGTH)
    }
}

impl Composer {
    pub fn new(limits: HashtagLimits, max_post_length: usize) -> Self {
        Self {
            limits,
            max_post_length,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.hashtag_limits(), settings.limits.max_post_length)
    }

    /// Hashtags a draft would be saved with: those found in the text first,
    /// then the explicitly chosen ones, normalized and without duplicates.
    pub fn hashtags_for(&self, draft: &PostDraft) -> Vec<String> {
        let extracted = extract_hashtags(&draft.text);
        normalize_hashtags(extracted.iter().chain(draft.hashtags.iter()))
    }

    /// Validate a draft for `user` and build the post to publish
    pub fn prepare(&self, draft: &PostDraft, user: Option<&User>) -> BoardResult<NewPost> {
        let user = user.ok_or(BoardError::NotSignedIn)?;
        let nickname = user.display_name().ok_or(BoardError::NicknameRequired)?;

        let text = draft.text.trim();
        if text.is_empty() {
            return Err(BoardError::EmptyPost);
        }
        let length = text.chars().count();
        if length > self.max_post_length {
            return Err(BoardError::PostTooLong {
                max: self.max_post_length,
                actual: length,
            });
        }

        let hashtags = self.hashtags_for(draft);
        let validation = validate_hashtags_with(&hashtags, &self.limits);
        if !validation.is_valid {
            return Err(BoardError::InvalidHashtags(validation.errors));
        }

        Ok(NewPost {
            text: text.to_string(),
            nickname: nickname.to_string(),
            hashtags,
            user_id: user.uid.clone(),
        })
    }

    /// Check a hashtag typed into the "add custom hashtag" field.
    ///
    /// `selected` holds tags already picked by hand and `extracted` those
    /// found in the post text; the candidate must be new to both and fit in
    /// the remaining room. A blank candidate is rejected silently.
    pub fn check_custom_hashtag(
        &self,
        candidate: &str,
        selected: &[String],
        extracted: &[String],
    ) -> HashtagCheck {
        let tag = normalize_hashtag(candidate);
        if tag.is_empty() {
            return HashtagCheck::rejected();
        }

        let problem = if selected.contains(&tag) {
            Some(HashtagError::AlreadySelected)
        } else if extracted.contains(&tag) {
            Some(HashtagError::AlreadyExtracted)
        } else if selected.len() + extracted.len() + 1 > self.limits.max_count {
            Some(HashtagError::TooMany {
                max: self.limits.max_count,
            })
        } else {
            None
        };

        match problem {
            Some(err) => HashtagCheck::invalid(err.to_string()),
            None => validate_hashtag_with(&tag, &self.limits),
        }
    }
}

/// Validate a draft against the signed-in user and hand it to the sink
pub fn submit_post<S, P>(
    composer: &Composer,
    sessions: &S,
    sink: &mut P,
    draft: &PostDraft,
) -> BoardResult<Post>
where
    S: SessionProvider + ?Sized,
    P: PostSink + ?Sized,
{
    let user = sessions.current_user();
    let new_post = composer.prepare(draft, user.as_ref())?;
    tracing::debug!(hashtags = ?new_post.hashtags, "submitting post");
    sink.publish(new_post)
}
