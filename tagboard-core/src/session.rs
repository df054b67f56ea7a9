use tagboard_types::User;
use uuid::Uuid;

use crate::error::{BoardError, BoardResult};

pub const MAX_NICKNAME_LENGTH: usize = 20;

/// Authentication collaborator.
///
/// The hosted auth service lives behind this trait so the posting workflow
/// can be driven by an in-memory implementation in tests and tools.
pub trait SessionProvider {
    /// The signed-in user, if any
    fn current_user(&self) -> Option<User>;

    /// Sign in without credentials. Keeps the current user if one exists.
    fn sign_in_anonymously(&mut self) -> BoardResult<User>;

    /// Set the display name of the signed-in user
    fn set_nickname(&mut self, nickname: &str) -> BoardResult<User>;
}

/// Trim a nickname and check it is non-empty and within `max` characters
pub fn validate_nickname(nickname: &str, max: usize) -> BoardResult<String> {
    let trimmed = nickname.trim();
    if trimmed.is_empty() {
        return Err(BoardError::InvalidNickname(
            "nickname cannot be empty".to_string(),
        ));
    }
    let length = trimmed.chars().count();
    if length > max {
        return Err(BoardError::InvalidNickname(format!(
            "nickname must be at most {} characters (current: {})",
            max, length
        )));
    }
    Ok(trimmed.to_string())
}

/// In-process anonymous sessions, one user at a time
#[derive(Debug, Clone)]
pub struct AnonymousSessions {
    current: Option<User>,
    max_nickname_length: usize,
}

impl Default for AnonymousSessions {
    fn default() -> Self {
        Self::new(MAX_NICKNAME_LENGTH)
    }
}

impl AnonymousSessions {
    pub fn new(max_nickname_length: usize) -> Self {
        Self {
            current: None,
            max_nickname_length,
        }
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.current.take() {
            tracing::info!("Signed out user {}", user.uid);
        }
    }
}

impl SessionProvider for AnonymousSessions {
    fn current_user(&self) -> Option<User> {
        self.current.clone()
    }

    fn sign_in_anonymously(&mut self) -> BoardResult<User> {
        if let Some(user) = &self.current {
            return Ok(user.clone());
        }

        let user = User {
            uid: Uuid::new_v4().to_string(),
            nickname: None,
            is_anonymous: true,
        };
        tracing::info!("Signed in anonymous user {}", user.uid);
        self.current = Some(user.clone());
        Ok(user)
    }

    fn set_nickname(&mut self, nickname: &str) -> BoardResult<User> {
        let nickname = validate_nickname(nickname, self.max_nickname_length)?;
        let user = self.current.as_mut().ok_or(BoardError::NotSignedIn)?;

        tracing::debug!("Setting nickname for user {}", user.uid);
        user.nickname = Some(nickname);
        Ok(user.clone())
    }
}
