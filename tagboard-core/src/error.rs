use thiserror::Error;

/// A single reason a hashtag or hashtag list was rejected.
///
/// `index` is the 1-based position in the list being validated, or `None`
/// when a lone candidate is checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashtagError {
    #[error("hashtags must be an array")]
    NotArray,
    #[error("at most {max} hashtags are allowed")]
    TooMany { max: usize },
    #[error("{} must be a string", subject(.index))]
    NotString { index: Option<usize> },
    #[error("{} cannot be empty", subject(.index))]
    Empty { index: Option<usize> },
    #[error("{} must be at most {max} characters", subject(.index))]
    TooLong { index: Option<usize>, max: usize },
    #[error("hashtag is already selected")]
    AlreadySelected,
    #[error("hashtag will be extracted from the post text automatically")]
    AlreadyExtracted,
}

fn subject(index: &Option<usize>) -> String {
    match index {
        Some(n) => format!("hashtag {}", n),
        None => "hashtag".to_string(),
    }
}

pub type BoardResult<T> = Result<T, BoardError>;

/// Failures of the collaborator-facing workflows (posting, sessions,
/// migration). The hashtag and statistics functions never produce these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("no user is signed in")]
    NotSignedIn,
    #[error("a nickname must be set before posting")]
    NicknameRequired,
    #[error("invalid nickname: {0}")]
    InvalidNickname(String),
    #[error("post text cannot be empty")]
    EmptyPost,
    #[error("post text exceeds {max} character limit (current: {actual})")]
    PostTooLong { max: usize, actual: usize },
    #[error("invalid hashtags: {}", .0.join("; "))]
    InvalidHashtags(Vec<String>),
    #[error("invalid category: {0}")]
    InvalidCategory(String),
    #[error("not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_use_one_based_positions() {
        assert_eq!(
            HashtagError::Empty { index: Some(2) }.to_string(),
            "hashtag 2 cannot be empty"
        );
        assert_eq!(
            HashtagError::TooLong { index: Some(1), max: 50 }.to_string(),
            "hashtag 1 must be at most 50 characters"
        );
        assert_eq!(
            HashtagError::NotString { index: None }.to_string(),
            "hashtag must be a string"
        );
    }

    #[test]
    fn test_invalid_hashtags_joins_messages() {
        let err = BoardError::InvalidHashtags(vec![
            "at most 10 hashtags are allowed".to_string(),
            "hashtag 3 cannot be empty".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid hashtags: at most 10 hashtags are allowed; hashtag 3 cannot be empty"
        );
    }
}
