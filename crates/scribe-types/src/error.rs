use thiserror::Error;

use crate::form::FormErrors;

/// Errors related to post operations.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("post not found")]
    NotFound,

    #[error("only the author can edit this post")]
    NotAuthor,

    #[error("group '{0}' not found")]
    GroupNotFound(String),

    #[error("author '{0}' not found")]
    AuthorNotFound(String),

    #[error("invalid post: {0}")]
    Invalid(FormErrors),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors related to group operations.
#[derive(Debug, Error)]
pub enum GroupError {
    #[error("group not found")]
    NotFound,

    #[error("slug '{0}' already exists")]
    SlugConflict(String),

    #[error("invalid group title: {0}")]
    InvalidTitle(String),

    #[error("invalid group slug: '{0}'")]
    InvalidSlug(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors related to users and their API tokens.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,

    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("invalid username: {0}")]
    InvalidUsername(String),

    #[error("invalid API token")]
    InvalidToken,

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors from repository operations (used by trait definitions in scribe-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::REQUIRED_MESSAGE;

    #[test]
    fn test_group_error_display() {
        let err = GroupError::SlugConflict("test-slug".to_string());
        assert_eq!(err.to_string(), "slug 'test-slug' already exists");
    }

    #[test]
    fn test_post_error_display_includes_fields() {
        let mut errors = FormErrors::new();
        errors.add("text", REQUIRED_MESSAGE);
        let err = PostError::Invalid(errors);
        assert!(err.to_string().contains("text"));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
