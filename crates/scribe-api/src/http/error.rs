//! Application error type mapping to HTTP status codes and envelope format.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use scribe_types::error::{GroupError, PostError, UserError};
use scribe_types::form::FormErrors;
use scribe_types::post::PostId;

use crate::http::response::{ApiErrorDetail, ApiResponse};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Post-related errors.
    Post(PostError),
    /// Group-related errors.
    Group(GroupError),
    /// User and token errors.
    User(UserError),
    /// The caller is authenticated but did not write the post.
    NotAuthor(PostId),
    /// Missing or unknown token; `next` is the path the client asked for.
    Unauthorized { message: String, next: String },
    /// Submitted post form did not validate; `context` is the re-rendered page.
    InvalidForm {
        context: serde_json::Value,
        errors: FormErrors,
    },
    /// Request body is not JSON.
    InvalidBody(String),
    /// No route or resource at this path.
    NotFound(String),
}

impl From<PostError> for AppError {
    fn from(e: PostError) -> Self {
        AppError::Post(e)
    }
}

impl From<GroupError> for AppError {
    fn from(e: GroupError) -> Self {
        AppError::Group(e)
    }
}

impl From<UserError> for AppError {
    fn from(e: UserError) -> Self {
        AppError::User(e)
    }
}

impl AppError {
    /// Attach the post id to an author check failure so the response can link back.
    pub fn for_post(e: PostError, id: PostId) -> Self {
        match e {
            PostError::NotAuthor => AppError::NotAuthor(id),
            other => AppError::Post(other),
        }
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Post(PostError::NotFound) => (StatusCode::NOT_FOUND, "POST_NOT_FOUND"),
            AppError::Post(PostError::GroupNotFound(_)) => {
                (StatusCode::NOT_FOUND, "GROUP_NOT_FOUND")
            }
            AppError::Post(PostError::AuthorNotFound(_)) => {
                (StatusCode::NOT_FOUND, "AUTHOR_NOT_FOUND")
            }
            AppError::Post(PostError::NotAuthor) | AppError::NotAuthor(_) => {
                (StatusCode::FORBIDDEN, "NOT_POST_AUTHOR")
            }
            AppError::Post(PostError::Invalid(_)) | AppError::InvalidForm { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::Post(PostError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
            }
            AppError::Group(GroupError::NotFound) => (StatusCode::NOT_FOUND, "GROUP_NOT_FOUND"),
            AppError::Group(GroupError::SlugConflict(_)) => (StatusCode::CONFLICT, "SLUG_CONFLICT"),
            AppError::Group(GroupError::InvalidTitle(_) | GroupError::InvalidSlug(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::Group(GroupError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
            }
            AppError::User(UserError::InvalidToken) | AppError::Unauthorized { .. } => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
            }
            AppError::User(UserError::NotFound) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            AppError::User(UserError::UsernameTaken(_)) => (StatusCode::CONFLICT, "USERNAME_TAKEN"),
            AppError::User(UserError::InvalidUsername(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            AppError::User(UserError::Storage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
            }
            AppError::InvalidBody(_) => (StatusCode::BAD_REQUEST, "INVALID_BODY"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Post(e) => e.to_string(),
            AppError::Group(e) => e.to_string(),
            AppError::User(e) => e.to_string(),
            AppError::NotAuthor(id) => format!("only the author can edit post {id}"),
            AppError::Unauthorized { message, .. } => message.clone(),
            AppError::InvalidForm { .. } => "the submitted post is invalid".to_string(),
            AppError::InvalidBody(reason) => format!("unreadable request body: {reason}"),
            AppError::NotFound(path) => format!("nothing found at {path}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(code, error = %self.message(), "request failed");
        }

        let message = self.message();
        let (data, details, links) = match self {
            AppError::Unauthorized { next, .. } => (
                None,
                Some(serde_json::json!({ "next": next })),
                vec![("login", format!("/auth/login/?next={next}"))],
            ),
            AppError::NotAuthor(id) => (
                None,
                None,
                vec![("post_detail", format!("/api/v1/posts/{id}/"))],
            ),
            AppError::InvalidForm { context, errors } => (
                Some(context),
                serde_json::to_value(errors).ok(),
                Vec::new(),
            ),
            AppError::Post(PostError::Invalid(errors)) => {
                (None, serde_json::to_value(errors).ok(), Vec::new())
            }
            _ => (None, None, Vec::new()),
        };

        let mut body = ApiResponse::error(
            data,
            ApiErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        );
        for (rel, href) in links {
            body = body.with_link(rel, &href);
        }

        (status, Json(body)).into_response()
    }
}
