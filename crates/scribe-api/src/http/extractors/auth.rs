//! API token authentication extractor.
//!
//! Extracts the caller's token from:
//! - `Authorization: Bearer <token>` header
//! - `X-API-Key: <token>` header
//!
//! Tokens are SHA-256 hashed and looked up through the user service.

use axum::extract::{FromRequestParts, OriginalUri};
use axum::http::request::Parts;

use scribe_types::error::UserError;
use scribe_types::user::User;

use crate::http::error::AppError;
use crate::state::AppState;

/// The authenticated user. Extracting this validates the token.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Nested routers see a stripped path; `next` must be the full one.
        let next = parts
            .extensions
            .get::<OriginalUri>()
            .map_or_else(|| parts.uri.path(), |original| original.0.path())
            .to_string();

        let Some(token) = extract_token(parts) else {
            return Err(AppError::Unauthorized {
                message: "Missing API token. Provide it via 'Authorization: Bearer <token>' or 'X-API-Key: <token>' header; issue one with `scribe token <username>`.".to_string(),
                next,
            });
        };

        match state.user_service.authenticate(&token).await {
            Ok(user) => Ok(CurrentUser(user)),
            Err(UserError::InvalidToken) => Err(AppError::Unauthorized {
                message: "Invalid API token.".to_string(),
                next,
            }),
            Err(e) => Err(AppError::User(e)),
        }
    }
}

/// Extract the token from request headers. Undecodable or empty values count as missing.
fn extract_token(parts: &Parts) -> Option<String> {
    let bearer = parts
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let api_key = || {
        parts
            .headers
            .get("x-api-key")
            .and_then(|value| value.to_str().ok())
    };

    bearer
        .or_else(api_key)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
