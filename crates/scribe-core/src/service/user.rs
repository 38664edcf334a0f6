//! User registration and token authentication.

use chrono::Utc;

use scribe_types::error::{RepositoryError, UserError};
use scribe_types::user::{CreateUserRequest, User, UserId, validate_username};

use crate::repository::user::UserRepository;
use crate::service::token::TokenIssuer;

/// Service for users and their API tokens.
pub struct UserService<U: UserRepository, T: TokenIssuer> {
    user_repo: U,
    tokens: T,
}

impl<U: UserRepository, T: TokenIssuer> UserService<U, T> {
    pub fn new(user_repo: U, tokens: T) -> Self {
        Self { user_repo, tokens }
    }

    /// Register a user and issue their first token.
    ///
    /// Returns the user and the plaintext token; only its hash is stored.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<(User, String), UserError> {
        let username = request.username.trim().to_string();
        validate_username(&username).map_err(UserError::InvalidUsername)?;

        let user = User {
            id: UserId::new(),
            username: username.clone(),
            created_at: Utc::now(),
        };

        let user = self.user_repo.create(&user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => UserError::UsernameTaken(username.clone()),
            other => UserError::Storage(other.to_string()),
        })?;

        let token = self.store_new_token(&user.id).await?;
        tracing::info!(user_id = %user.id, username = %user.username, "user created");

        Ok((user, token))
    }

    /// Replace a user's token with a new one and return it.
    pub async fn issue_token(&self, username: &str) -> Result<String, UserError> {
        let user = self.get_by_username(username).await?;
        let token = self.store_new_token(&user.id).await?;
        tracing::info!(username = %user.username, "API token rotated");
        Ok(token)
    }

    async fn store_new_token(&self, id: &UserId) -> Result<String, UserError> {
        let token = self.tokens.generate_token();
        let hash = self.tokens.hash_token(&token);
        self.user_repo
            .store_token(id, &hash)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => UserError::NotFound,
                other => UserError::Storage(other.to_string()),
            })?;
        Ok(token)
    }

    /// Resolve a bearer token to its owner.
    pub async fn authenticate(&self, token: &str) -> Result<User, UserError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(UserError::InvalidToken);
        }
        let hash = self.tokens.hash_token(token);
        self.user_repo
            .get_by_token_hash(&hash)
            .await
            .map_err(|e| UserError::Storage(e.to_string()))?
            .ok_or(UserError::InvalidToken)
    }

    pub async fn get_by_username(&self, username: &str) -> Result<User, UserError> {
        self.user_repo
            .get_by_username(username)
            .await
            .map_err(|e| UserError::Storage(e.to_string()))?
            .ok_or(UserError::NotFound)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.user_repo
            .list()
            .await
            .map_err(|e| UserError::Storage(e.to_string()))
    }
}
