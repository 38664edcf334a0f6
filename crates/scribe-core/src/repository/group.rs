//! Group repository trait definition.

use scribe_types::error::RepositoryError;
use scribe_types::group::{Group, GroupId};

/// Fields of a group that does not have an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGroup {
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// Repository trait for group persistence.
pub trait GroupRepository: Send + Sync {
    /// Insert a group. Returns `Conflict` if the slug already exists.
    fn create(
        &self,
        group: &NewGroup,
    ) -> impl std::future::Future<Output = Result<Group, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: GroupId,
    ) -> impl std::future::Future<Output = Result<Option<Group>, RepositoryError>> + Send;

    fn get_by_slug(
        &self,
        slug: &str,
    ) -> impl std::future::Future<Output = Result<Option<Group>, RepositoryError>> + Send;

    /// All groups ordered by title.
    fn list(&self) -> impl std::future::Future<Output = Result<Vec<Group>, RepositoryError>> + Send;
}
