//! Post repository trait definition.

use chrono::{DateTime, Utc};
use scribe_types::error::RepositoryError;
use scribe_types::group::GroupId;
use scribe_types::post::{Post, PostId, ValidPost};
use scribe_types::user::UserId;

/// A post about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub text: String,
    pub group: Option<GroupId>,
    pub author: UserId,
    pub pub_date: DateTime<Utc>,
}

/// Filter criteria for listing posts.
///
/// Results are always newest first (`pub_date` descending, then id
/// descending so posts created in the same instant keep a stable order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Only posts in this group.
    pub group: Option<GroupId>,
    /// Only posts by this author.
    pub author: Option<UserId>,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip (offset pagination).
    pub offset: Option<i64>,
}

impl PostFilter {
    pub fn by_group(group: GroupId) -> Self {
        Self {
            group: Some(group),
            ..Default::default()
        }
    }

    pub fn by_author(author: UserId) -> Self {
        Self {
            author: Some(author),
            ..Default::default()
        }
    }

    pub fn with_window(mut self, limit: i64, offset: i64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}

/// Repository trait for post persistence.
///
/// Every returned `Post` carries its author and group already joined.
pub trait PostRepository: Send + Sync {
    /// Insert a post and return it with its assigned id.
    fn create(
        &self,
        post: &NewPost,
    ) -> impl std::future::Future<Output = Result<Post, RepositoryError>> + Send;

    fn get_by_id(
        &self,
        id: PostId,
    ) -> impl std::future::Future<Output = Result<Option<Post>, RepositoryError>> + Send;

    /// Overwrite the editable fields (text, group). `pub_date` and author
    /// stay untouched. Returns `NotFound` if the post does not exist.
    fn update(
        &self,
        id: PostId,
        post: &ValidPost,
    ) -> impl std::future::Future<Output = Result<Post, RepositoryError>> + Send;

    /// List posts matching the filter, honoring `limit`/`offset`.
    fn list(
        &self,
        filter: &PostFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Post>, RepositoryError>> + Send;

    /// Count posts matching the filter (ignores `limit`/`offset`).
    fn count(
        &self,
        filter: &PostFilter,
    ) -> impl std::future::Future<Output = Result<i64, RepositoryError>> + Send;
}
