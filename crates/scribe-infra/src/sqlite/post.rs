//! SQLite post repository implementation.
//!
//! Posts are always read joined with their author and (optional) group, so a
//! listing page costs one query regardless of its size.

use scribe_core::repository::post::{NewPost, PostFilter, PostRepository};
use scribe_types::error::RepositoryError;
use scribe_types::group::GroupId;
use scribe_types::post::{AuthorRef, GroupRef, Post, PostId, ValidPost};
use scribe_types::user::UserId;
use sqlx::sqlite::{Sqlite, SqlitePool};
use sqlx::{QueryBuilder, Row};

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime};

const SELECT_POSTS: &str = "SELECT p.id, p.text, p.pub_date, p.author_id, \
     u.username AS author_username, p.group_id, g.title AS group_title, g.slug AS group_slug \
     FROM posts p \
     JOIN users u ON u.id = p.author_id \
     LEFT JOIN post_groups g ON g.id = p.group_id";

/// SQLite-backed implementation of `PostRepository`.
pub struct SqlitePostRepository {
    pool: DatabasePool,
}

impl SqlitePostRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(
        &self,
        executor: &SqlitePool,
        id: PostId,
    ) -> Result<Option<Post>, RepositoryError> {
        let sql = format!("{SELECT_POSTS} WHERE p.id = ?");
        let row = sqlx::query(&sql)
            .bind(id.0)
            .fetch_optional(executor)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let post_row =
                    PostRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(post_row.into_post()?))
            }
            None => Ok(None),
        }
    }
}

/// Internal row type for mapping joined SQLite rows to domain Post.
struct PostRow {
    id: i64,
    text: String,
    pub_date: String,
    author_id: String,
    author_username: String,
    group_id: Option<i64>,
    group_title: Option<String>,
    group_slug: Option<String>,
}

impl PostRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            text: row.try_get("text")?,
            pub_date: row.try_get("pub_date")?,
            author_id: row.try_get("author_id")?,
            author_username: row.try_get("author_username")?,
            group_id: row.try_get("group_id")?,
            group_title: row.try_get("group_title")?,
            group_slug: row.try_get("group_slug")?,
        })
    }

    fn into_post(self) -> Result<Post, RepositoryError> {
        let author_id = self
            .author_id
            .parse::<UserId>()
            .map_err(|e| RepositoryError::Query(format!("invalid author id: {e}")))?;

        let group = match (self.group_id, self.group_title, self.group_slug) {
            (Some(id), Some(title), Some(slug)) => Some(GroupRef {
                id: GroupId(id),
                title,
                slug,
            }),
            _ => None,
        };

        Ok(Post {
            id: PostId(self.id),
            text: self.text,
            pub_date: parse_datetime(&self.pub_date)?,
            author: AuthorRef {
                id: author_id,
                username: self.author_username,
            },
            group,
        })
    }
}

/// Append the WHERE clause for `filter` with bound parameters.
fn push_conditions(qb: &mut QueryBuilder<'_, Sqlite>, filter: &PostFilter) {
    let mut separator = " WHERE ";
    if let Some(group) = filter.group {
        qb.push(separator).push("p.group_id = ").push_bind(group.0);
        separator = " AND ";
    }
    if let Some(author) = &filter.author {
        qb.push(separator)
            .push("p.author_id = ")
            .push_bind(author.to_string());
    }
}

impl PostRepository for SqlitePostRepository {
    async fn create(&self, post: &NewPost) -> Result<Post, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO posts (text, pub_date, author_id, group_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&post.text)
        .bind(format_datetime(&post.pub_date))
        .bind(post.author.to_string())
        .bind(post.group.map(|g| g.0))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let id = PostId(result.last_insert_rowid());
        self.fetch_by_id(&self.pool.writer, id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_id(&self, id: PostId) -> Result<Option<Post>, RepositoryError> {
        self.fetch_by_id(&self.pool.reader, id).await
    }

    async fn update(&self, id: PostId, post: &ValidPost) -> Result<Post, RepositoryError> {
        let result = sqlx::query("UPDATE posts SET text = ?, group_id = ? WHERE id = ?")
            .bind(&post.text)
            .bind(post.group.map(|g| g.0))
            .bind(id.0)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.fetch_by_id(&self.pool.writer, id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_POSTS);
        push_conditions(&mut qb, filter);
        qb.push(" ORDER BY p.pub_date DESC, p.id DESC");

        match (filter.limit, filter.offset) {
            (Some(limit), offset) => {
                qb.push(" LIMIT ").push_bind(limit);
                if let Some(offset) = offset {
                    qb.push(" OFFSET ").push_bind(offset);
                }
            }
            // SQLite needs a LIMIT before OFFSET; -1 means unbounded.
            (None, Some(offset)) => {
                qb.push(" LIMIT -1 OFFSET ").push_bind(offset);
            }
            (None, None) => {}
        }

        let rows = qb
            .build()
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in &rows {
            let post_row =
                PostRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            posts.push(post_row.into_post()?);
        }
        Ok(posts)
    }

    async fn count(&self, filter: &PostFilter) -> Result<i64, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM posts p");
        push_conditions(&mut qb, filter);

        qb.build_query_scalar::<i64>()
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))
    }
}
