//! SQLite group repository implementation.

use scribe_core::repository::group::{GroupRepository, NewGroup};
use scribe_types::error::RepositoryError;
use scribe_types::group::{Group, GroupId};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `GroupRepository`.
pub struct SqliteGroupRepository {
    pool: DatabasePool,
}

impl SqliteGroupRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Group.
struct GroupRow {
    id: i64,
    title: String,
    slug: String,
    description: String,
}

impl GroupRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
        })
    }

    fn into_group(self) -> Group {
        Group {
            id: GroupId(self.id),
            title: self.title,
            slug: self.slug,
            description: self.description,
        }
    }
}

fn group_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Group, RepositoryError> {
    GroupRow::from_row(row)
        .map(GroupRow::into_group)
        .map_err(|e| RepositoryError::Query(e.to_string()))
}

impl GroupRepository for SqliteGroupRepository {
    async fn create(&self, group: &NewGroup) -> Result<Group, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO post_groups (title, slug, description) VALUES (?, ?, ?)",
        )
        .bind(&group.title)
        .bind(&group.slug)
        .bind(&group.description)
        .execute(&self.pool.writer)
        .await;

        match result {
            Ok(done) => Ok(Group {
                id: GroupId(done.last_insert_rowid()),
                title: group.title.clone(),
                slug: group.slug.clone(),
                description: group.description.clone(),
            }),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                RepositoryError::Conflict(format!("slug '{}' already exists", group.slug)),
            ),
            Err(e) => Err(RepositoryError::Query(e.to_string())),
        }
    }

    async fn get_by_id(&self, id: GroupId) -> Result<Option<Group>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM post_groups WHERE id = ?")
            .bind(id.0)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(group_from_row).transpose()
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Group>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM post_groups WHERE slug = ?")
            .bind(slug)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        row.as_ref().map(group_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Group>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM post_groups ORDER BY title, id")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        rows.iter().map(group_from_row).collect()
    }
}
