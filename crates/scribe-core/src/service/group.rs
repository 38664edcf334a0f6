//! Group management service.

use scribe_types::error::{GroupError, RepositoryError};
use scribe_types::group::{
    CreateGroupRequest, GROUP_TITLE_MAX_LEN, Group, is_valid_slug, slugify,
};

use crate::repository::group::{GroupRepository, NewGroup};

/// Service creating and looking up groups.
pub struct GroupService<G: GroupRepository> {
    group_repo: G,
}

impl<G: GroupRepository> GroupService<G> {
    pub fn new(group_repo: G) -> Self {
        Self { group_repo }
    }

    /// Create a group.
    ///
    /// The title is trimmed and must be 1..=200 characters. When no slug is
    /// given it is derived from the title; an explicit slug must already be
    /// URL-safe. A taken slug is reported as `SlugConflict` rather than
    /// silently suffixed, since group URLs are chosen by hand.
    pub async fn create_group(&self, request: CreateGroupRequest) -> Result<Group, GroupError> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(GroupError::InvalidTitle("title cannot be empty".to_string()));
        }
        if title.chars().count() > GROUP_TITLE_MAX_LEN {
            return Err(GroupError::InvalidTitle(format!(
                "title must be at most {GROUP_TITLE_MAX_LEN} characters"
            )));
        }

        let slug = match request.slug {
            Some(slug) => slug.trim().to_string(),
            None => {
                let derived = slugify(&title);
                if derived.is_empty() {
                    return Err(GroupError::InvalidTitle(format!(
                        "cannot derive a slug from '{title}' (no ASCII letters or digits); pass an explicit slug"
                    )));
                }
                derived
            }
        };
        if !is_valid_slug(&slug) {
            return Err(GroupError::InvalidSlug(slug));
        }

        let new_group = NewGroup {
            title,
            slug: slug.clone(),
            description: request.description.unwrap_or_default(),
        };

        let group = self
            .group_repo
            .create(&new_group)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => GroupError::SlugConflict(slug.clone()),
                other => GroupError::Storage(other.to_string()),
            })?;

        tracing::info!(group_id = %group.id, slug = %group.slug, "group created");
        Ok(group)
    }

    pub async fn get_group_by_slug(&self, slug: &str) -> Result<Group, GroupError> {
        self.group_repo
            .get_by_slug(slug)
            .await
            .map_err(|e| GroupError::Storage(e.to_string()))?
            .ok_or(GroupError::NotFound)
    }

    pub async fn list_groups(&self) -> Result<Vec<Group>, GroupError> {
        self.group_repo
            .list()
            .await
            .map_err(|e| GroupError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;

    fn request(title: &str, slug: Option<&str>) -> CreateGroupRequest {
        CreateGroupRequest {
            title: title.to_string(),
            slug: slug.map(str::to_string),
            description: Some("Test description".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_group_derives_slug() {
        let svc = GroupService::new(InMemoryStore::new());
        let group = svc.create_group(request("Cats and Dogs", None)).await.unwrap();
        assert_eq!(group.slug, "cats-and-dogs");
        assert_eq!(group.description, "Test description");

        let found = svc.get_group_by_slug("cats-and-dogs").await.unwrap();
        assert_eq!(found, group);
    }

    #[tokio::test]
    async fn test_create_group_explicit_slug() {
        let svc = GroupService::new(InMemoryStore::new());
        let group = svc
            .create_group(request("Test title", Some("test-slug")))
            .await
            .unwrap();
        assert_eq!(group.slug, "test-slug");
    }

    #[tokio::test]
    async fn test_create_group_slug_conflict() {
        let svc = GroupService::new(InMemoryStore::new());
        svc.create_group(request("One", Some("same"))).await.unwrap();
        let err = svc
            .create_group(request("Two", Some("same")))
            .await
            .unwrap_err();
        assert!(matches!(err, GroupError::SlugConflict(s) if s == "same"));
    }

    #[tokio::test]
    async fn test_create_group_rejects_bad_input() {
        let svc = GroupService::new(InMemoryStore::new());
        assert!(matches!(
            svc.create_group(request("   ", None)).await.unwrap_err(),
            GroupError::InvalidTitle(_)
        ));
        assert!(matches!(
            svc.create_group(request(&"x".repeat(201), None))
                .await
                .unwrap_err(),
            GroupError::InvalidTitle(_)
        ));
        assert!(matches!(
            svc.create_group(request("Fine", Some("Not A Slug")))
                .await
                .unwrap_err(),
            GroupError::InvalidSlug(_)
        ));
        assert!(matches!(
            svc.create_group(request("!!!", None)).await.unwrap_err(),
            GroupError::InvalidTitle(_)
        ));
    }

    #[tokio::test]
    async fn test_create_group_cyrillic_title() {
        let svc = GroupService::new(InMemoryStore::new());

        let err = svc
            .create_group(request("Тестовая группа", None))
            .await
            .unwrap_err();
        assert!(matches!(&err, GroupError::InvalidTitle(msg) if msg.contains("explicit slug")));

        let group = svc
            .create_group(request("Тестовая группа", Some("test-group")))
            .await
            .unwrap();
        assert_eq!(group.title, "Тестовая группа");
        assert_eq!(group.slug, "test-group");

        let group = svc.create_group(request("Группа 2024", None)).await.unwrap();
        assert_eq!(group.slug, "2024");
    }

    #[tokio::test]
    async fn test_get_unknown_group() {
        let svc = GroupService::new(InMemoryStore::new());
        assert!(matches!(
            svc.get_group_by_slug("missing").await.unwrap_err(),
            GroupError::NotFound
        ));
    }

    #[tokio::test]
    async fn test_list_groups_sorted_by_title() {
        let svc = GroupService::new(InMemoryStore::new());
        svc.create_group(request("Beta", None)).await.unwrap();
        svc.create_group(request("Alpha", None)).await.unwrap();
        let titles: Vec<String> = svc
            .list_groups()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["Alpha", "Beta"]);
    }
}
