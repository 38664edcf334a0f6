//! Post service: listings, detail, and author-only create/edit.
//!
//! Every listing goes through the same path: count the matching rows, let the
//! [`Paginator`] resolve the requested page, then fetch exactly that window.

use chrono::Utc;

use scribe_types::error::{PostError, RepositoryError};
use scribe_types::form::{FormDescriptor, FormErrors};
use scribe_types::group::Group;
use scribe_types::post::{Post, PostId, PostInput};
use scribe_types::user::User;

use crate::form::{PostForm, Submission};
use crate::pagination::{DEFAULT_PAGE_SIZE, Page, Paginator};
use crate::repository::group::GroupRepository;
use crate::repository::post::{NewPost, PostFilter, PostRepository};
use crate::repository::user::UserRepository;

/// Posts of one group, with the group itself.
#[derive(Debug, Clone)]
pub struct GroupPage {
    pub group: Group,
    pub page: Page<Post>,
}

/// Posts of one author, with the author.
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub author: User,
    pub page: Page<Post>,
}

/// An existing post together with its pre-filled edit form.
#[derive(Debug, Clone)]
pub struct EditForm {
    pub post: Post,
    pub form: FormDescriptor,
}

/// Service for reading and writing posts.
///
/// Generic over repository traits so the core never depends on scribe-infra.
pub struct PostService<P: PostRepository, G: GroupRepository, U: UserRepository> {
    post_repo: P,
    group_repo: G,
    user_repo: U,
    per_page: u32,
}

impl<P: PostRepository, G: GroupRepository, U: UserRepository> PostService<P, G, U> {
    pub fn new(post_repo: P, group_repo: G, user_repo: U) -> Self {
        Self {
            post_repo,
            group_repo,
            user_repo,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the page size (`posts_per_page` in config.toml).
    pub fn with_page_size(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    async fn paginate(&self, filter: PostFilter, page: Option<&str>) -> Result<Page<Post>, PostError> {
        let count = self
            .post_repo
            .count(&filter)
            .await
            .map_err(|e| PostError::Storage(e.to_string()))?;

        let paginator = Paginator::new(count, self.per_page);
        let number = paginator.get_page(page);
        let (limit, offset) = paginator.window(number);

        let items = self
            .post_repo
            .list(&filter.with_window(limit, offset))
            .await
            .map_err(|e| PostError::Storage(e.to_string()))?;

        Ok(Page::new(items, number, &paginator))
    }

    /// Site-wide feed, newest first.
    pub async fn index(&self, page: Option<&str>) -> Result<Page<Post>, PostError> {
        self.paginate(PostFilter::default(), page).await
    }

    /// Posts published in the group with the given slug.
    pub async fn group_posts(&self, slug: &str, page: Option<&str>) -> Result<GroupPage, PostError> {
        let group = self
            .group_repo
            .get_by_slug(slug)
            .await
            .map_err(|e| PostError::Storage(e.to_string()))?
            .ok_or_else(|| PostError::GroupNotFound(slug.to_string()))?;

        let page = self.paginate(PostFilter::by_group(group.id), page).await?;
        Ok(GroupPage { group, page })
    }

    /// Posts written by the user with the given username.
    pub async fn profile(&self, username: &str, page: Option<&str>) -> Result<ProfilePage, PostError> {
        let author = self
            .user_repo
            .get_by_username(username)
            .await
            .map_err(|e| PostError::Storage(e.to_string()))?
            .ok_or_else(|| PostError::AuthorNotFound(username.to_string()))?;

        let page = self
            .paginate(PostFilter::by_author(author.id.clone()), page)
            .await?;
        Ok(ProfilePage { author, page })
    }

    pub async fn post_detail(&self, id: PostId) -> Result<Post, PostError> {
        self.post_repo
            .get_by_id(id)
            .await
            .map_err(|e| PostError::Storage(e.to_string()))?
            .ok_or(PostError::NotFound)
    }

    async fn groups(&self) -> Result<Vec<Group>, PostError> {
        self.group_repo
            .list()
            .await
            .map_err(|e| PostError::Storage(e.to_string()))
    }

    /// Empty form for a new post.
    pub async fn create_form(&self) -> Result<FormDescriptor, PostError> {
        Ok(PostForm::describe(&self.groups().await?, None))
    }

    /// Form carrying rejected input and its errors, to send back to the client.
    pub async fn form_with_errors(
        &self,
        input: &PostInput,
        errors: FormErrors,
    ) -> Result<FormDescriptor, PostError> {
        Ok(PostForm::describe_bound(&self.groups().await?, input).with_errors(errors))
    }

    /// Publish a post as `author`.
    pub async fn create_post(
        &self,
        author: &User,
        submission: impl Into<Submission>,
    ) -> Result<Post, PostError> {
        let submission = submission.into();
        let valid = PostForm::bind_submission(&submission, &self.groups().await?)
            .map_err(PostError::Invalid)?;

        let new_post = NewPost {
            text: valid.text,
            group: valid.group,
            author: author.id.clone(),
            pub_date: Utc::now(),
        };

        let post = self
            .post_repo
            .create(&new_post)
            .await
            .map_err(|e| PostError::Storage(e.to_string()))?;

        tracing::info!(post_id = %post.id, author = %author.username, "post created");
        Ok(post)
    }

    async fn owned_post(&self, user: &User, id: PostId) -> Result<Post, PostError> {
        let post = self.post_detail(id).await?;
        if !post.is_authored_by(&user.id) {
            tracing::debug!(post_id = %id, user = %user.username, "edit refused, not the author");
            return Err(PostError::NotAuthor);
        }
        Ok(post)
    }

    /// Edit form pre-filled with the post's current values (author only).
    pub async fn edit_form(&self, user: &User, id: PostId) -> Result<EditForm, PostError> {
        let post = self.owned_post(user, id).await?;
        let form = PostForm::describe(&self.groups().await?, Some(&post));
        Ok(EditForm { post, form })
    }

    /// Replace text and group of a post (author only).
    pub async fn edit_post(
        &self,
        user: &User,
        id: PostId,
        submission: impl Into<Submission>,
    ) -> Result<Post, PostError> {
        let submission = submission.into();
        self.owned_post(user, id).await?;
        let valid = PostForm::bind_submission(&submission, &self.groups().await?)
            .map_err(PostError::Invalid)?;

        let post = self
            .post_repo
            .update(id, &valid)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => PostError::NotFound,
                other => PostError::Storage(other.to_string()),
            })?;

        tracing::info!(post_id = %post.id, author = %user.username, "post edited");
        Ok(post)
    }
}
