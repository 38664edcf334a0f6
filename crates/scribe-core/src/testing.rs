//! In-memory repository fakes for service tests.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use scribe_types::error::RepositoryError;
use scribe_types::group::{Group, GroupId};
use scribe_types::post::{AuthorRef, GroupRef, Post, PostId, ValidPost};
use scribe_types::user::{User, UserId};

use crate::repository::group::{GroupRepository, NewGroup};
use crate::repository::post::{NewPost, PostFilter, PostRepository};
use crate::repository::user::UserRepository;
use crate::service::token::TokenIssuer;

#[derive(Default)]
struct State {
    users: Vec<(User, Option<String>)>,
    groups: Vec<Group>,
    posts: Vec<StoredPost>,
}

struct StoredPost {
    id: PostId,
    text: String,
    group: Option<GroupId>,
    author: UserId,
    pub_date: chrono::DateTime<Utc>,
}

/// One shared store implementing every repository trait.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, username: &str) -> User {
        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().users.push((user.clone(), None));
        user
    }

    pub fn add_group(&self, title: &str, slug: &str) -> Group {
        let mut state = self.state.lock().unwrap();
        let group = Group {
            id: GroupId(state.groups.len() as i64 + 1),
            title: title.to_string(),
            slug: slug.to_string(),
            description: String::new(),
        };
        state.groups.push(group.clone());
        group
    }
}

impl State {
    fn hydrate(&self, stored: &StoredPost) -> Post {
        let (user, _) = self
            .users
            .iter()
            .find(|(u, _)| u.id == stored.author)
            .expect("post author exists");
        let group = stored.group.and_then(|gid| {
            self.groups.iter().find(|g| g.id == gid).map(|g| GroupRef {
                id: g.id,
                title: g.title.clone(),
                slug: g.slug.clone(),
            })
        });
        Post {
            id: stored.id,
            text: stored.text.clone(),
            pub_date: stored.pub_date,
            author: AuthorRef {
                id: user.id.clone(),
                username: user.username.clone(),
            },
            group,
        }
    }

    fn matching(&self, filter: &PostFilter) -> Vec<&StoredPost> {
        let mut posts: Vec<&StoredPost> = self
            .posts
            .iter()
            .filter(|p| filter.group.is_none_or(|g| p.group == Some(g)))
            .filter(|p| filter.author.as_ref().is_none_or(|a| &p.author == a))
            .collect();
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        posts
    }
}

impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|(u, _)| u.username == user.username) {
            return Err(RepositoryError::Conflict(user.username.clone()));
        }
        state.users.push((user.clone(), None));
        Ok(user.clone())
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|(u, _)| &u.id == id).map(|(u, _)| u.clone()))
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|(u, _)| u.username == username)
            .map(|(u, _)| u.clone()))
    }

    async fn get_by_token_hash(&self, token_hash: &str) -> Result<Option<User>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|(_, h)| h.as_deref() == Some(token_hash))
            .map(|(u, _)| u.clone()))
    }

    async fn store_token(&self, id: &UserId, token_hash: &str) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let entry = state
            .users
            .iter_mut()
            .find(|(u, _)| &u.id == id)
            .ok_or(RepositoryError::NotFound)?;
        entry.1 = Some(token_hash.to_string());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut users: Vec<User> = state.users.iter().map(|(u, _)| u.clone()).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

impl GroupRepository for InMemoryStore {
    async fn create(&self, group: &NewGroup) -> Result<Group, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.groups.iter().any(|g| g.slug == group.slug) {
            return Err(RepositoryError::Conflict(group.slug.clone()));
        }
        let created = Group {
            id: GroupId(state.groups.len() as i64 + 1),
            title: group.title.clone(),
            slug: group.slug.clone(),
            description: group.description.clone(),
        };
        state.groups.push(created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: GroupId) -> Result<Option<Group>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.groups.iter().find(|g| g.id == id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Group>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.groups.iter().find(|g| g.slug == slug).cloned())
    }

    async fn list(&self) -> Result<Vec<Group>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let mut groups = state.groups.clone();
        groups.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(groups)
    }
}

impl PostRepository for InMemoryStore {
    async fn create(&self, post: &NewPost) -> Result<Post, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let stored = StoredPost {
            id: PostId(state.posts.len() as i64 + 1),
            text: post.text.clone(),
            group: post.group,
            author: post.author.clone(),
            pub_date: post.pub_date,
        };
        let hydrated = state.hydrate(&stored);
        state.posts.push(stored);
        Ok(hydrated)
    }

    async fn get_by_id(&self, id: PostId) -> Result<Option<Post>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| state.hydrate(p)))
    }

    async fn update(&self, id: PostId, post: &ValidPost) -> Result<Post, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let stored = state
            .posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;
        stored.text = post.text.clone();
        stored.group = post.group;
        let stored = state.posts.iter().find(|p| p.id == id).expect("just updated");
        Ok(state.hydrate(stored))
    }

    async fn list(&self, filter: &PostFilter) -> Result<Vec<Post>, RepositoryError> {
        let state = self.state.lock().unwrap();
        let offset = filter.offset.unwrap_or(0).max(0) as usize;
        let limit = filter.limit.map_or(usize::MAX, |l| l.max(0) as usize);
        Ok(state
            .matching(filter)
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|p| state.hydrate(p))
            .collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<i64, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state.matching(filter).len() as i64)
    }
}

/// Deterministic token issuer: tokens are `token-1`, `token-2`, ...
#[derive(Default)]
pub struct CountingTokens {
    next: Mutex<u32>,
}

impl TokenIssuer for CountingTokens {
    fn generate_token(&self) -> String {
        let mut next = self.next.lock().unwrap();
        *next += 1;
        format!("token-{next}")
    }

    fn hash_token(&self, token: &str) -> String {
        format!("hashed:{token}")
    }
}
