//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and REST API.
//! Services are generic over repository traits, but AppState pins them to the
//! SQLite implementations.

use std::path::PathBuf;
use std::sync::Arc;

use scribe_core::service::group::GroupService;
use scribe_core::service::post::PostService;
use scribe_core::service::user::UserService;
use scribe_infra::config::{load_global_config, resolve_data_dir};
use scribe_infra::crypto::token::Sha256TokenIssuer;
use scribe_infra::sqlite::group::SqliteGroupRepository;
use scribe_infra::sqlite::pool::{DatabasePool, database_url};
use scribe_infra::sqlite::post::SqlitePostRepository;
use scribe_infra::sqlite::user::SqliteUserRepository;
use scribe_types::config::GlobalConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcretePostService =
    PostService<SqlitePostRepository, SqliteGroupRepository, SqliteUserRepository>;

pub type ConcreteGroupService = GroupService<SqliteGroupRepository>;

pub type ConcreteUserService = UserService<SqliteUserRepository, Sha256TokenIssuer>;

/// Shared application state holding all services.
///
/// Used by both CLI commands and REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<ConcretePostService>,
    pub group_service: Arc<ConcreteGroupService>,
    pub user_service: Arc<ConcreteUserService>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: resolve data dir, load config, connect to DB.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        Ok(Self::from_parts(db_pool, config, data_dir))
    }

    /// Wire services over an already opened pool.
    pub fn from_parts(db_pool: DatabasePool, config: GlobalConfig, data_dir: PathBuf) -> Self {
        let post_service = PostService::new(
            SqlitePostRepository::new(db_pool.clone()),
            SqliteGroupRepository::new(db_pool.clone()),
            SqliteUserRepository::new(db_pool.clone()),
        )
        .with_page_size(config.posts_per_page);

        let group_service = GroupService::new(SqliteGroupRepository::new(db_pool.clone()));
        let user_service =
            UserService::new(SqliteUserRepository::new(db_pool), Sha256TokenIssuer::new());

        Self {
            post_service: Arc::new(post_service),
            group_service: Arc::new(group_service),
            user_service: Arc::new(user_service),
            config: Arc::new(config),
            data_dir,
        }
    }
}
