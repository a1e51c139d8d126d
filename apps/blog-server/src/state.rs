//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    CategoryRepository, CommentRepository, PasswordService, PostRepository, TokenService,
    UserRepository,
};
use quill_core::{BlogController, OwnershipPolicy};
use quill_infra::{Argon2PasswordService, InMemoryStore, JwtTokenService};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use quill_infra::{
    PostgresCategoryRepository, PostgresCommentRepository, PostgresPostRepository,
    PostgresUserRepository,
};

/// The persistent store, as a set of repository handles.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

impl Store {
    pub fn in_memory() -> Self {
        let store = InMemoryStore::with_default_categories();
        Self {
            users: Arc::new(store.users()),
            posts: Arc::new(store.posts()),
            comments: Arc::new(store.comments()),
            categories: Arc::new(store.categories()),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blog: BlogController,
    pub users: Arc<dyn UserRepository>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> (Self, Arc<dyn TokenService>) {
        let store = Self::connect_store(config).await;
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

        tracing::info!(
            ownership_policy = %config.ownership_policy,
            "Application state initialized"
        );

        (Self::from_store(store, config.ownership_policy), tokens)
    }

    pub fn from_store(store: Store, policy: OwnershipPolicy) -> Self {
        Self {
            blog: BlogController::new(store.posts, store.comments, store.categories, policy),
            users: store.users,
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    #[cfg(feature = "postgres")]
    async fn connect_store(config: &AppConfig) -> Store {
        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Store::in_memory();
        };

        match quill_infra::database::connect(db_config).await {
            Ok(conn) => {
                let conn = Arc::new(conn);
                Store {
                    users: Arc::new(PostgresUserRepository::new(conn.clone())),
                    posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                    comments: Arc::new(PostgresCommentRepository::new(conn.clone())),
                    categories: Arc::new(PostgresCategoryRepository::new(conn)),
                }
            }
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Store::in_memory()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect_store(_config: &AppConfig) -> Store {
        tracing::info!("Running without postgres feature - using in-memory store");
        Store::in_memory()
    }
}
