//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{ContentSanitizer, ImageStore, PostRepository, UserRepository};
use quill_infra::sanitizer::AmmoniaSanitizer;
use quill_infra::storage::LocalImageStore;

use crate::config::{AppConfig, CookieSettings};

#[cfg(feature = "postgres")]
use quill_infra::database::{DatabaseConnection, PostgresPostRepository, PostgresUserRepository};

use quill_infra::database::{InMemoryPostRepository, InMemoryUserRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub images: Arc<dyn ImageStore>,
    pub sanitizer: Arc<dyn ContentSanitizer>,
    pub cookies: CookieSettings,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let images: Arc<dyn ImageStore> = Arc::new(LocalImageStore::new(&config.upload_dir));
        let sanitizer: Arc<dyn ContentSanitizer> = Arc::new(AmmoniaSanitizer::new());

        #[cfg(feature = "postgres")]
        let (users, posts): (Arc<dyn UserRepository>, Arc<dyn PostRepository>) = {
            if let Some(db_config) = &config.database {
                match DatabaseConnection::init(db_config).await {
                    Ok(connection) => (
                        Arc::new(PostgresUserRepository::new(connection.conn.clone())),
                        Arc::new(PostgresPostRepository::new(connection.conn)),
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (
                            Arc::new(InMemoryUserRepository::new()),
                            Arc::new(InMemoryPostRepository::new()),
                        )
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (
                    Arc::new(InMemoryUserRepository::new()),
                    Arc::new(InMemoryPostRepository::new()),
                )
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (users, posts): (Arc<dyn UserRepository>, Arc<dyn PostRepository>) = {
            tracing::info!("Running without postgres feature - using in-memory repositories");
            (
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryPostRepository::new()),
            )
        };

        tracing::info!("Application state initialized");

        Self {
            users,
            posts,
            images,
            sanitizer,
            cookies: config.cookies.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SameSitePolicy;
    use quill_core::domain::User;

    #[tokio::test]
    async fn falls_back_to_in_memory_repositories_without_a_database() {
        let upload_dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origin: String::new(),
            upload_dir: upload_dir.path().to_path_buf(),
            cookies: CookieSettings {
                secure: false,
                same_site: SameSitePolicy::Strict,
            },
            #[cfg(feature = "postgres")]
            database: None,
        };

        let state = AppState::new(&config).await;

        let saved = state
            .users
            .save(User::new("alice".into(), "hash".into()))
            .await
            .unwrap();
        let found = state.users.find_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
    }
}
