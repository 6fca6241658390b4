//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PostStore, UploadStore};
use quill_infra::{InMemoryPostStore, LocalUploadStorage};

#[cfg(feature = "postgres")]
use quill_infra::{DatabaseHandle, PostgresPostStore};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub uploads: Arc<dyn UploadStore>,
    #[cfg(feature = "postgres")]
    db: Option<Arc<DatabaseHandle>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// A store that cannot be reached is logged, and the server keeps
    /// running on the in-memory store.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        let uploads: Arc<dyn UploadStore> = Arc::new(LocalUploadStorage::new(
            &config.public_dir,
            config.upload_subdir.as_str(),
            config.upload_max_bytes,
        )?);

        #[cfg(feature = "postgres")]
        let (db, posts): (Option<Arc<DatabaseHandle>>, Arc<dyn PostStore>) = {
            if let Some(db_config) = &config.database {
                match DatabaseHandle::init(db_config).await {
                    Ok(handle) => {
                        let handle = Arc::new(handle);
                        let store = Arc::new(PostgresPostStore::new(handle.clone()));
                        (Some(handle), store)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (None, Arc::new(InMemoryPostStore::new()))
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Arc::new(InMemoryPostStore::new()))
            }
        };

        #[cfg(not(feature = "postgres"))]
        let posts: Arc<dyn PostStore> = {
            if config.database.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            tracing::info!("Running without postgres feature - using in-memory store");
            Arc::new(InMemoryPostStore::new())
        };

        tracing::info!("Application state initialized");

        Ok(Self {
            posts,
            uploads,
            #[cfg(feature = "postgres")]
            db,
        })
    }

    /// State over explicit stores, with no database handle to close.
    pub fn with_stores(posts: Arc<dyn PostStore>, uploads: Arc<dyn UploadStore>) -> Self {
        Self {
            posts,
            uploads,
            #[cfg(feature = "postgres")]
            db: None,
        }
    }

    /// Release the store connection. Call only once the listener has stopped.
    pub async fn close(&self) {
        #[cfg(feature = "postgres")]
        if let Some(db) = &self.db {
            if let Err(e) = db.close().await {
                tracing::error!(error = %e, "Failed to close database connection");
            }
        }
    }
}
