//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use videotime_core::config::{AppConfig, StoreBackend};
use videotime_core::result::AppResult;
use videotime_database::memory::{MemoryInstanceStore, MemoryWatchSessionStore};
use videotime_database::migration::run_migrations;
use videotime_database::repositories::{InstanceRepository, WatchSessionRepository};
use videotime_database::{DatabasePool, InstanceStore, WatchSessionStore};
use videotime_plugin::PluginManager;
use videotime_service::{InstanceService, PrivacyService, WatchSessionTracker};

/// The storage backends the services run on.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Watch session persistence.
    pub sessions: Arc<dyn WatchSessionStore>,
    /// Instance settings persistence.
    pub instances: Arc<dyn InstanceStore>,
    /// PostgreSQL pool, when that backend is in use.
    pub db: Option<DatabasePool>,
}

impl Stores {
    /// Process-local stores.
    pub fn memory() -> Self {
        Self {
            sessions: Arc::new(MemoryWatchSessionStore::new()),
            instances: Arc::new(MemoryInstanceStore::new()),
            db: None,
        }
    }

    /// PostgreSQL repositories over an existing pool.
    pub fn postgres(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            sessions: Arc::new(WatchSessionRepository::new(pool.clone())),
            instances: Arc::new(InstanceRepository::new(pool)),
            db: Some(db),
        }
    }

    /// Open the configured backend, running migrations when asked to.
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        match config.tracker.store {
            StoreBackend::Memory => {
                info!("Using in-memory session store");
                Ok(Self::memory())
            }
            StoreBackend::Postgres => {
                let db = DatabasePool::connect(&config.database).await?;
                if config.database.run_migrations {
                    run_migrations(db.pool()).await?;
                }
                Ok(Self::postgres(db))
            }
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL pool, absent with the memory backend
    pub db: Option<DatabasePool>,
    /// Watch progress tracker
    pub tracker: Arc<WatchSessionTracker>,
    /// Instance settings with the forced-defaults overlay
    pub instances: Arc<InstanceService>,
    /// Session erasure
    pub privacy: Arc<PrivacyService>,
    /// Tabs, players and hooks
    pub plugins: Arc<PluginManager>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Wire services over the given stores.
    ///
    /// Completion events go to the plugin hooks.
    pub async fn build(config: AppConfig, stores: Stores) -> AppResult<Self> {
        let plugins = Arc::new(PluginManager::from_config(&config.plugins).await?);

        let instances = Arc::new(InstanceService::new(
            Arc::clone(&stores.instances),
            config.defaults.clone(),
            &config.cache,
        ));
        let tracker = Arc::new(WatchSessionTracker::new(
            Arc::clone(&stores.sessions),
            Arc::clone(&instances),
            Arc::new(plugins.notifier()),
            config.tracker.clone(),
        ));
        let privacy = Arc::new(PrivacyService::new(Arc::clone(&stores.sessions)));

        Ok(Self {
            config: Arc::new(config),
            db: stores.db,
            tracker,
            instances,
            privacy,
            plugins,
            started_at: Instant::now(),
        })
    }
}
