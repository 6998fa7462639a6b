//! Instance settings lookup with the forced-defaults overlay and a cache.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, info};

use videotime_core::config::{CacheConfig, InstanceDefaults};
use videotime_core::error::AppError;
use videotime_core::result::AppResult;
use videotime_core::types::id::ModuleId;
use videotime_database::InstanceStore;
use videotime_entity::instance::{EffectiveSettings, UpsertVideoInstance, VideoInstance};
use videotime_entity::user::UserRole;

use crate::context::RequestContext;

/// Reads and writes video instance settings.
///
/// Effective settings are cached per instance; a write through this
/// service evicts the entry. Writes made elsewhere show up once the
/// entry expires.
#[derive(Debug, Clone)]
pub struct InstanceService {
    store: Arc<dyn InstanceStore>,
    defaults: InstanceDefaults,
    cache: Option<Cache<ModuleId, Arc<EffectiveSettings>>>,
    /// Bumped on every eviction; a load that straddles one is discarded.
    evictions: Arc<AtomicU64>,
}

impl InstanceService {
    /// Creates a new instance service.
    pub fn new(
        store: Arc<dyn InstanceStore>,
        defaults: InstanceDefaults,
        cache_config: &CacheConfig,
    ) -> Self {
        let cache = cache_config.enabled.then(|| {
            Cache::builder()
                .max_capacity(cache_config.max_capacity)
                .time_to_live(Duration::from_secs(cache_config.ttl_seconds))
                .build()
        });

        Self {
            store,
            defaults,
            cache,
            evictions: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Site defaults applied to every instance.
    pub fn defaults(&self) -> &InstanceDefaults {
        &self.defaults
    }

    /// The stored configuration, without the defaults overlay.
    pub async fn get(&self, module_id: ModuleId) -> AppResult<Option<VideoInstance>> {
        self.store.find(module_id).await
    }

    /// Settings the tracker obeys for an instance. Unconfigured instances
    /// get the site defaults.
    pub async fn effective(&self, module_id: ModuleId) -> AppResult<EffectiveSettings> {
        let Some(cache) = &self.cache else {
            return self.load(module_id).await;
        };

        let generation = self.evictions.load(Ordering::SeqCst);
        let settings = cache
            .try_get_with(module_id, async {
                self.load(module_id).await.map(Arc::new)
            })
            .await
            .map_err(|e| AppError::new(e.kind, e.message.clone()))?;

        if self.evictions.load(Ordering::SeqCst) != generation {
            cache.invalidate(&module_id).await;
        }
        Ok(settings.as_ref().clone())
    }

    /// Create or replace an instance's configuration.
    pub async fn upsert(
        &self,
        ctx: &RequestContext,
        module_id: ModuleId,
        data: UpsertVideoInstance,
    ) -> AppResult<VideoInstance> {
        ctx.require_role(UserRole::Teacher)?;
        validate(&data)?;

        let instance = self.store.upsert(module_id, &data).await?;
        self.evict(module_id).await;

        info!(
            module_id = %module_id,
            actor_id = %ctx.user_id,
            video_url = %instance.video_url,
            "Video instance saved"
        );
        Ok(instance)
    }

    /// Remove an instance's configuration. Its sessions are untouched.
    pub async fn delete(&self, ctx: &RequestContext, module_id: ModuleId) -> AppResult<bool> {
        ctx.require_role(UserRole::Teacher)?;

        let deleted = self.store.delete(module_id).await?;
        self.evict(module_id).await;

        if deleted {
            info!(module_id = %module_id, actor_id = %ctx.user_id, "Video instance deleted");
        }
        Ok(deleted)
    }

    async fn load(&self, module_id: ModuleId) -> AppResult<EffectiveSettings> {
        let instance = self.store.find(module_id).await?;
        let settings = EffectiveSettings::resolve(module_id, instance.as_ref(), &self.defaults);
        debug!(module_id = %module_id, configured = settings.configured, "Resolved instance settings");
        Ok(settings)
    }

    async fn evict(&self, module_id: ModuleId) {
        if let Some(cache) = &self.cache {
            self.evictions.fetch_add(1, Ordering::SeqCst);
            cache.invalidate(&module_id).await;
        }
    }
}

fn validate(data: &UpsertVideoInstance) -> AppResult<()> {
    if data.name.trim().is_empty() {
        return Err(AppError::validation("Instance name must not be empty"));
    }
    let url = data.video_url.trim();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(AppError::validation(format!(
            "Video URL must be http(s), got '{url}'"
        )));
    }
    if !(1..=100).contains(&data.completion_on_percent_value) {
        return Err(AppError::validation(format!(
            "Completion percent must be between 1 and 100, got {}",
            data.completion_on_percent_value
        )));
    }
    if data.completion_on_view_time_seconds < 0 {
        return Err(AppError::validation(
            "Completion view time must not be negative",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use videotime_core::error::ErrorKind;
    use std::sync::atomic::AtomicBool;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use videotime_core::settings::AdminSetting;
    use videotime_core::types::id::UserId;
    use videotime_database::memory::MemoryInstanceStore;

    use super::*;

    fn service(defaults: InstanceDefaults) -> InstanceService {
        InstanceService::new(
            Arc::new(MemoryInstanceStore::new()),
            defaults,
            &CacheConfig::default(),
        )
    }

    fn teacher() -> RequestContext {
        RequestContext::new(UserId::new(), UserRole::Teacher)
    }

    fn data(defaults: &InstanceDefaults) -> UpsertVideoInstance {
        UpsertVideoInstance::from_defaults("Intro", "https://vimeo.com/76979871", defaults)
    }

    #[tokio::test]
    async fn test_upsert_evicts_cached_settings() {
        let svc = service(InstanceDefaults::default());
        let module_id = ModuleId::new();

        assert!(!svc.effective(module_id).await.unwrap().configured);

        let mut upsert = data(svc.defaults());
        upsert.resume_playback = false;
        svc.upsert(&teacher(), module_id, upsert).await.unwrap();

        let settings = svc.effective(module_id).await.unwrap();
        assert!(settings.configured);
        assert!(!settings.resume_playback);
    }

    /// Holds `find` open until released, once armed.
    #[derive(Debug, Default)]
    struct GatedStore {
        inner: MemoryInstanceStore,
        armed: AtomicBool,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl InstanceStore for GatedStore {
        async fn find(&self, id: ModuleId) -> AppResult<Option<VideoInstance>> {
            let found = self.inner.find(id).await;
            if self.armed.swap(false, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            found
        }

        async fn upsert(&self, id: ModuleId, data: &UpsertVideoInstance) -> AppResult<VideoInstance> {
            self.inner.upsert(id, data).await
        }

        async fn delete(&self, id: ModuleId) -> AppResult<bool> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_read_overlapping_upsert_does_not_cache_stale_settings() {
        let store = Arc::new(GatedStore::default());
        let svc = InstanceService::new(
            store.clone(),
            InstanceDefaults::default(),
            &CacheConfig::default(),
        );
        let module_id = ModuleId::new();

        store.armed.store(true, Ordering::SeqCst);
        let reader = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.effective(module_id).await })
        };
        store.entered.notified().await;

        let mut upsert = data(svc.defaults());
        upsert.resume_playback = false;
        svc.upsert(&teacher(), module_id, upsert).await.unwrap();
        store.release.notify_one();

        // The overlapping read saw the old row; later reads must not.
        assert!(!reader.await.unwrap().unwrap().configured);
        let settings = svc.effective(module_id).await.unwrap();
        assert!(settings.configured);
        assert!(!settings.resume_playback);
    }

    #[tokio::test]
    async fn test_forced_default_wins_on_read() {
        let mut defaults = InstanceDefaults::default();
        defaults.prevent_fast_forwarding = AdminSetting::forced(true);
        let svc = service(defaults);
        let module_id = ModuleId::new();

        let mut upsert = data(svc.defaults());
        upsert.prevent_fast_forwarding = false;
        let stored = svc.upsert(&teacher(), module_id, upsert).await.unwrap();

        assert!(!stored.prevent_fast_forwarding);
        assert!(svc.effective(module_id).await.unwrap().prevent_fast_forwarding);
    }

    #[tokio::test]
    async fn test_students_cannot_configure() {
        let svc = service(InstanceDefaults::default());
        let student = RequestContext::new(UserId::new(), UserRole::Student);
        let err = svc
            .upsert(&student, ModuleId::new(), data(svc.defaults()))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_invalid_settings_rejected() {
        let svc = service(InstanceDefaults::default());
        let mut upsert = data(svc.defaults());
        upsert.completion_on_percent_value = 0;
        let err = svc
            .upsert(&teacher(), ModuleId::new(), upsert)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let mut upsert = data(svc.defaults());
        upsert.video_url = "file:///tmp/a.mp4".to_string();
        assert!(svc.upsert(&teacher(), ModuleId::new(), upsert).await.is_err());
    }
}
