//! In-memory video instance store.

use async_trait::async_trait;
use dashmap::DashMap;

use videotime_core::result::AppResult;
use videotime_core::types::id::ModuleId;
use videotime_entity::instance::{UpsertVideoInstance, VideoInstance};

use crate::store::InstanceStore;

/// In-memory instance settings store.
#[derive(Debug, Default)]
pub struct MemoryInstanceStore {
    instances: DashMap<ModuleId, VideoInstance>,
}

impl MemoryInstanceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InstanceStore for MemoryInstanceStore {
    async fn find(&self, id: ModuleId) -> AppResult<Option<VideoInstance>> {
        Ok(self.instances.get(&id).map(|r| r.value().clone()))
    }

    async fn upsert(&self, id: ModuleId, data: &UpsertVideoInstance) -> AppResult<VideoInstance> {
        let mut entry = self
            .instances
            .entry(id)
            .or_insert_with(|| data.clone().into_instance(id, None));
        let updated = data.clone().into_instance(id, Some(entry.value()));
        *entry.value_mut() = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: ModuleId) -> AppResult<bool> {
        Ok(self.instances.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use videotime_core::config::InstanceDefaults;

    use super::*;

    #[tokio::test]
    async fn test_upsert_keeps_created_at() {
        let store = MemoryInstanceStore::new();
        let id = ModuleId::new();
        let mut data = UpsertVideoInstance::from_defaults(
            "Intro",
            "https://example.com/a.mp4",
            &InstanceDefaults::default(),
        );

        let created = store.upsert(id, &data).await.unwrap();
        data.name = "Intro (edited)".to_string();
        let updated = store.upsert(id, &data).await.unwrap();

        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.name, "Intro (edited)");
        assert_eq!(store.find(id).await.unwrap(), Some(updated));

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
    }
}
