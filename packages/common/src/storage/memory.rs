use std::collections::HashMap;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::error::StorageError;
use super::traits::AssetStore;
use crate::asset::{Locator, StoredAsset, UploadedAsset};

/// Process-local asset store handing out `data:` URIs.
///
/// Created once at startup and shared for the lifetime of the process.
/// Entries are never evicted and are lost on restart. Each put replaces the
/// whole entry under the write lock, so a concurrent get sees either the old
/// asset or the new one.
#[derive(Default)]
pub struct InMemoryAssetStore {
    entries: RwLock<HashMap<Uuid, StoredAsset>>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn put(&self, id: Uuid, asset: &UploadedAsset) -> Result<Locator, StorageError> {
        let encoded = STANDARD.encode(&asset.data);
        let locator = Locator::new(format!("data:{};base64,{encoded}", asset.media_type));

        let stored = StoredAsset {
            data: asset.data.clone(),
            media_type: asset.media_type.clone(),
        };
        self.entries.write().await.insert(id, stored);

        debug!(%id, size = asset.len(), "Stored asset in memory");
        Ok(locator)
    }

    fn serves_retrieval(&self) -> bool {
        true
    }

    async fn get(&self, id: Uuid) -> Result<StoredAsset, StorageError> {
        self.entries
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }
}
