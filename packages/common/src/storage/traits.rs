use async_trait::async_trait;
use uuid::Uuid;

use super::error::StorageError;
use crate::asset::{Locator, StoredAsset, UploadedAsset};

/// Keyed asset storage. One asset per identifier; `put` replaces.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Short backend name for logs and error messages.
    fn name(&self) -> &'static str;

    /// Store the asset under `id` and return a locator clients can
    /// dereference. A failed put leaves any previous asset intact.
    async fn put(&self, id: Uuid, asset: &UploadedAsset) -> Result<Locator, StorageError>;

    /// Drop anything held for `id` other than the asset behind `keep`.
    /// Called once `keep` has been recorded, never before.
    async fn prune(&self, _id: Uuid, _keep: &Locator) {}

    /// Whether `get` is meaningful for this backend. Stores that hand out
    /// URLs rely on a static file server instead.
    fn serves_retrieval(&self) -> bool {
        false
    }

    async fn get(&self, _id: Uuid) -> Result<StoredAsset, StorageError> {
        Err(StorageError::Unsupported(self.name()))
    }
}
