use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::StorageError;
use super::traits::AssetStore;
use crate::asset::{Locator, MediaType, UploadedAsset};

/// Filesystem-backed asset store.
///
/// Assets live at `{root}/{id}.{ext}` where `ext` is the media subtype, and
/// are handed out as `{base_url}/assets/{id}.{ext}` for a static file server
/// mounted over `root`.
pub struct FilesystemAssetStore {
    root: PathBuf,
    base_url: String,
}

impl FilesystemAssetStore {
    /// Create a new filesystem asset store, creating `root` if needed.
    pub async fn new(root: PathBuf, base_url: impl Into<String>) -> Result<Self, StorageError> {
        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self {
            root,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_name(id: Uuid, media_type: &MediaType) -> String {
        format!("{id}.{}", media_type.extension())
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.root.join(".tmp").join(Uuid::new_v4().to_string())
    }

    /// Drop files for `id` stored under a different extension than `keep`.
    async fn remove_stale(&self, id: Uuid, keep: &str) {
        let prefix = format!("{id}.");
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(%id, error = %e, "Failed to scan assets root for stale files");
                return;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.starts_with(&prefix) && name != keep {
                match fs::remove_file(entry.path()).await {
                    Ok(()) => debug!(%id, stale = name, "Removed superseded asset"),
                    Err(e) => warn!(%id, stale = name, error = %e, "Failed to remove stale asset"),
                }
            }
        }
    }
}

#[async_trait]
impl AssetStore for FilesystemAssetStore {
    fn name(&self) -> &'static str {
        "filesystem"
    }

    async fn put(&self, id: Uuid, asset: &UploadedAsset) -> Result<Locator, StorageError> {
        let file_name = Self::file_name(id, &asset.media_type);
        let dest = self.root.join(&file_name);

        // Write aside and rename so readers never see a half-written file
        // and a failed write leaves the previous asset in place.
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, &asset.data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Err(e) = fs::rename(&temp_path, &dest).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(%id, file = %file_name, size = asset.len(), "Stored asset on disk");
        Ok(Locator::new(format!("{}/assets/{file_name}", self.base_url)))
    }

    async fn prune(&self, id: Uuid, keep: &Locator) {
        let Some(keep) = keep.as_str().rsplit('/').next() else {
            return;
        };
        self.remove_stale(id, keep).await;
    }
}
