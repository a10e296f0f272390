use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use common::storage::AssetStore;
use common::{AssetValidator, StoredAsset, UploadedAsset, ValidationError};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{info, instrument};
use uuid::Uuid;

use super::ownership;
use crate::error::AppError;
use crate::models::video::Video;
use crate::repository::VideoRepository;

/// Thumbnail upload and retrieval on top of the configured asset store.
pub struct ThumbnailService {
    videos: Arc<dyn VideoRepository>,
    store: Arc<dyn AssetStore>,
    validator: AssetValidator,
    /// Serialises uploads per video so the stored asset and the record's
    /// locator always move together.
    upload_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl ThumbnailService {
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        store: Arc<dyn AssetStore>,
        validator: AssetValidator,
    ) -> Self {
        Self {
            videos,
            store,
            validator,
            upload_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn validator(&self) -> &AssetValidator {
        &self.validator
    }

    pub fn store(&self) -> &dyn AssetStore {
        &*self.store
    }

    /// Validate, authorize, store, then point the video at the new locator.
    ///
    /// Ownership is checked before the store is touched, so a rejected
    /// request never overwrites the current thumbnail. The record is only
    /// updated after the store confirms the write, and superseded assets are
    /// pruned only after the record is committed.
    #[instrument(skip(self, asset), fields(%video_id, %acting_user))]
    pub async fn upload(
        &self,
        video_id: Uuid,
        acting_user: Uuid,
        asset: Option<UploadedAsset>,
    ) -> Result<Video, AppError> {
        self.validator.validate(asset.as_ref())?;
        let Some(asset) = asset else {
            return Err(ValidationError::NoFile.into());
        };

        let guard = self.lock_video(video_id).await;
        let result = self.store_and_update(video_id, acting_user, &asset).await;
        drop(guard);
        self.release_idle_locks().await;

        let video = result?;
        info!(
            backend = self.store.name(),
            size = asset.len(),
            media_type = %asset.media_type,
            "Thumbnail updated"
        );
        Ok(video)
    }

    async fn store_and_update(
        &self,
        video_id: Uuid,
        acting_user: Uuid,
        asset: &UploadedAsset,
    ) -> Result<Video, AppError> {
        let mut video = self
            .videos
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Couldn't find video".into()))?;

        ownership::authorize(&video, acting_user)?;

        let locator = self.store.put(video_id, asset).await?;

        video.thumbnail_url = Some(locator.as_str().to_owned());
        video.updated_at = Utc::now();
        let video = self.videos.update_video(&video).await?;

        // The record may still name an older asset until this point.
        self.store.prune(video_id, &locator).await;
        Ok(video)
    }

    /// Look up the stored thumbnail for an existing video.
    #[instrument(skip(self), fields(%video_id))]
    pub async fn retrieve(&self, video_id: Uuid) -> Result<StoredAsset, AppError> {
        self.videos
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Couldn't find video".into()))?;

        Ok(self.store.get(video_id).await?)
    }

    async fn lock_video(&self, video_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = self
            .upload_locks
            .lock()
            .await
            .entry(video_id)
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    async fn release_idle_locks(&self) {
        self.upload_locks
            .lock()
            .await
            .retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}
