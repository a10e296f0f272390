use std::sync::Arc;

use common::ValidationError;
use common::storage::AssetStore;

use crate::config::AppConfig;
use crate::repository::VideoRepository;
use crate::services::ThumbnailService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub videos: Arc<dyn VideoRepository>,
    pub thumbnails: Arc<ThumbnailService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        videos: Arc<dyn VideoRepository>,
        store: Arc<dyn AssetStore>,
    ) -> Result<Self, ValidationError> {
        let validator = config.storage.validator()?;
        let thumbnails = Arc::new(ThumbnailService::new(videos.clone(), store, validator));
        Ok(Self {
            config,
            videos,
            thumbnails,
        })
    }
}
