use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RepoError, VideoRepository};
use crate::models::video::{NewVideo, Video};

/// Non-persistent video repository for local runs without Postgres and for tests.
#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<HashMap<Uuid, Video>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn create_video(&self, new: NewVideo) -> Result<Video, RepoError> {
        let now = Utc::now();
        let video = Video {
            id: Uuid::now_v7(),
            created_at: now,
            updated_at: now,
            title: new.title,
            description: new.description,
            thumbnail_url: None,
            video_url: None,
            user_id: new.user_id,
        };
        self.videos.write().await.insert(video.id, video.clone());
        Ok(video)
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, RepoError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn update_video(&self, video: &Video) -> Result<Video, RepoError> {
        let mut videos = self.videos.write().await;
        let stored = videos.get_mut(&video.id).ok_or(RepoError::Missing(video.id))?;

        // Identity and ownership are immutable.
        stored.title = video.title.clone();
        stored.description = video.description.clone();
        stored.thumbnail_url = video.thumbnail_url.clone();
        stored.video_url = video.video_url.clone();
        stored.updated_at = video.updated_at;

        Ok(stored.clone())
    }
}
