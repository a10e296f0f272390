use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, DatabaseConnection, DbErr, EntityTrait, Set,
};
use uuid::Uuid;

use super::{RepoError, VideoRepository};
use crate::entity::video;
use crate::models::video::{NewVideo, Video};

pub struct SeaOrmVideoRepository {
    db: DatabaseConnection,
}

impl SeaOrmVideoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VideoRepository for SeaOrmVideoRepository {
    async fn create_video(&self, new: NewVideo) -> Result<Video, RepoError> {
        let now = Utc::now();
        let model = video::ActiveModel {
            id: Set(Uuid::now_v7()),
            title: Set(new.title),
            description: Set(new.description),
            thumbnail_url: Set(None),
            video_url: Set(None),
            user_id: Set(new.user_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, RepoError> {
        let model = video::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Video::from))
    }

    async fn update_video(&self, video: &Video) -> Result<Video, RepoError> {
        let active = video::ActiveModel {
            id: Unchanged(video.id),
            title: Set(video.title.clone()),
            description: Set(video.description.clone()),
            thumbnail_url: Set(video.thumbnail_url.clone()),
            video_url: Set(video.video_url.clone()),
            user_id: Unchanged(video.user_id),
            created_at: Unchanged(video.created_at),
            updated_at: Set(video.updated_at),
        };

        match active.update(&self.db).await {
            Ok(model) => Ok(model.into()),
            Err(DbErr::RecordNotUpdated) => Err(RepoError::Missing(video.id)),
            Err(e) => Err(e.into()),
        }
    }
}
