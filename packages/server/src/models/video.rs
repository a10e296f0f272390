use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::video;
use crate::error::AppError;

/// A video's metadata record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[schema(example = "0192f5a4-7c1e-7d3a-9b1f-4e2d8c6a1b00")]
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[schema(example = "Boots the bear")]
    pub title: String,
    pub description: String,
    /// Where the current thumbnail can be fetched: an asset URL or a `data:` URI.
    #[serde(rename = "thumbnailURL")]
    #[schema(example = "http://localhost:8091/assets/0192f5a4-7c1e-7d3a-9b1f-4e2d8c6a1b00.png")]
    pub thumbnail_url: Option<String>,
    #[serde(rename = "videoURL")]
    pub video_url: Option<String>,
    /// Owning user.
    #[serde(rename = "userID")]
    pub user_id: Uuid,
}

impl From<video::Model> for Video {
    fn from(model: video::Model) -> Self {
        Self {
            id: model.id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            title: model.title,
            description: model.description,
            thumbnail_url: model.thumbnail_url,
            video_url: model.video_url,
            user_id: model.user_id,
        }
    }
}

/// Fields supplied when creating a video.
#[derive(Clone, Debug)]
pub struct NewVideo {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
}

/// Request body for creating a video draft.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateVideoRequest {
    /// Title (1-256 characters).
    #[schema(example = "Boots the bear")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "A bear in boots.")]
    pub description: String,
}

pub fn validate_create_video(payload: &CreateVideoRequest) -> Result<(), AppError> {
    let title = payload.title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation("Title must be 1-256 characters".into()));
    }
    Ok(())
}

/// Parse a video ID from a path segment.
pub fn parse_video_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::Validation("Invalid video ID".into()))
}
