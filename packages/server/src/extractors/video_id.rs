use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::video::parse_video_id;

/// `{video_id}` path segment parsed as a UUID.
///
/// Place it before [`AuthUser`](super::auth::AuthUser) so a malformed id is
/// reported as `VALIDATION_ERROR` regardless of the caller's credentials.
pub struct VideoId(pub Uuid);

impl<S> FromRequestParts<S> for VideoId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::Validation("Invalid video ID".into()))?;
        parse_video_id(&raw).map(VideoId)
    }
}
