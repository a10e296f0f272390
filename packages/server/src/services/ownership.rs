use uuid::Uuid;

use crate::error::AppError;
use crate::models::video::Video;

/// Only the owning user may change a video.
pub fn authorize(video: &Video, acting_user: Uuid) -> Result<(), AppError> {
    if video.user_id != acting_user {
        return Err(AppError::PermissionDenied(
            "Not authorized to update this video".into(),
        ));
    }
    Ok(())
}
