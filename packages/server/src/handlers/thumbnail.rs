use axum::Json;
use axum::body::Body;
use axum::extract::multipart::Field;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use common::{AssetValidator, MediaType, UploadedAsset};
use tracing::{debug, instrument};

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::video_id::VideoId;
use crate::models::video::Video;
use crate::state::AppState;

/// Multipart field carrying the image.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn upload_body_limit(max_upload_size: u64) -> DefaultBodyLimit {
    let max = usize::try_from(max_upload_size).unwrap_or(usize::MAX);
    DefaultBodyLimit::max(max.saturating_add(MULTIPART_OVERHEAD))
}

#[utoipa::path(
    post,
    path = "/thumbnail_upload/{video_id}",
    tag = "Thumbnails",
    operation_id = "uploadThumbnail",
    summary = "Upload a video thumbnail",
    description = "Stores the `thumbnail` multipart file for the video and points the video's \
        `thumbnailURL` at it. Only the video's owner may upload. Re-uploading replaces the \
        previous thumbnail.",
    params(("video_id" = String, Path, description = "Video ID (UUID)")),
    request_body(content_type = "multipart/form-data", description = "Image in the `thumbnail` field"),
    responses(
        (status = 200, description = "Updated video", body = Video),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Not the video owner (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, multipart), fields(video_id = %video_id))]
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    VideoId(video_id): VideoId,
    auth_user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<Video>, AppError> {
    debug!(user_id = %auth_user.user_id, "Uploading thumbnail");

    let mut asset: Option<UploadedAsset> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        // Plain form values under the same name are not files.
        if field.name() != Some(THUMBNAIL_FIELD) || field.file_name().is_none() {
            continue;
        }
        asset = Some(read_asset(field, state.thumbnails.validator()).await?);
    }

    let video = state
        .thumbnails
        .upload(video_id, auth_user.user_id, asset)
        .await?;

    Ok(Json(video))
}

#[utoipa::path(
    get,
    path = "/thumbnails/{video_id}",
    tag = "Thumbnails",
    operation_id = "getThumbnail",
    summary = "Fetch a video thumbnail",
    description = "Returns the raw thumbnail bytes with their stored content type. \
        Only mounted when thumbnails are kept in memory. Responses are never cached.",
    params(("video_id" = String, Path, description = "Video ID (UUID)")),
    responses(
        (status = 200, description = "Thumbnail bytes"),
        (status = 400, description = "Invalid video ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Video or thumbnail not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(video_id = %video_id))]
pub async fn get_thumbnail(
    State(state): State<AppState>,
    VideoId(video_id): VideoId,
) -> Result<Response, AppError> {
    let asset = state.thumbnails.retrieve(video_id).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, asset.media_type.as_str())
        .header(header::CONTENT_LENGTH, asset.data.len().to_string())
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(asset.data))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// Buffer a file field, dropping the buffer once it passes the size ceiling.
async fn read_asset(
    mut field: Field<'_>,
    validator: &AssetValidator,
) -> Result<UploadedAsset, AppError> {
    let media_type = match field.content_type() {
        Some(raw) => MediaType::parse(raw)?,
        None => MediaType::octet_stream(),
    };

    let mut data = Vec::new();
    let mut seen: u64 = 0;
    let mut oversize = None;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?
    {
        seen += chunk.len() as u64;
        if oversize.is_some() {
            // Body is already bounded by the route limit; drain it so the
            // client gets the error instead of a reset connection.
            continue;
        }
        match validator.check_size(seen) {
            Ok(()) => data.extend_from_slice(&chunk),
            Err(e) => {
                data = Vec::new();
                oversize = Some(e);
            }
        }
    }

    if let Some(err) = oversize {
        debug!(received = seen, "Rejecting oversized thumbnail");
        return Err(err.into());
    }

    Ok(UploadedAsset::new(data, media_type))
}
