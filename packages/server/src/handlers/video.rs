use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::extractors::video_id::VideoId;
use crate::models::video::{CreateVideoRequest, NewVideo, Video, validate_create_video};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/videos",
    tag = "Videos",
    operation_id = "createVideo",
    summary = "Create a video draft",
    description = "Creates a video owned by the authenticated user, with no thumbnail yet.",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video created", body = Video),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(title = %payload.title))]
pub async fn create_video(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(payload): AppJson<CreateVideoRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_video(&payload)?;

    let video = state
        .videos
        .create_video(NewVideo {
            user_id: auth_user.user_id,
            title: payload.title.trim().to_string(),
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(video)))
}

#[utoipa::path(
    get,
    path = "/videos/{video_id}",
    tag = "Videos",
    operation_id = "getVideo",
    summary = "Get a video",
    params(("video_id" = String, Path, description = "Video ID (UUID)")),
    responses(
        (status = 200, description = "Video", body = Video),
        (status = 400, description = "Invalid video ID (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Video not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(video_id = %video_id))]
pub async fn get_video(
    State(state): State<AppState>,
    VideoId(video_id): VideoId,
) -> Result<Json<Video>, AppError> {
    let video = state
        .videos
        .get_video(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".into()))?;
    Ok(Json(video))
}
