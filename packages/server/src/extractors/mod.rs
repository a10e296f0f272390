pub mod auth;
pub mod json;
pub mod video_id;
