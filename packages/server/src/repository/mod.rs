//! Video metadata persistence.
//!
//! Handlers and services only see [`VideoRepository`]; the binary picks the
//! Postgres implementation when a database URL is configured and the
//! in-memory one otherwise.

mod memory;
mod postgres;

use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

use crate::models::video::{NewVideo, Video};

pub use memory::InMemoryVideoRepository;
pub use postgres::SeaOrmVideoRepository;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),

    #[error("video {0} disappeared during update")]
    Missing(Uuid),
}

#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn create_video(&self, new: NewVideo) -> Result<Video, RepoError>;

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, RepoError>;

    /// Persist every mutable field of `video`, returning the stored record.
    async fn update_video(&self, video: &Video) -> Result<Video, RepoError>;
}
