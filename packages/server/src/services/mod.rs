pub mod ownership;
pub mod thumbnail;

pub use thumbnail::ThumbnailService;
