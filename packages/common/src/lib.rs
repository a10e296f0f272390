pub mod asset;
pub mod storage;
pub mod validate;

pub use asset::{Locator, MediaType, StoredAsset, UploadedAsset};
pub use validate::{AssetValidator, MAX_UPLOAD_SIZE, ValidationError};
