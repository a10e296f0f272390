mod error;
mod traits;

pub mod filesystem;
pub mod memory;

pub use error::StorageError;
pub use filesystem::FilesystemAssetStore;
pub use memory::InMemoryAssetStore;
pub use traits::AssetStore;
