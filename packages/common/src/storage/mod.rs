mod error;
mod hash;
mod traits;

pub mod filesystem;
#[cfg(feature = "object-storage")]
pub mod s3;

pub use error::StorageError;
pub use hash::{UPLOAD_PREFIX, object_key};
pub use traits::{ObjectStore, validate_object_path};
