pub mod media;
pub mod storage;

pub use media::{MediaKind, StorageBackend, public_bucket_prefix, public_object_url};
