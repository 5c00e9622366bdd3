#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the bytes of a media asset live.
///
/// Only [`StorageBackend::ObjectStorage`] assets can ever be served publicly.
/// Archive references are kept for auditing and are never turned into URLs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Primary object storage bucket.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "object_storage"))]
    ObjectStorage,
    /// Off-site archive (e.g. a shared drive export).
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "external_archive"))]
    ExternalArchive,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObjectStorage => "object_storage",
            Self::ExternalArchive => "external_archive",
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "object_storage" => Ok(Self::ObjectStorage),
            "external_archive" => Ok(Self::ExternalArchive),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

/// Coarse media classification used by content associations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Infer the kind from a MIME type. Anything that is not `video/*` is an image.
    pub fn from_mime(mime: &str) -> Self {
        if mime.trim().to_ascii_lowercase().starts_with("video/") {
            Self::Video
        } else {
            Self::Image
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(format!("unknown media kind: {other}")),
        }
    }
}

/// Build the public URL of an object in a bucket.
///
/// `{base}/storage/v1/object/public/{bucket}/{path}`. Trailing slashes on the
/// base and leading slashes on the path are normalized away.
pub fn public_object_url(base: &str, bucket: &str, path: &str) -> String {
    format!(
        "{}/{}",
        public_bucket_prefix(base, bucket),
        path.trim_start_matches('/')
    )
}

/// The URL prefix under which every public object of `bucket` is served.
pub fn public_bucket_prefix(base: &str, bucket: &str) -> String {
    format!(
        "{}/storage/v1/object/public/{}",
        base.trim_end_matches('/'),
        bucket.trim_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_mime_types_are_videos() {
        assert_eq!(MediaKind::from_mime("video/mp4"), MediaKind::Video);
        assert_eq!(MediaKind::from_mime("Video/WebM"), MediaKind::Video);
    }

    #[test]
    fn everything_else_is_an_image() {
        assert_eq!(MediaKind::from_mime("image/png"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime("application/pdf"), MediaKind::Image);
        assert_eq!(MediaKind::from_mime(""), MediaKind::Image);
    }

    #[test]
    fn public_url_normalizes_slashes() {
        assert_eq!(
            public_object_url("https://cdn.example.org/", "media", "/uploads/a.png"),
            "https://cdn.example.org/storage/v1/object/public/media/uploads/a.png"
        );
    }

    #[test]
    fn storage_backend_parses_its_own_output() {
        for backend in [StorageBackend::ObjectStorage, StorageBackend::ExternalArchive] {
            assert_eq!(backend.as_str().parse::<StorageBackend>(), Ok(backend));
        }
        assert!("gdrive".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&StorageBackend::ExternalArchive).unwrap();
        assert_eq!(json, "\"external_archive\"");
        let kind: MediaKind = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(kind, MediaKind::Video);
    }
}
