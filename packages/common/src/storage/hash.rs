use sha2::{Digest, Sha256};

/// Prefix under which uploaded media objects are stored.
pub const UPLOAD_PREFIX: &str = "uploads";

/// Derive the object key for an uploaded file: `uploads/{sha256}.{ext}`.
///
/// The extension is taken from `file_name`, lowercased, and dropped when it is
/// not plain ASCII alphanumeric. Identical bytes always map to the same key.
pub fn object_key(file_name: &str, data: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(data));
    let ext = file_name
        .rsplit_once('.')
        .map(|(stem, ext)| (stem, ext.to_ascii_lowercase()))
        .filter(|(stem, ext)| {
            !stem.is_empty()
                && !ext.is_empty()
                && ext.len() <= 10
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(|(_, ext)| ext);

    match ext {
        Some(ext) => format!("{UPLOAD_PREFIX}/{digest}.{ext}"),
        None => format!("{UPLOAD_PREFIX}/{digest}"),
    }
}
