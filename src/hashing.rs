use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of `bytes`
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Storage filename for content with the given digest: `<digest><extension>`
pub fn storage_filename(digest: &str, extension: &str) -> String {
    format!("{digest}{extension}")
}
