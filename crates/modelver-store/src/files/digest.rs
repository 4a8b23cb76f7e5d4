use sha2::{Digest, Sha256};

/// SHA-256 of `bytes`, hex encoded (64 characters)
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
