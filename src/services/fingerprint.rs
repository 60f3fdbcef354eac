use sha2::{Digest, Sha256};

/// Computes the content fingerprint for an uploaded file: lowercase hex
/// SHA-256 over the raw bytes. Two uploads with equal fingerprints are
/// treated as identical content; the unique index on `documents.file_hash`
/// is the authoritative tie-breaker under concurrency.
pub fn fingerprint(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
