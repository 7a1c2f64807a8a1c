//! Content hashing for downloaded artifacts.

use md5::{Digest, Md5};

/// Lowercase hex MD5 digest of an artifact.
///
/// MD5 matches what the installer checks against the manifest's `hash` field; it is
/// used for change detection, not for integrity against tampering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest(String);

impl ContentDigest {
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Hashes artifact bytes.
pub fn content_hash(bytes: &[u8]) -> ContentDigest {
    ContentDigest(format!("{:x}", Md5::digest(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_md5_vectors() {
        assert_eq!(content_hash(b"").into_string(), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            content_hash(b"The quick brown fox jumps over the lazy dog").into_string(),
            "9e107d9d372bb6826bd81d3542a419d6"
        );
    }

    #[test]
    fn is_deterministic() {
        let bytes = vec![7u8; 4096];
        assert_eq!(content_hash(&bytes), content_hash(&bytes));
        assert_ne!(content_hash(&bytes), content_hash(&bytes[1..]));
    }
}
