// Deploy Hash Utilities
// Vercel identifies uploaded file blobs by their SHA-1 digest

use sha1::{Digest, Sha1};

/// Calculate SHA-1 hash of content as a 40-character hex string
pub fn calculate_sha1(content: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_calculation() {
        let hash = calculate_sha1(b"hello world");
        assert_eq!(hash, "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
        assert_eq!(hash.len(), 40);
    }

    #[test]
    fn test_sha1_of_empty_content() {
        assert_eq!(
            calculate_sha1(b""),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }
}
