//! Hashing - SHA-256 fingerprints for rendered plates

use sha2::{Digest, Sha256};

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Hash of a rendered image together with the plate it depicts, so equal
/// bytes for different plates never share a fingerprint.
pub fn render_fingerprint(numeric_code: &str, png: &[u8]) -> String {
    let mut data = Vec::with_capacity(numeric_code.len() + 1 + png.len());
    data.extend_from_slice(numeric_code.as_bytes());
    data.push(b':');
    data.extend_from_slice(png);
    sha256_hex(&data)
}

mod hex {
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fingerprint_depends_on_plate() {
        let png = b"same bytes";
        assert_eq!(render_fingerprint("671412345", png), render_fingerprint("671412345", png));
        assert_ne!(render_fingerprint("671412345", png), render_fingerprint("671412346", png));
        assert_ne!(render_fingerprint("671412345", png), sha256_hex(png));
    }

    #[test]
    fn test_fingerprint_covers_code_and_image() {
        assert_eq!(
            render_fingerprint("671412345", b"png"),
            sha256_hex(b"671412345:png")
        );
    }
}
