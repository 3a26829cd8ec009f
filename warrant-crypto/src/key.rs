//! Key derivation for license file encryption.
//!
//! License files are encrypted with a key derived from the per-license
//! secret by hashing it with SHA-256. The derivation is deliberately a
//! bare digest rather than a password KDF: the secret is high-entropy
//! machine-generated material, and offline verifiers on the other side
//! of the trust boundary must be able to reproduce the key cheaply.

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of encryption keys in bytes (256 bits for AES-256).
pub const KEY_SIZE: usize = 32;

/// A derived encryption key with automatic zeroization on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    /// Creates a derived key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derives an AES-256 key from a per-license secret.
///
/// The key is the SHA-256 digest of the secret's UTF-8 bytes. Both the
/// issuer and the offline verifier derive the same key from the same
/// secret, so this function must never change.
pub fn derive_key(secret: &str) -> DerivedKey {
    let digest = Sha256::digest(secret.as_bytes());
    DerivedKey::from_bytes(digest.into())
}
