//! Error types for the encryption layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Decryption failed (wrong key, bad padding, or malformed transport string).
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// Invalid IV length.
    #[error("invalid iv length: expected {expected}, got {actual}")]
    InvalidIvLength { expected: usize, actual: usize },
}
