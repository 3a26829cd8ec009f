//! Error types for license file checkout and verification.

use thiserror::Error;
use warrant_crypto::CryptoError;

/// Result type for license file operations.
pub type LicenseFileResult<T> = Result<T, LicenseFileError>;

/// License file errors.
///
/// Checkout-time validation errors (`InvalidAccount` through `InvalidTtl`)
/// are raised before any key material is touched. Verification-time errors
/// name their failure kind but never carry payload contents.
#[derive(Debug, Error)]
pub enum LicenseFileError {
    /// The account's signing identity is missing key material required by
    /// the selected scheme.
    #[error("invalid account: {0}")]
    InvalidAccount(String),

    /// The license is missing an input required by the request, e.g. the
    /// per-license secret when encryption is requested.
    #[error("invalid license: {0}")]
    InvalidLicense(String),

    /// A requested include is not supported by the rendered document.
    #[error("invalid includes: {0}")]
    InvalidInclude(String),

    /// The requested TTL is below the minimum for an offline grant.
    #[error("invalid ttl: must be at least {floor} seconds (got {ttl})")]
    InvalidTtl { ttl: i64, floor: i64 },

    /// Decryption of an encrypted license file failed.
    #[error("license file decryption failed")]
    Decryption(#[source] CryptoError),

    /// Signature verification failed.
    #[error("license file signature invalid")]
    InvalidSignature,

    /// The armored certificate is structurally invalid.
    #[error("malformed license file certificate: {0}")]
    MalformedCertificate(String),

    /// The certificate verified but its payload is not a valid envelope.
    #[error("malformed license file payload: {0}")]
    MalformedPayload(String),

    /// The certificate's `alg` value is not one this verifier understands.
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
