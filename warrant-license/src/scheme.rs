//! Signing schemes and their certificate algorithm labels.
//!
//! A policy configures one signing scheme per license. The scheme plus the
//! encryption flag fully determine the certificate's `alg` value, and the
//! `alg` value alone is enough for a verifier to pick the right signature
//! routine and payload encoding.

use crate::error::{LicenseFileError, LicenseFileResult};
use serde::{Deserialize, Serialize};

/// The policy-configured signing scheme for a license.
///
/// `None` is the default when a policy configures no scheme and resolves
/// identically to `Ed25519`. The two RSA PKCS#1 v1.5 sign revisions are
/// behaviorally identical, as are the two PSS revisions; the encrypt and
/// JWT variants differ only in key-management semantics upstream, so all
/// four share the `rsa-sha256` signature routine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SigningScheme {
    #[default]
    None,
    Ed25519,
    RsaPkcs1Sign,
    RsaPkcs1PssSign,
    RsaPkcs1Encrypt,
    RsaJwtRs256,
}

/// The signature primitive a scheme maps to. One sign/verify pair exists
/// per family; adding a scheme means adding one arm here and one row in
/// the `alg` tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureFamily {
    /// Ed25519 over the signing string.
    Ed25519,
    /// RSA PKCS#1 v1.5, SHA-256 digest.
    RsaPkcs1,
    /// RSA-PSS, SHA-256 digest, MGF1-SHA256, auto salt length.
    RsaPss,
}

impl SigningScheme {
    /// Returns the signature family this scheme dispatches to.
    #[must_use]
    pub fn family(self) -> SignatureFamily {
        match self {
            Self::None | Self::Ed25519 => SignatureFamily::Ed25519,
            Self::RsaPkcs1Sign | Self::RsaPkcs1Encrypt | Self::RsaJwtRs256 => {
                SignatureFamily::RsaPkcs1
            }
            Self::RsaPkcs1PssSign => SignatureFamily::RsaPss,
        }
    }

    /// Returns the certificate `alg` label for this scheme combined with
    /// the encryption state.
    #[must_use]
    pub fn algorithm(self, encrypted: bool) -> &'static str {
        self.family().algorithm(encrypted)
    }
}

impl SignatureFamily {
    /// Returns the `alg` label for this family and encryption state.
    #[must_use]
    pub fn algorithm(self, encrypted: bool) -> &'static str {
        match (self, encrypted) {
            (Self::Ed25519, false) => "base64+ed25519",
            (Self::Ed25519, true) => "aes-256-cbc+ed25519",
            (Self::RsaPkcs1, false) => "base64+rsa-sha256",
            (Self::RsaPkcs1, true) => "aes-256-cbc+rsa-sha256",
            (Self::RsaPss, false) => "base64+rsa-pss-sha256",
            (Self::RsaPss, true) => "aes-256-cbc+rsa-pss-sha256",
        }
    }

    /// Maps a certificate `alg` label back to its signature family and
    /// encryption state. Exact inverse of [`SignatureFamily::algorithm`].
    ///
    /// # Errors
    ///
    /// Returns [`LicenseFileError::UnsupportedAlgorithm`] for any label not
    /// in the table.
    pub fn from_algorithm(alg: &str) -> LicenseFileResult<(Self, bool)> {
        match alg {
            "base64+ed25519" => Ok((Self::Ed25519, false)),
            "aes-256-cbc+ed25519" => Ok((Self::Ed25519, true)),
            "base64+rsa-sha256" => Ok((Self::RsaPkcs1, false)),
            "aes-256-cbc+rsa-sha256" => Ok((Self::RsaPkcs1, true)),
            "base64+rsa-pss-sha256" => Ok((Self::RsaPss, false)),
            "aes-256-cbc+rsa-pss-sha256" => Ok((Self::RsaPss, true)),
            other => Err(LicenseFileError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}
