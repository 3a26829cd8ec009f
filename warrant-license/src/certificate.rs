//! Certificate assembly and armor framing.
//!
//! The certificate is a transient `{enc, sig, alg}` object: it exists only
//! to be serialized, base64-encoded, and wrapped in the fixed armor lines.
//! It is produced atomically or not at all — there is no partially-valid
//! certificate.

use crate::error::{LicenseFileError, LicenseFileResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Armor header line.
pub const ARMOR_HEADER: &str = "-----BEGIN LICENSE FILE-----";

/// Armor footer line.
pub const ARMOR_FOOTER: &str = "-----END LICENSE FILE-----";

/// The inner certificate object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certificate {
    /// Base64-encoded envelope, or `ciphertext.iv` transport string when
    /// encrypted.
    pub enc: String,
    /// Base64-encoded detached signature over `license/<enc>`.
    pub sig: String,
    /// Algorithm label; fully determined by (scheme, encrypt flag).
    pub alg: String,
}

impl Certificate {
    /// Serializes the certificate and wraps it in armor. Every line,
    /// including the footer, is terminated by a newline.
    pub(crate) fn to_armored(&self) -> LicenseFileResult<String> {
        let json = serde_json::to_vec(self)?;
        let blob = STANDARD.encode(json);
        Ok(format!("{ARMOR_HEADER}\n{blob}\n{ARMOR_FOOTER}\n"))
    }

    /// Strips armor and parses the inner certificate object.
    ///
    /// The base64 blob may be a single line or wrapped across lines; both
    /// framings are accepted. All three keys are required.
    pub(crate) fn from_armored(armored: &str) -> LicenseFileResult<Self> {
        let body = armored.trim();
        let body = body.strip_prefix(ARMOR_HEADER).ok_or_else(|| {
            LicenseFileError::MalformedCertificate("missing armor header".to_string())
        })?;
        let body = body.strip_suffix(ARMOR_FOOTER).ok_or_else(|| {
            LicenseFileError::MalformedCertificate("missing armor footer".to_string())
        })?;

        let blob: String = body.chars().filter(|c| !c.is_whitespace()).collect();
        let json = STANDARD.decode(blob).map_err(|e| {
            LicenseFileError::MalformedCertificate(format!("invalid base64: {e}"))
        })?;

        serde_json::from_slice(&json)
            .map_err(|e| LicenseFileError::MalformedCertificate(format!("invalid json: {e}")))
    }
}
