//! License file checkout and verification.
//!
//! Checkout runs the issuing pipeline: envelope → optional cipher stage →
//! content encoding → detached signature → armored certificate.
//! Verification is the exact inverse and is what offline license holders
//! run against the account's public keys.
//!
//! Both directions are pure transforms: the clock and the random source
//! are explicit parameters on the `_at` variants, and the public
//! convenience functions supply `Utc::now()` and the OS CSPRNG.

use crate::certificate::Certificate;
use crate::document::ResourceDocument;
use crate::envelope::{Envelope, DEFAULT_TTL_SECS, MIN_TTL_SECS};
use crate::error::{LicenseFileError, LicenseFileResult};
use crate::identity::{SigningIdentity, VerifyingIdentity};
use crate::scheme::{SignatureFamily, SigningScheme};
use crate::signer;
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Duration, Utc};
use rand::{CryptoRng, RngCore};
use tracing::debug;
use warrant_crypto::{cipher, derive_key};

/// A request to issue a license file certificate. Consumed once.
///
/// Defaults: no includes, a one-month TTL, no encryption, and the `None`
/// scheme (which resolves to Ed25519).
#[derive(Debug)]
pub struct CheckoutRequest<'a> {
    document: ResourceDocument,
    identity: &'a SigningIdentity,
    scheme: SigningScheme,
    include: Vec<String>,
    ttl: Option<Duration>,
    encrypt: bool,
    secret: Option<String>,
}

impl<'a> CheckoutRequest<'a> {
    /// Creates a request for the given rendered document, signed with the
    /// account's identity.
    pub fn new(document: ResourceDocument, identity: &'a SigningIdentity) -> Self {
        Self {
            document,
            identity,
            scheme: SigningScheme::default(),
            include: Vec::new(),
            ttl: Some(Duration::seconds(DEFAULT_TTL_SECS)),
            encrypt: false,
            secret: None,
        }
    }

    /// Selects the signing scheme (from the license's policy).
    #[must_use]
    pub fn scheme(mut self, scheme: SigningScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Requests related resources to embed in the envelope's `included`
    /// list, in order.
    #[must_use]
    pub fn include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = names.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the validity window. `None` issues a certificate that never
    /// expires.
    #[must_use]
    pub fn ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    /// Enables the cipher stage, encrypting the envelope with a key
    /// derived from the per-license secret.
    #[must_use]
    pub fn encrypt(mut self, secret: impl Into<String>) -> Self {
        self.encrypt = true;
        self.secret = Some(secret.into());
        self
    }
}

/// Issues an armored license file certificate.
///
/// Uses the system clock and the OS CSPRNG; see [`checkout_at`] for the
/// deterministic variant.
pub fn checkout(request: CheckoutRequest<'_>) -> LicenseFileResult<String> {
    checkout_at(request, Utc::now(), &mut rand::rngs::OsRng)
}

/// Issues an armored license file certificate at an explicit issuance time
/// with an explicit random source.
///
/// All request validation runs before any key material is touched; a
/// rejected request performs no cryptographic work.
pub fn checkout_at<R>(
    request: CheckoutRequest<'_>,
    issued_at: DateTime<Utc>,
    rng: &mut R,
) -> LicenseFileResult<String>
where
    R: RngCore + CryptoRng,
{
    if let Some(ttl) = request.ttl {
        let secs = ttl.num_seconds();
        if secs < MIN_TTL_SECS {
            return Err(LicenseFileError::InvalidTtl {
                ttl: secs,
                floor: MIN_TTL_SECS,
            });
        }
    }

    let included = request.document.select_included(&request.include)?;

    if request.encrypt && request.secret.is_none() {
        return Err(LicenseFileError::InvalidLicense(
            "encryption requested but license has no secret".into(),
        ));
    }

    let family = request.scheme.family();
    if !request.identity.supports(family) {
        return Err(LicenseFileError::InvalidAccount(format!(
            "account has no key pair for {family:?}"
        )));
    }

    let envelope = Envelope::build(
        request.document.into_data(),
        included,
        request.ttl,
        issued_at,
    );
    let payload = serde_json::to_vec(&envelope)?;

    let enc = match (request.encrypt, request.secret.as_deref()) {
        (true, Some(secret)) => {
            let key = derive_key(secret);
            cipher::encrypt_with_rng(&key, &payload, rng)
        }
        _ => STANDARD.encode(&payload),
    };

    let message = signer::signing_string(&enc);
    let signature = signer::sign(family, request.identity, message.as_bytes(), rng)?;

    let certificate = Certificate {
        enc,
        sig: STANDARD.encode(signature),
        alg: request.scheme.algorithm(request.encrypt).to_string(),
    };

    debug!(alg = %certificate.alg, "issued license file certificate");

    certificate.to_armored()
}

/// The caller-facing status of a verified license file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The certificate is within its validity window (or has none).
    Valid,
    /// The certificate's expiry has passed. Expiry is a caller-policy
    /// decision, not a parse failure; the envelope is still returned.
    Expired,
}

/// A successfully verified license file.
#[derive(Debug, Clone)]
pub struct VerifiedFile {
    envelope: Envelope,
    status: FileStatus,
}

impl VerifiedFile {
    /// Returns the validated envelope.
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Returns the temporal status at verification time.
    #[must_use]
    pub fn status(&self) -> FileStatus {
        self.status
    }

    /// Consumes the verification, returning the envelope.
    pub fn into_envelope(self) -> Envelope {
        self.envelope
    }
}

/// Verifies an armored license file certificate against the account's
/// public keys, using the system clock for the expiry check.
pub fn verify(
    armored: &str,
    identity: &VerifyingIdentity,
    secret: Option<&str>,
) -> LicenseFileResult<VerifiedFile> {
    verify_at(armored, identity, secret, Utc::now())
}

/// Verifies an armored license file certificate at an explicit point in
/// time.
///
/// The signature is checked before any decryption or payload parsing;
/// tampered certificates are rejected without touching their contents.
/// `secret` is required only for encrypted certificates.
pub fn verify_at(
    armored: &str,
    identity: &VerifyingIdentity,
    secret: Option<&str>,
    now: DateTime<Utc>,
) -> LicenseFileResult<VerifiedFile> {
    let certificate = Certificate::from_armored(armored)?;
    let (family, encrypted) = SignatureFamily::from_algorithm(&certificate.alg)?;

    let signature = STANDARD
        .decode(&certificate.sig)
        .map_err(|_| LicenseFileError::InvalidSignature)?;
    let message = signer::signing_string(&certificate.enc);
    signer::verify(family, identity, message.as_bytes(), &signature)?;

    let payload = if encrypted {
        let secret = secret.ok_or_else(|| {
            LicenseFileError::InvalidLicense(
                "certificate is encrypted but no secret was supplied".into(),
            )
        })?;
        let key = derive_key(secret);
        cipher::decrypt(&key, &certificate.enc).map_err(LicenseFileError::Decryption)?
    } else {
        STANDARD
            .decode(&certificate.enc)
            .map_err(|e| LicenseFileError::MalformedPayload(format!("invalid base64: {e}")))?
    };

    let envelope: Envelope = serde_json::from_slice(&payload)
        .map_err(|e| LicenseFileError::MalformedPayload(format!("invalid json: {e}")))?;

    let status = if envelope.is_expired_at(now) {
        FileStatus::Expired
    } else {
        FileStatus::Valid
    };

    debug!(alg = %certificate.alg, ?status, "verified license file certificate");

    Ok(VerifiedFile { envelope, status })
}
