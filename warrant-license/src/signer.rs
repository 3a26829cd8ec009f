//! Signature dispatch for license file certificates.
//!
//! One sign/verify pair per signature family. Signatures always cover the
//! signing string `license/<enc>` — the encoded (post-encryption) payload,
//! never the plaintext — so a verifier can reject tampered ciphertext
//! before attempting decryption.

use crate::error::{LicenseFileError, LicenseFileResult};
use crate::identity::{SigningIdentity, VerifyingIdentity};
use crate::scheme::SignatureFamily;
use rand::{CryptoRng, RngCore};
use rsa::sha2::Sha256;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Signer, Verifier};
use rsa::{pkcs1v15, pss};

/// Prefix of the signing string. The signed message is this prefix
/// concatenated with the certificate's `enc` value.
pub(crate) const SIGNING_PREFIX: &str = "license/";

/// Builds the signing string for an encoded payload.
pub(crate) fn signing_string(enc: &str) -> String {
    format!("{SIGNING_PREFIX}{enc}")
}

/// Signs `message` with the identity's key for the given family, returning
/// raw signature bytes.
///
/// PSS signing draws its salt from `rng`; the other families are
/// deterministic.
pub(crate) fn sign<R>(
    family: SignatureFamily,
    identity: &SigningIdentity,
    message: &[u8],
    rng: &mut R,
) -> LicenseFileResult<Vec<u8>>
where
    R: RngCore + CryptoRng,
{
    match family {
        SignatureFamily::Ed25519 => {
            let key = identity.ed25519_key()?;
            Ok(key.sign(message).to_bytes().to_vec())
        }
        SignatureFamily::RsaPkcs1 => {
            let key = pkcs1v15::SigningKey::<Sha256>::new(identity.rsa_key()?.clone());
            Ok(key.sign(message).to_vec())
        }
        SignatureFamily::RsaPss => {
            let key = pss::SigningKey::<Sha256>::new(identity.rsa_key()?.clone());
            Ok(key.sign_with_rng(rng, message).to_vec())
        }
    }
}

/// Verifies raw signature bytes over `message` with the identity's public
/// key for the given family.
///
/// Any failure — wrong length, wrong key, tampered message — collapses to
/// [`LicenseFileError::InvalidSignature`].
pub(crate) fn verify(
    family: SignatureFamily,
    identity: &VerifyingIdentity,
    message: &[u8],
    signature: &[u8],
) -> LicenseFileResult<()> {
    match family {
        SignatureFamily::Ed25519 => {
            let sig = ed25519_dalek::Signature::from_slice(signature)
                .map_err(|_| LicenseFileError::InvalidSignature)?;
            identity
                .ed25519_key()?
                .verify(message, &sig)
                .map_err(|_| LicenseFileError::InvalidSignature)
        }
        SignatureFamily::RsaPkcs1 => {
            let key = pkcs1v15::VerifyingKey::<Sha256>::new(identity.rsa_key()?.clone());
            let sig = pkcs1v15::Signature::try_from(signature)
                .map_err(|_| LicenseFileError::InvalidSignature)?;
            key.verify(message, &sig)
                .map_err(|_| LicenseFileError::InvalidSignature)
        }
        SignatureFamily::RsaPss => {
            let key = pss::VerifyingKey::<Sha256>::new(identity.rsa_key()?.clone());
            let sig = pss::Signature::try_from(signature)
                .map_err(|_| LicenseFileError::InvalidSignature)?;
            key.verify(message, &sig)
                .map_err(|_| LicenseFileError::InvalidSignature)
        }
    }
}
