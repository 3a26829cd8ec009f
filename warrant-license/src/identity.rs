//! Account signing identities.
//!
//! Key material is owned by account-management code outside this crate;
//! checkout and verification borrow it for the duration of one call and
//! never mutate or persist it. An identity may hold an Ed25519 key pair,
//! an RSA-2048 key pair, or both — which halves are required depends on
//! the scheme a license's policy selects.

use crate::error::{LicenseFileError, LicenseFileResult};
use crate::scheme::SignatureFamily;
use ed25519_dalek::{SigningKey, VerifyingKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Private key material for issuing license files.
#[derive(Clone)]
pub struct SigningIdentity {
    ed25519: Option<SigningKey>,
    rsa: Option<RsaPrivateKey>,
}

impl SigningIdentity {
    /// Creates an identity holding only an Ed25519 key pair.
    pub fn ed25519(key: SigningKey) -> Self {
        Self {
            ed25519: Some(key),
            rsa: None,
        }
    }

    /// Creates an identity holding only an RSA key pair.
    pub fn rsa(key: RsaPrivateKey) -> Self {
        Self {
            ed25519: None,
            rsa: Some(key),
        }
    }

    /// Creates an identity holding both key pairs.
    pub fn new(ed25519: SigningKey, rsa: RsaPrivateKey) -> Self {
        Self {
            ed25519: Some(ed25519),
            rsa: Some(rsa),
        }
    }

    /// Returns the Ed25519 signing key, or `InvalidAccount` if the account
    /// holds none.
    pub(crate) fn ed25519_key(&self) -> LicenseFileResult<&SigningKey> {
        self.ed25519
            .as_ref()
            .ok_or_else(|| LicenseFileError::InvalidAccount("missing ed25519 key pair".into()))
    }

    /// Returns the RSA private key, or `InvalidAccount` if the account
    /// holds none.
    pub(crate) fn rsa_key(&self) -> LicenseFileResult<&RsaPrivateKey> {
        self.rsa
            .as_ref()
            .ok_or_else(|| LicenseFileError::InvalidAccount("missing rsa key pair".into()))
    }

    /// Returns true if this identity can sign for the given family.
    #[must_use]
    pub fn supports(&self, family: SignatureFamily) -> bool {
        match family {
            SignatureFamily::Ed25519 => self.ed25519.is_some(),
            SignatureFamily::RsaPkcs1 | SignatureFamily::RsaPss => self.rsa.is_some(),
        }
    }

    /// Derives the public-half identity an offline verifier would hold.
    #[must_use]
    pub fn verifying(&self) -> VerifyingIdentity {
        VerifyingIdentity {
            ed25519: self.ed25519.as_ref().map(SigningKey::verifying_key),
            rsa: self.rsa.as_ref().map(RsaPrivateKey::to_public_key),
        }
    }
}

impl std::fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("ed25519", &self.ed25519.is_some())
            .field("rsa", &self.rsa.is_some())
            .finish()
    }
}

/// Public key material for verifying license files offline.
#[derive(Debug, Clone)]
pub struct VerifyingIdentity {
    ed25519: Option<VerifyingKey>,
    rsa: Option<RsaPublicKey>,
}

impl VerifyingIdentity {
    /// Creates an identity holding only an Ed25519 public key.
    pub fn ed25519(key: VerifyingKey) -> Self {
        Self {
            ed25519: Some(key),
            rsa: None,
        }
    }

    /// Creates an identity holding only an RSA public key.
    pub fn rsa(key: RsaPublicKey) -> Self {
        Self {
            ed25519: None,
            rsa: Some(key),
        }
    }

    /// Creates an identity holding both public keys.
    pub fn new(ed25519: VerifyingKey, rsa: RsaPublicKey) -> Self {
        Self {
            ed25519: Some(ed25519),
            rsa: Some(rsa),
        }
    }

    pub(crate) fn ed25519_key(&self) -> LicenseFileResult<&VerifyingKey> {
        self.ed25519
            .as_ref()
            .ok_or_else(|| LicenseFileError::InvalidAccount("missing ed25519 public key".into()))
    }

    pub(crate) fn rsa_key(&self) -> LicenseFileResult<&RsaPublicKey> {
        self.rsa
            .as_ref()
            .ok_or_else(|| LicenseFileError::InvalidAccount("missing rsa public key".into()))
    }
}
