//! License file encryption using AES-256-CBC.
//!
//! The wire format is a single transport string:
//! `base64(ciphertext) + "." + base64(iv)`. A fresh random 16-byte IV is
//! generated for every encryption; plaintext is padded with PKCS#7.
//!
//! CBC carries no authentication tag. Authenticity comes from the detached
//! signature the license layer computes over the transport string, which is
//! why verification always runs before decryption.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;
use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::{CryptoRng, RngCore};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Size of the initialization vector in bytes (one AES block).
pub const IV_SIZE: usize = 16;

/// Encrypts plaintext into the `ciphertext.iv` transport string.
///
/// A fresh IV is drawn from `rng` on every call; IVs are never reused.
/// Production callers pass [`rand::rngs::OsRng`]; tests may pass a seeded
/// generator for reproducible fixtures.
pub fn encrypt_with_rng<R>(key: &DerivedKey, plaintext: &[u8], rng: &mut R) -> String
where
    R: RngCore + CryptoRng,
{
    let mut iv = [0u8; IV_SIZE];
    rng.fill_bytes(&mut iv);

    let ciphertext = Aes256CbcEnc::new(key.as_bytes().into(), &iv.into())
        .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    format!("{}.{}", STANDARD.encode(ciphertext), STANDARD.encode(iv))
}

/// Encrypts plaintext using the operating system's secure random source.
pub fn encrypt(key: &DerivedKey, plaintext: &[u8]) -> String {
    encrypt_with_rng(key, plaintext, &mut rand::rngs::OsRng)
}

/// Decrypts a `ciphertext.iv` transport string produced by [`encrypt`].
///
/// Returns [`CryptoError::Decryption`] on any failure: missing separator,
/// invalid base64, truncated input, or bad padding (the observable symptom
/// of decrypting with the wrong key). The plaintext is never partially
/// returned.
pub fn decrypt(key: &DerivedKey, transport: &str) -> CryptoResult<Vec<u8>> {
    let (ciphertext_b64, iv_b64) = transport
        .split_once('.')
        .ok_or_else(|| CryptoError::Decryption("missing iv separator".to_string()))?;

    let ciphertext = STANDARD
        .decode(ciphertext_b64)
        .map_err(|e| CryptoError::Decryption(format!("invalid ciphertext base64: {e}")))?;
    let iv_bytes = STANDARD
        .decode(iv_b64)
        .map_err(|e| CryptoError::Decryption(format!("invalid iv base64: {e}")))?;

    let iv: [u8; IV_SIZE] = iv_bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| CryptoError::InvalidIvLength {
            expected: IV_SIZE,
            actual: bytes.len(),
        })?;

    Aes256CbcDec::new(key.as_bytes().into(), &iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
        .map_err(|_| CryptoError::Decryption("bad padding or wrong key".to_string()))
}
