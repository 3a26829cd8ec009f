//! Symmetric encryption layer for Warrant license files.
//!
//! This crate implements the optional cipher stage of the license file
//! pipeline:
//!
//! - SHA-256 key derivation from a per-license secret ([`derive_key`])
//! - AES-256-CBC encryption with PKCS#7 padding and a fresh random IV per
//!   call ([`cipher::encrypt`] / [`cipher::decrypt`])
//! - the `base64(ciphertext).base64(iv)` transport string both sides of the
//!   trust boundary agree on
//!
//! All operations are pure transforms over their inputs. The random source
//! is an explicit parameter on `encrypt_with_rng` so tests can produce
//! deterministic fixtures.

pub mod cipher;
pub mod error;
pub mod key;

pub use cipher::{decrypt, encrypt, encrypt_with_rng, IV_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, DerivedKey, KEY_SIZE};
