//! Offline license file issuance and verification.
//!
//! A license file is a self-contained, signed (optionally encrypted)
//! certificate that lets a license holder prove entitlement without
//! contacting a server. This crate implements both directions of the
//! pipeline:
//!
//! - **Checkout**: wrap a caller-rendered resource document in an envelope
//!   with issuance metadata, optionally encrypt it with a key derived from
//!   the per-license secret, sign the encoded payload with the account's
//!   configured scheme, and emit the armored certificate text.
//! - **Verification**: strip armor, check the detached signature against
//!   the account's public keys, decrypt if needed, and return the validated
//!   envelope together with its temporal status.
//!
//! # Certificate format
//!
//! ```text
//! -----BEGIN LICENSE FILE-----
//! base64({ "enc": ..., "sig": ..., "alg": ... })
//! -----END LICENSE FILE-----
//! ```
//!
//! The signature covers `license/<enc>` — the encoded, post-encryption
//! payload — so verifiers reject tampering before ever decrypting.
//!
//! # Design principles
//!
//! - **Pure transforms**: no shared state, no I/O beyond the injected clock
//!   and random source; every call is independently thread-safe.
//! - **Caller-owned keys**: signing identities are borrowed per call and
//!   never persisted or mutated here.
//! - **Validation before crypto**: rejected requests never touch key
//!   material.

mod certificate;
mod checkout;
mod document;
mod envelope;
mod error;
mod identity;
mod scheme;
mod signer;

pub use certificate::{Certificate, ARMOR_FOOTER, ARMOR_HEADER};
pub use checkout::{
    checkout, checkout_at, verify, verify_at, CheckoutRequest, FileStatus, VerifiedFile,
};
pub use document::ResourceDocument;
pub use envelope::{Envelope, EnvelopeMeta, DEFAULT_TTL_SECS, MIN_TTL_SECS};
pub use error::{LicenseFileError, LicenseFileResult};
pub use identity::{SigningIdentity, VerifyingIdentity};
pub use scheme::{SignatureFamily, SigningScheme};
