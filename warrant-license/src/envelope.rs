//! The metadata-wrapped payload of a license file.
//!
//! The envelope is the canonical JSON that gets encoded (and optionally
//! encrypted) into a certificate:
//!
//! ```json
//! {
//!   "meta": { "iat": "...", "exp": "..." | null, "ttl": 2629746 | null },
//!   "data": { ... primary resource ... },
//!   "included": [ ... ]   // present only when non-empty
//! }
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default validity window when the caller does not specify a TTL:
/// one month (average Gregorian month in seconds).
pub const DEFAULT_TTL_SECS: i64 = 2_629_746;

/// Minimum TTL for an offline grant: one day. Shorter windows defeat the
/// purpose of an offline-verifiable certificate and are rejected outright.
pub const MIN_TTL_SECS: i64 = 86_400;

/// The `meta` block of an envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeMeta {
    /// Issuance timestamp (ISO-8601).
    pub iat: DateTime<Utc>,
    /// Expiry timestamp (ISO-8601), or null for certificates with no TTL.
    pub exp: Option<DateTime<Utc>>,
    /// Validity window in whole seconds, or null for no expiry.
    pub ttl: Option<i64>,
}

/// A license file envelope: issuance metadata wrapped around the rendered
/// resource document. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub meta: EnvelopeMeta,
    pub data: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Value>,
}

impl Envelope {
    /// Builds an envelope issued at `issued_at` with the given validity
    /// window. `ttl: None` means no expiry: both `exp` and `ttl` are null.
    pub(crate) fn build(
        data: Value,
        included: Vec<Value>,
        ttl: Option<Duration>,
        issued_at: DateTime<Utc>,
    ) -> Self {
        let meta = match ttl {
            Some(ttl) => EnvelopeMeta {
                iat: issued_at,
                exp: Some(issued_at + ttl),
                ttl: Some(ttl.num_seconds()),
            },
            None => EnvelopeMeta {
                iat: issued_at,
                exp: None,
                ttl: None,
            },
        };

        Self {
            meta,
            data,
            included,
        }
    }

    /// Returns true if the envelope's expiry has passed at `now`.
    /// Envelopes with no expiry never expire.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.meta.exp, Some(exp) if exp < now)
    }
}
