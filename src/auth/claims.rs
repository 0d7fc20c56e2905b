//! Signed token payload.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The claim set embedded in every issued token.
///
/// Immutable once issued; the validity window is fixed at issuance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: the user id the bearer authenticates as.
    pub sub: u64,

    /// Identity hint for logging and display.
    pub email: String,

    /// Issued-at, seconds since the epoch.
    pub iat: i64,

    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

impl Claims {
    /// Build a claim set expiring `ttl_secs` from now.
    pub fn new(sub: u64, email: impl Into<String>, ttl_secs: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub,
            email: email.into(),
            iat: now,
            exp: now + ttl_secs as i64,
        }
    }
}
