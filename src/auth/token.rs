//! Token issuance and verification.
//!
//! # Responsibilities
//! - Sign compact HS256 tokens carrying [`Claims`]
//! - Verify structure, signature, and expiry on the way back in
//!
//! # Design Decisions
//! - One process-wide signing secret; rotating it invalidates every
//!   outstanding token (no grace-period key rotation)
//! - Every verification failure collapses to `TokenInvalid`; callers
//!   cannot distinguish expired from tampered
//! - Zero expiry leeway, so a token is invalid the second it expires

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::error::{ApiError, ApiResult};

use super::claims::Claims;

/// Issues and verifies signed, time-bound bearer credentials.
///
/// Read-only after construction; shared freely across request tasks.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    /// Sign a token for `sub` expiring after the configured lifetime.
    pub fn issue(&self, sub: u64, email: &str) -> ApiResult<String> {
        let claims = Claims::new(sub, email, self.ttl_secs);
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
    }

    /// Sign a pre-built claim set. Used where the validity window must be
    /// controlled explicitly (expiry tests, pre-dated credentials).
    pub fn issue_claims(&self, claims: &Claims) -> ApiResult<String> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("token signing failed: {e}")))
    }

    /// Verify a token and return its claims.
    ///
    /// Malformed structure, a wrong signature, and an elapsed expiry are all
    /// reported uniformly as [`ApiError::TokenInvalid`].
    pub fn verify(&self, token: &str) -> ApiResult<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::TokenInvalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("unit-test-secret", 3600)
    }

    #[test]
    fn issued_token_round_trips() {
        let tokens = service();
        let token = tokens.issue(42, "ana@example.com").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "ana@example.com");
    }

    #[test]
    fn expired_token_is_invalid() {
        let tokens = service();
        let mut claims = Claims::new(42, "ana@example.com", 3600);
        claims.iat -= 7200;
        claims.exp -= 7200;
        let token = tokens.issue_claims(&claims).unwrap();
        assert!(matches!(tokens.verify(&token), Err(ApiError::TokenInvalid)));
    }

    #[test]
    fn tampered_signature_is_invalid() {
        let tokens = service();
        let other = TokenService::new("a-different-secret", 3600);
        let token = other.issue(42, "ana@example.com").unwrap();
        assert!(matches!(tokens.verify(&token), Err(ApiError::TokenInvalid)));
    }

    #[test]
    fn garbage_is_invalid() {
        let tokens = service();
        assert!(matches!(tokens.verify(""), Err(ApiError::TokenInvalid)));
        assert!(matches!(
            tokens.verify("token.invalido.aqui"),
            Err(ApiError::TokenInvalid)
        ));
    }

    #[test]
    fn expired_and_tampered_look_the_same() {
        let tokens = service();

        let mut stale = Claims::new(1, "a@example.com", 3600);
        stale.exp -= 7200;
        let expired = tokens.issue_claims(&stale).unwrap();

        let forged = TokenService::new("wrong", 3600)
            .issue(1, "a@example.com")
            .unwrap();

        let e1 = tokens.verify(&expired).unwrap_err();
        let e2 = tokens.verify(&forged).unwrap_err();
        assert_eq!(e1.status(), e2.status());
        assert_eq!(e1.to_string(), e2.to_string());
    }
}
