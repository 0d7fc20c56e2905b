//! Error taxonomy for the request pipeline.
//!
//! # Responsibilities
//! - Carry a tagged failure kind from any layer up to the dispatcher
//! - Map each kind to exactly one HTTP status
//!
//! # Design Decisions
//! - Classification lives in the variant, never in message text; handlers
//!   pick the kind at the point of failure and the dispatcher only reads
//!   `status()`
//! - Authorization failures share 401 with authentication failures, so a
//!   probing caller cannot distinguish "bad credential" from "known
//!   credential, insufficient role"

use thiserror::Error;

/// Every failure a handler or guard can surface to a client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client input failed validation.
    #[error("{0}")]
    Validation(String),

    /// No `Authorization` header on a guarded route.
    #[error("missing bearer token")]
    MissingToken,

    /// `Authorization` header present but not a usable `Bearer` credential.
    #[error("malformed authorization header")]
    MalformedToken,

    /// Token failed verification: bad structure, bad signature, or expired.
    #[error("invalid or expired token")]
    TokenInvalid,

    /// Token verified but its subject no longer exists.
    #[error("unknown user")]
    UnknownPrincipal,

    /// Token verified but its subject is deactivated.
    #[error("user account is inactive")]
    InactivePrincipal,

    /// Authenticated, but no required role held.
    #[error("insufficient role for this action")]
    Forbidden,

    /// The addressed resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The request conflicts with existing state.
    #[error("{0}")]
    Conflict(String),

    /// Unexpected server-side failure; detail stays in the logs.
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    /// The HTTP status this error is reported with.
    pub fn status(&self) -> hyper::StatusCode {
        use hyper::StatusCode;
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::MissingToken
            | Self::MalformedToken
            | Self::TokenInvalid
            | Self::UnknownPrincipal
            | Self::InactivePrincipal => StatusCode::UNAUTHORIZED,
            // Authorization failures share 401 with authentication failures.
            Self::Forbidden => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type ApiResult<T> = Result<T, ApiError>;
