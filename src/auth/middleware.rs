//! Authentication and authorization guards.
//!
//! # Responsibilities
//! - Extract and verify the bearer credential from request headers
//! - Resolve the verified subject to a live [`Principal`]
//! - Enforce role requirements by set intersection
//!
//! # Design Decisions
//! - Guards never write responses; they return a typed error and the
//!   dispatcher translates it (policy stays decoupled from transport)
//! - `authorize` runs `authenticate` first and propagates its failures
//!   unchanged
//! - Only the `Bearer` scheme is accepted; no cookie or query-string
//!   token transport

use hyper::header::AUTHORIZATION;
use hyper::HeaderMap;

use crate::error::{ApiError, ApiResult};

use super::principal::{Principal, PrincipalLoader};
use super::token::TokenService;

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(headers: &HeaderMap) -> ApiResult<&str> {
    let header = headers.get(AUTHORIZATION).ok_or(ApiError::MissingToken)?;
    let value = header.to_str().map_err(|_| ApiError::MalformedToken)?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(ApiError::MalformedToken)?;
    if token.is_empty() {
        return Err(ApiError::MalformedToken);
    }
    Ok(token)
}

/// Establish who the caller is.
///
/// Verifies the bearer token, then resolves the subject through the loader.
/// Fails with `MissingToken`, `MalformedToken`, `TokenInvalid`,
/// `UnknownPrincipal`, or `InactivePrincipal`; attaches nothing on failure.
pub async fn authenticate(
    tokens: &TokenService,
    loader: &dyn PrincipalLoader,
    headers: &HeaderMap,
) -> ApiResult<Principal> {
    let token = bearer_token(headers)?;
    let claims = tokens.verify(token)?;

    let record = loader
        .lookup(claims.sub)
        .await?
        .ok_or(ApiError::UnknownPrincipal)?;

    if !record.active {
        return Err(ApiError::InactivePrincipal);
    }

    Ok(Principal {
        id: record.id,
        email: record.email,
        roles: record.roles.into_iter().collect(),
    })
}

/// Establish who the caller is, then require one of `required_roles`.
///
/// Authentication failures propagate unchanged; an authenticated caller
/// whose roles do not intersect the requirement fails with `Forbidden`.
pub async fn authorize(
    tokens: &TokenService,
    loader: &dyn PrincipalLoader,
    headers: &HeaderMap,
    required_roles: &[&str],
) -> ApiResult<Principal> {
    let principal = authenticate(tokens, loader, headers).await?;

    if !principal.has_any_role(required_roles) {
        return Err(ApiError::Forbidden);
    }

    Ok(principal)
}
