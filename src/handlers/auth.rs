//! Registration and login.
//!
//! These two endpoints are public; they are where tokens are minted.
//! Credential failures are written directly by the handler (401/403),
//! since they are domain outcomes rather than guard failures.

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::json;

use crate::auth::roles;
use crate::error::{ApiError, ApiResult};
use crate::http::context::RequestContext;
use crate::http::response;
use crate::http::server::AppState;
use crate::store::NewUser;

use super::is_valid_email;

/// POST /api/auth/register
pub async fn register(
    state: Arc<AppState>,
    ctx: RequestContext,
) -> ApiResult<Response<Full<Bytes>>> {
    let first_name = ctx.body_str("firstName").map(str::trim).unwrap_or_default();
    let last_name = ctx.body_str("lastName").map(str::trim).unwrap_or_default();
    let email = ctx.body_str("email").map(str::trim).unwrap_or_default();
    let password = ctx.body_str("password").unwrap_or_default();

    if first_name.is_empty() || last_name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation("all fields are required".into()));
    }
    if !is_valid_email(email) {
        return Err(ApiError::Validation("invalid email".into()));
    }
    if password.len() < 8 {
        return Err(ApiError::Validation(
            "password must be at least 8 characters".into(),
        ));
    }

    let user = state.users.create(
        NewUser {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        },
        vec![roles::EMPLOYEE.to_string()],
    )?;

    let token = state.tokens.issue(user.id, &user.email)?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(response::json(
        StatusCode::CREATED,
        &json!({
            "message": "user registered",
            "token": token,
            "user": user,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    state: Arc<AppState>,
    ctx: RequestContext,
) -> ApiResult<Response<Full<Bytes>>> {
    let email = ctx.body_str("email").map(str::trim).unwrap_or_default();
    let password = ctx.body_str("password").unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(ApiError::Validation(
            "email and password are required".into(),
        ));
    }
    if !is_valid_email(email) {
        return Err(ApiError::Validation("invalid email".into()));
    }

    let Some(user) = state.users.verify_credentials(email, password) else {
        // Same answer for unknown email and wrong password.
        return Ok(response::error(
            StatusCode::UNAUTHORIZED,
            "invalid credentials",
        ));
    };

    if !user.active {
        return Ok(response::error(
            StatusCode::FORBIDDEN,
            "user account is inactive",
        ));
    }

    let token = state.tokens.issue(user.id, &user.email)?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(response::json(
        StatusCode::OK,
        &json!({
            "message": "login successful",
            "token": token,
            "user": user,
        }),
    ))
}
