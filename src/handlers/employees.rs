//! Employee CRUD endpoints.

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::http::context::RequestContext;
use crate::http::response;
use crate::http::server::AppState;
use crate::store::EmployeeUpdate;

use super::is_valid_email;

/// GET /api/employees
pub async fn list(state: Arc<AppState>, _ctx: RequestContext) -> ApiResult<Response<Full<Bytes>>> {
    Ok(response::json(
        StatusCode::OK,
        &json!({ "data": state.employees.list() }),
    ))
}

/// GET /api/employees/:id
pub async fn get(state: Arc<AppState>, ctx: RequestContext) -> ApiResult<Response<Full<Bytes>>> {
    let id = ctx.param_u64("id")?;
    let employee = state
        .employees
        .find(id)
        .ok_or_else(|| ApiError::NotFound("employee not found".into()))?;
    Ok(response::json(StatusCode::OK, &employee))
}

/// POST /api/employees
pub async fn create(state: Arc<AppState>, ctx: RequestContext) -> ApiResult<Response<Full<Bytes>>> {
    let first_name = ctx.body_str("firstName").map(str::trim).unwrap_or_default();
    let last_name = ctx.body_str("lastName").map(str::trim).unwrap_or_default();

    if first_name.is_empty() || last_name.is_empty() {
        return Err(ApiError::Validation(
            "first and last name are required".into(),
        ));
    }

    let email = ctx.body_str("email").map(str::trim).map(str::to_string);
    if let Some(ref email) = email {
        if !is_valid_email(email) {
            return Err(ApiError::Validation("invalid email".into()));
        }
    }

    let employee = state.employees.create(
        first_name.to_string(),
        last_name.to_string(),
        ctx.body_str("position").map(str::trim).map(str::to_string),
        ctx.body_f64("salary"),
        email,
    )?;

    tracing::info!(employee_id = employee.id, "Employee created");
    Ok(response::json(
        StatusCode::CREATED,
        &json!({ "message": "employee created", "data": employee }),
    ))
}

/// PUT /api/employees/:id
pub async fn update(state: Arc<AppState>, ctx: RequestContext) -> ApiResult<Response<Full<Bytes>>> {
    let id = ctx.param_u64("id")?;

    let email = ctx.body_str("email").map(str::trim).map(str::to_string);
    if let Some(ref email) = email {
        if !is_valid_email(email) {
            return Err(ApiError::Validation("invalid email".into()));
        }
    }

    let employee = state.employees.update(
        id,
        EmployeeUpdate {
            first_name: ctx.body_str("firstName").map(str::trim).map(str::to_string),
            last_name: ctx.body_str("lastName").map(str::trim).map(str::to_string),
            position: ctx.body_str("position").map(str::trim).map(str::to_string),
            salary: ctx.body_f64("salary"),
            email,
        },
    )?;

    tracing::info!(employee_id = id, "Employee updated");
    Ok(response::json(
        StatusCode::OK,
        &json!({ "message": "employee updated", "data": employee }),
    ))
}

/// DELETE /api/employees/:id
pub async fn remove(state: Arc<AppState>, ctx: RequestContext) -> ApiResult<Response<Full<Bytes>>> {
    let id = ctx.param_u64("id")?;
    state.employees.remove(id)?;

    tracing::info!(employee_id = id, "Employee deleted");
    Ok(response::json(
        StatusCode::OK,
        &json!({ "message": "employee deleted" }),
    ))
}
