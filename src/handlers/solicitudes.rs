//! Solicitud CRUD endpoints.

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::json;

use crate::error::{ApiError, ApiResult};
use crate::http::context::RequestContext;
use crate::http::response;
use crate::http::server::AppState;
use crate::store::{SolicitudStatus, SolicitudUpdate};

/// GET /api/solicitudes
pub async fn list(state: Arc<AppState>, _ctx: RequestContext) -> ApiResult<Response<Full<Bytes>>> {
    Ok(response::json(
        StatusCode::OK,
        &json!({ "data": state.solicitudes.list() }),
    ))
}

/// GET /api/solicitudes/:id
pub async fn get(state: Arc<AppState>, ctx: RequestContext) -> ApiResult<Response<Full<Bytes>>> {
    let id = ctx.param_u64("id")?;
    let solicitud = state
        .solicitudes
        .find(id)
        .ok_or_else(|| ApiError::NotFound("solicitud not found".into()))?;
    Ok(response::json(StatusCode::OK, &solicitud))
}

/// POST /api/solicitudes
pub async fn create(state: Arc<AppState>, ctx: RequestContext) -> ApiResult<Response<Full<Bytes>>> {
    let title = ctx.body_str("title").map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(ApiError::Validation("title is required".into()));
    }

    let employee_id = ctx
        .body_u64("employeeId")
        .ok_or_else(|| ApiError::Validation("employeeId is required".into()))?;
    if state.employees.find(employee_id).is_none() {
        return Err(ApiError::Validation(
            "employeeId does not reference a known employee".into(),
        ));
    }

    let solicitud = state.solicitudes.create(
        title.to_string(),
        ctx.body_str("description").map(str::to_string),
        employee_id,
    );

    tracing::info!(solicitud_id = solicitud.id, employee_id, "Solicitud created");
    Ok(response::json(
        StatusCode::CREATED,
        &json!({ "message": "solicitud created", "data": solicitud }),
    ))
}

/// PUT /api/solicitudes/:id
pub async fn update(state: Arc<AppState>, ctx: RequestContext) -> ApiResult<Response<Full<Bytes>>> {
    let id = ctx.param_u64("id")?;

    let status = match ctx.body_str("status") {
        Some(raw) => Some(
            SolicitudStatus::parse(raw)
                .ok_or_else(|| ApiError::Validation(format!("unknown status {raw:?}")))?,
        ),
        None => None,
    };

    let solicitud = state.solicitudes.update(
        id,
        SolicitudUpdate {
            title: ctx.body_str("title").map(str::trim).map(str::to_string),
            description: ctx.body_str("description").map(str::to_string),
            status,
        },
    )?;

    tracing::info!(solicitud_id = id, "Solicitud updated");
    Ok(response::json(
        StatusCode::OK,
        &json!({ "message": "solicitud updated", "data": solicitud }),
    ))
}

/// DELETE /api/solicitudes/:id
pub async fn remove(state: Arc<AppState>, ctx: RequestContext) -> ApiResult<Response<Full<Bytes>>> {
    let id = ctx.param_u64("id")?;
    state.solicitudes.remove(id)?;

    tracing::info!(solicitud_id = id, "Solicitud deleted");
    Ok(response::json(
        StatusCode::OK,
        &json!({ "message": "solicitud deleted" }),
    ))
}
