//! Liveness endpoint.

use std::sync::Arc;

use chrono::Utc;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde_json::json;

use crate::error::ApiResult;
use crate::http::context::RequestContext;
use crate::http::response;
use crate::http::server::AppState;

pub async fn health(
    _state: Arc<AppState>,
    _ctx: RequestContext,
) -> ApiResult<Response<Full<Bytes>>> {
    Ok(response::json(
        StatusCode::OK,
        &json!({
            "status": "ok",
            "store": "memory",
            "ts": Utc::now(),
        }),
    ))
}
