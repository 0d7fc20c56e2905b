//! Per-request orchestration.
//!
//! # Responsibilities
//! - Short-circuit preflight requests before route lookup
//! - Parse the URL into path and query parameters
//! - Resolve the route and enforce its access policy
//! - Buffer and leniently parse the request body
//! - Invoke the handler and translate escaped errors into responses
//!
//! # Design Decisions
//! - Steps run in a fixed order; auth depends on the matched route, body
//!   parsing happens only after the guards pass
//! - Exactly one response per request, enforced by the return type
//! - Cross-origin headers are attached to every response, error and
//!   preflight paths included
//! - An unparsable body becomes `{}` instead of a 4xx (lenient-body
//!   policy); only a transport failure while reading the body is an error
//! - For a repeated query key, the last occurrence wins

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use crate::auth;
use crate::error::{ApiError, ApiResult};
use crate::observability::metrics;
use crate::routing::Access;

use super::context::RequestContext;
use super::response;
use super::server::AppState;

/// Turn one inbound request into exactly one response.
///
/// This is the failure boundary: any [`ApiError`] escaping a guard or
/// handler is classified here by its kind into a status code and an
/// `{"error": ...}` body.
pub async fn dispatch<B>(state: Arc<AppState>, req: Request<B>) -> Response<Full<Bytes>>
where
    B: hyper::body::Body + Send,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    let start = Instant::now();
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let mut response = match route_request(&state, req, request_id).await {
        Ok(response) => response,
        Err(error) => {
            tracing::debug!(
                request_id = %request_id,
                error = %error,
                "Request failed"
            );
            response::error(error.status(), &error.to_string())
        }
    };

    response::apply_cors(&mut response);

    let status = response.status().as_u16();
    metrics::record_request(method.as_str(), status, start);
    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}

/// The ordered pipeline: preflight → query parse → route match → guards →
/// body → handler.
async fn route_request<B>(
    state: &Arc<AppState>,
    req: Request<B>,
    request_id: Uuid,
) -> ApiResult<Response<Full<Bytes>>>
where
    B: hyper::body::Body + Send,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    // Preflight is answered before the router ever sees the request, so
    // OPTIONS succeeds on any path, registered or not.
    if req.method() == Method::OPTIONS {
        return Ok(response::empty(StatusCode::NO_CONTENT));
    }

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = parse_query(req.uri().query());

    let Some(matched) = state.routes.lookup(&path, &method) else {
        return Ok(response::message(StatusCode::NOT_FOUND, "route not found"));
    };
    let params = matched.params;
    let access = matched.spec.access.clone();
    let handler = Arc::clone(&matched.spec.handler);

    // Guards run before the body is touched; they attach a principal or
    // fail without side effects.
    let principal = match access {
        Access::Public => None,
        Access::Authenticated => Some(
            auth::authenticate(&state.tokens, state.loader.as_ref(), req.headers()).await?,
        ),
        Access::Roles(required) => Some(
            auth::authorize(&state.tokens, state.loader.as_ref(), req.headers(), required)
                .await?,
        ),
    };

    let body = if method == Method::POST || method == Method::PUT {
        read_body_lenient(req).await?
    } else {
        Value::Object(serde_json::Map::new())
    };

    let ctx = RequestContext {
        request_id,
        params,
        query,
        body,
        principal,
    };

    (handler)(Arc::clone(state), ctx).await
}

/// Decode the query string; values are strings and the last occurrence of
/// a repeated key wins.
fn parse_query(raw: Option<&str>) -> HashMap<String, String> {
    let mut query = HashMap::new();
    if let Some(raw) = raw {
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            query.insert(key.into_owned(), value.into_owned());
        }
    }
    query
}

/// Buffer the whole body, then parse it as JSON; anything unparsable
/// (including an empty body) becomes an empty object.
async fn read_body_lenient<B>(req: Request<B>) -> ApiResult<Value>
where
    B: hyper::body::Body + Send,
    B::Data: Send,
    B::Error: std::fmt::Display,
{
    let bytes = req
        .into_body()
        .collect()
        .await
        .map_err(|e| ApiError::Internal(format!("failed to read request body: {e}")))?
        .to_bytes();

    Ok(serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::Object(serde_json::Map::new())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenService;
    use crate::config::AppConfig;
    use crate::http::response;
    use crate::routing::{table::handler, Access, RouteTable};
    use crate::store::{EmployeeStore, SolicitudStore, UserStore};
    use hyper::header;
    use serde_json::json;

    fn state_with(routes: RouteTable) -> Arc<AppState> {
        let users = Arc::new(UserStore::new());
        Arc::new(AppState {
            config: AppConfig::default(),
            tokens: TokenService::new("dispatcher-test-secret", 3600),
            routes,
            loader: users.clone(),
            users,
            employees: EmployeeStore::new(),
            solicitudes: SolicitudStore::new(),
        })
    }

    fn echo_routes() -> RouteTable {
        RouteTable::builder()
            .route(
                "/echo",
                Method::POST,
                Access::Public,
                handler(|_state, ctx| async move {
                    Ok(response::json(StatusCode::OK, &ctx.body))
                }),
            )
            .unwrap()
            .route(
                "/q",
                Method::GET,
                Access::Public,
                handler(|_state, ctx| async move {
                    Ok(response::json(
                        StatusCode::OK,
                        &json!({ "k": ctx.query("k") }),
                    ))
                }),
            )
            .unwrap()
            .route(
                "/private",
                Method::GET,
                Access::Authenticated,
                handler(|_state, _ctx| async move {
                    Ok(response::message(StatusCode::OK, "in"))
                }),
            )
            .unwrap()
            .build()
    }

    fn request(method: Method, uri: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    async fn body_json(response: Response<Full<Bytes>>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn preflight_short_circuits_on_any_path() {
        let state = state_with(echo_routes());
        let response = dispatch(state, request(Method::OPTIONS, "/no/such/route", "")).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn unmatched_route_is_404_with_message_body() {
        let state = state_with(echo_routes());
        let response = dispatch(state, request(Method::GET, "/nowhere", "")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let value = body_json(response).await;
        assert_eq!(value["message"], "route not found");
    }

    #[tokio::test]
    async fn wrong_method_is_also_404() {
        let state = state_with(echo_routes());
        let response = dispatch(state, request(Method::DELETE, "/echo", "")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unparsable_body_becomes_empty_object() {
        let state = state_with(echo_routes());
        let response = dispatch(
            state.clone(),
            request(Method::POST, "/echo", "definitely not json"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({}));

        let response = dispatch(state, request(Method::POST, "/echo", "")).await;
        assert_eq!(body_json(response).await, json!({}));
    }

    #[tokio::test]
    async fn valid_body_passes_through() {
        let state = state_with(echo_routes());
        let response = dispatch(
            state,
            request(Method::POST, "/echo", r#"{"firstName":"Ana"}"#),
        )
        .await;
        assert_eq!(body_json(response).await, json!({"firstName": "Ana"}));
    }

    #[tokio::test]
    async fn repeated_query_key_keeps_last_occurrence() {
        let state = state_with(echo_routes());
        let response = dispatch(state, request(Method::GET, "/q?k=a&k=b", "")).await;
        assert_eq!(body_json(response).await, json!({"k": "b"}));
    }

    #[tokio::test]
    async fn guard_failure_maps_to_error_body_with_cors() {
        let state = state_with(echo_routes());
        let response = dispatch(state, request(Method::GET, "/private", "")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let value = body_json(response).await;
        assert_eq!(value["error"], "missing bearer token");
    }
}
