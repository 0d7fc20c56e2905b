//! Response construction helpers.
//!
//! # Responsibilities
//! - Build JSON responses with the right content type
//! - Apply the permissive cross-origin headers
//!
//! # Design Decisions
//! - Error bodies are `{"error": ...}`; plain route misses are
//!   `{"message": ...}` (two shapes, matching the error contract)
//! - CORS headers are applied in one place, so every response carries
//!   them, error paths included

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;
use serde_json::json;

/// Allowed origins, methods, and headers sent on every response.
const ALLOW_ORIGIN: &str = "*";
const ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";
const ALLOW_HEADERS: &str = "Content-Type, Authorization";

/// Serialize `body` as a JSON response with `status`.
pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let payload = serde_json::to_vec(body).unwrap_or_else(|_| b"{}".to_vec());
    let mut response = Response::new(Full::new(Bytes::from(payload)));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

/// `{"error": message}` with `status`.
pub fn error(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    json(status, &json!({ "error": message }))
}

/// `{"message": text}` with `status`.
pub fn message(status: StatusCode, text: &str) -> Response<Full<Bytes>> {
    json(status, &json!({ "message": text }))
}

/// An empty body with `status` (preflight responses).
pub fn empty(status: StatusCode) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    response
}

/// Attach the permissive cross-origin headers.
///
/// Called exactly once per response at the dispatcher boundary, before the
/// response is handed to the connection.
pub fn apply_cors(response: &mut Response<Full<Bytes>>) {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn error_and_message_bodies_differ_in_field_name() {
        let body = error(StatusCode::UNAUTHORIZED, "missing bearer token")
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "missing bearer token");

        let body = message(StatusCode::NOT_FOUND, "route not found")
            .into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "route not found");
    }

    #[test]
    fn cors_headers_present_after_apply() {
        let mut response = empty(StatusCode::NO_CONTENT);
        apply_cors(&mut response);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET,POST,PUT,DELETE,OPTIONS"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
    }
}
