//! Per-request state handed to handlers.

use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use crate::auth::Principal;
use crate::error::{ApiError, ApiResult};

/// Everything a handler may need from one request.
///
/// Owned exclusively by the request's task; dropped when the response is
/// written. The body defaults to an empty JSON object when the request
/// carried none or carried unparsable data (lenient-body policy).
pub struct RequestContext {
    /// Correlation id for tracing, generated at dispatch.
    pub request_id: Uuid,

    /// Captured path parameters, raw strings.
    pub params: HashMap<String, String>,

    /// Query parameters; for a repeated key the last occurrence wins.
    pub query: HashMap<String, String>,

    /// Parsed JSON body, `{}` when absent or unparsable.
    pub body: Value,

    /// Present when the route's access policy ran a guard.
    pub principal: Option<Principal>,
}

impl RequestContext {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// A numeric path parameter. A missing name is a routing bug (500);
    /// a non-numeric value is the caller's fault (400).
    pub fn param_u64(&self, name: &str) -> ApiResult<u64> {
        let raw = self
            .param(name)
            .ok_or_else(|| ApiError::Internal(format!("missing path parameter {name:?}")))?;
        raw.parse()
            .map_err(|_| ApiError::Validation(format!("{name} must be a number")))
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// A string field from the JSON body.
    pub fn body_str(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }

    pub fn body_f64(&self, field: &str) -> Option<f64> {
        self.body.get(field).and_then(Value::as_f64)
    }

    pub fn body_u64(&self, field: &str) -> Option<u64> {
        self.body.get(field).and_then(Value::as_u64)
    }
}
