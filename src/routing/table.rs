//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Hold the registered templates with their per-method handlers
//! - Resolve (path, method) to a handler plus captured parameters
//! - Reject conflicting registrations at build time
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Registration order is the tie-break: first matching template that
//!   defines the method wins
//! - A missing method on a matching template is indistinguishable from a
//!   missing path: both exhaust to NoMatch (a single 404 downstream)
//! - Access policy lives on the route, so enforcement cannot be forgotten
//!   per handler

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Response};
use thiserror::Error;

use crate::error::ApiError;
use crate::http::context::RequestContext;
use crate::http::server::AppState;

use super::template::PathTemplate;

/// Boxed future returned by a route handler.
pub type HandlerFuture =
    Pin<Box<dyn Future<Output = Result<Response<Full<Bytes>>, ApiError>> + Send>>;

/// A route handler: shared state plus the per-request context in, exactly
/// one response (or a classifiable error) out.
pub type Handler = Arc<dyn Fn(Arc<AppState>, RequestContext) -> HandlerFuture + Send + Sync>;

/// Wrap an `async fn(Arc<AppState>, RequestContext) -> ApiResult<Response>`
/// into the boxed [`Handler`] shape the table stores.
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Arc<AppState>, RequestContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response<Full<Bytes>>, ApiError>> + Send + 'static,
{
    Arc::new(move |state, ctx| Box::pin(f(state, ctx)))
}

/// Access policy enforced by the dispatcher before the handler runs.
#[derive(Debug, Clone)]
pub enum Access {
    /// No credentials required.
    Public,
    /// Any authenticated principal.
    Authenticated,
    /// Principal whose role set intersects this list (non-empty intersection).
    Roles(&'static [&'static str]),
}

/// Everything registered for one (template, method) pair.
pub struct RouteSpec {
    pub handler: Handler,
    pub access: Access,
}

/// Errors raised while building the table.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("pattern {pattern:?} has a parameter segment without a name")]
    EmptyParameter { pattern: String },

    #[error("duplicate registration of {method} {pattern:?}")]
    Duplicate { pattern: String, method: Method },
}

struct RouteEntry {
    template: PathTemplate,
    method: Method,
    spec: RouteSpec,
}

/// The result of resolving an incoming (path, method).
pub struct MatchedRoute<'t> {
    pub spec: &'t RouteSpec,
    pub params: HashMap<String, String>,
}

/// Static, order-sensitive list of path templates with per-method handlers.
///
/// Built once at startup via [`RouteTable::builder`]; read-only afterwards.
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder {
            entries: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Resolve a path and method against the table.
    ///
    /// Templates are tested in registration order. A template whose segments
    /// match but which was not registered for `method` is skipped, falling
    /// through to later templates and finally to `None`.
    pub fn lookup(&self, path: &str, method: &Method) -> Option<MatchedRoute<'_>> {
        for entry in &self.entries {
            if entry.method != *method {
                continue;
            }
            if let Some(params) = entry.template.matches(path) {
                return Some(MatchedRoute {
                    spec: &entry.spec,
                    params,
                });
            }
        }
        None
    }

    /// Number of registered (template, method) pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder that validates registrations before freezing the table.
pub struct RouteTableBuilder {
    entries: Vec<RouteEntry>,
    seen: HashSet<(String, Method)>,
}

impl RouteTableBuilder {
    /// Register a handler for `pattern` and `method` under `access`.
    ///
    /// Duplicate (pattern, method) pairs are rejected, comparing patterns
    /// with parameter names erased so renaming `:id` to `:key` does not
    /// slip an ambiguous overlap past validation.
    pub fn route(
        mut self,
        pattern: &str,
        method: Method,
        access: Access,
        handler: Handler,
    ) -> Result<Self, RouteError> {
        let template = PathTemplate::parse(pattern)?;
        let key = (template.normalized(), method.clone());
        if !self.seen.insert(key) {
            return Err(RouteError::Duplicate {
                pattern: pattern.to_string(),
                method,
            });
        }
        self.entries.push(RouteEntry {
            template,
            method,
            spec: RouteSpec { handler, access },
        });
        Ok(self)
    }

    /// Freeze the table.
    pub fn build(self) -> RouteTable {
        RouteTable {
            entries: self.entries,
        }
    }
}
