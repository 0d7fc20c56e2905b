//! HTTP server setup.
//!
//! # Responsibilities
//! - Assemble shared application state (route table, token service, stores)
//! - Serve connections from the bounded listener with hyper http1
//! - Dispatch each request through the pipeline
//! - Stop accepting on ctrl-c
//!
//! # Design Decisions
//! - No web framework: the route table and dispatcher are this crate's own
//! - State behind one `Arc`; everything in it is either immutable after
//!   startup (routes, signing config) or internally synchronized (stores)
//! - One tokio task per connection; the connection permit rides along and
//!   is released on task exit

use std::convert::Infallible;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::auth::{PrincipalLoader, TokenService};
use crate::config::AppConfig;
use crate::handlers;
use crate::net::Listener;
use crate::routing::{RouteError, RouteTable};
use crate::store::{EmployeeStore, SolicitudStore, UserStore};

use super::dispatcher;

/// Shared state injected into every handler.
pub struct AppState {
    pub config: AppConfig,
    pub tokens: TokenService,
    pub routes: RouteTable,
    /// The abstract principal lookup capability; backed by `users`.
    pub loader: Arc<dyn PrincipalLoader>,
    pub users: Arc<UserStore>,
    pub employees: EmployeeStore,
    pub solicitudes: SolicitudStore,
}

impl AppState {
    /// Build the full application state with the standard route table.
    pub fn new(config: AppConfig) -> Result<Arc<Self>, RouteError> {
        let users = Arc::new(UserStore::new());
        Ok(Arc::new(Self {
            tokens: TokenService::new(&config.auth.signing_secret, config.auth.token_ttl_secs),
            routes: handlers::build_routes()?,
            loader: users.clone(),
            users,
            employees: EmployeeStore::new(),
            solicitudes: SolicitudStore::new(),
            config,
        }))
    }
}

/// The HTTP server for the workforce API.
pub struct HttpServer {
    state: Arc<AppState>,
}

impl HttpServer {
    /// Create a server from validated configuration.
    pub fn new(config: AppConfig) -> Result<Self, RouteError> {
        Ok(Self {
            state: AppState::new(config)?,
        })
    }

    /// Shared state handle, for seeding and tests.
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Accept connections until ctrl-c.
    pub async fn run(self, listener: Listener) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.state.routes.len(),
            "HTTP server starting"
        );

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received");
                    break;
                }
                accepted = listener.accept() => {
                    let (stream, peer_addr, permit) = match accepted {
                        Ok(accepted) => accepted,
                        Err(e) => {
                            tracing::warn!(error = %e, "Accept failed");
                            continue;
                        }
                    };

                    let state = self.state.clone();
                    tokio::spawn(async move {
                        let io = TokioIo::new(stream);
                        let service = service_fn(move |req| {
                            let state = state.clone();
                            async move {
                                Ok::<_, Infallible>(dispatcher::dispatch(state, req).await)
                            }
                        });

                        if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                            tracing::debug!(peer_addr = %peer_addr, error = %e, "Connection error");
                        }
                        drop(permit);
                    });
                }
            }
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
