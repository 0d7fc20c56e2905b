//! Workforce API
//!
//! An employee and solicitud records service whose request-handling spine
//! is built directly on hyper, without a web framework.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                  WORKFORCE API                    │
//!                    │                                                   │
//!   Client Request   │  ┌─────────┐   ┌────────────┐   ┌─────────────┐  │
//!   ─────────────────┼─▶│   net   │──▶│ dispatcher │──▶│   routing   │  │
//!                    │  │listener │   │ CORS/body  │   │ path templ. │  │
//!                    │  └─────────┘   └─────┬──────┘   └──────┬──────┘  │
//!                    │                      │                 │         │
//!                    │                      ▼                 ▼         │
//!                    │               ┌────────────┐    ┌────────────┐   │
//!                    │               │    auth    │    │  handlers  │   │
//!                    │               │ token/RBAC │    │ + stores   │   │
//!                    │               └────────────┘    └────────────┘   │
//!                    │                                                   │
//!                    │  ┌────────────────────────────────────────────┐  │
//!                    │  │           Cross-Cutting Concerns            │  │
//!                    │  │  ┌────────┐ ┌───────────────┐ ┌──────────┐ │  │
//!                    │  │  │ config │ │ observability │ │  error   │ │  │
//!                    │  │  └────────┘ └───────────────┘ └──────────┘ │  │
//!                    │  └────────────────────────────────────────────┘  │
//!                    └──────────────────────────────────────────────────┘
//! ```
//!
//! The route table and token signing configuration are read-only after
//! startup; per-request state is owned by one connection task.

// Core subsystems
pub mod config;
pub mod http;
pub mod net;
pub mod routing;

// Request policy
pub mod auth;
pub mod error;

// Business layer
pub mod handlers;
pub mod store;

// Cross-cutting concerns
pub mod observability;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use http::server::{AppState, HttpServer};
pub use net::Listener;
