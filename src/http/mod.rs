//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (hyper http1 setup, one task per connection)
//!     → dispatcher.rs (CORS, preflight short-circuit, route match,
//!       guards, lenient body parse, handler invocation, error mapping)
//!     → response.rs (JSON bodies, CORS headers)
//!     → Send to client (exactly one response per request)
//! ```

pub mod context;
pub mod dispatcher;
pub mod response;
pub mod server;

pub use context::RequestContext;
pub use server::{AppState, HttpServer};
