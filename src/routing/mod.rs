//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, method)
//!     → table.rs (scan templates in registration order)
//!     → template.rs (segment-by-segment match, capture params)
//!     → Return: MatchedRoute { spec, params } or NoMatch
//!
//! Table Construction (at startup):
//!     route(pattern, method, access, handler)*
//!     → Parse templates, reject duplicate (pattern, method) pairs
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Table built and validated at startup, immutable at runtime
//! - First template that matches the path AND defines the method wins;
//!   a path match without the method falls through to later templates
//! - No implicit HEAD or OPTIONS routes; preflight is handled upstream
//! - Parameter values are raw path segments, no type coercion

pub mod table;
pub mod template;

pub use table::{handler, Access, Handler, MatchedRoute, RouteError, RouteSpec, RouteTable};
pub use template::PathTemplate;
