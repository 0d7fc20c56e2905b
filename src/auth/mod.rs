//! Authentication and authorization subsystem.
//!
//! # Data Flow
//! ```text
//! Authorization header
//!     → middleware.rs (extract bearer credential)
//!     → token.rs (verify signature + expiry → Claims)
//!     → PrincipalLoader (resolve current user + roles)
//!     → Principal attached to the request context
//!
//! authorize(roles…) = authenticate + role-set intersection
//! ```
//!
//! # Design Decisions
//! - Guards are pure: they attach state or fail with a typed error, and
//!   never write an HTTP response themselves
//! - Tokens are opaque bearer credentials; possession authenticates
//! - Expired and tampered tokens are indistinguishable to callers
//! - The user store is reached only through the PrincipalLoader seam

pub mod claims;
pub mod middleware;
pub mod principal;
pub mod roles;
pub mod token;

pub use claims::Claims;
pub use middleware::{authenticate, authorize};
pub use principal::{Principal, PrincipalLoader, PrincipalRecord};
pub use token::TokenService;
