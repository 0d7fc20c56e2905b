//! Business endpoints and their route registrations.
//!
//! Handlers write their own success responses (status + JSON body); any
//! `ApiError` they return is translated at the dispatcher boundary. The
//! route table below is the single place access policy is declared.

pub mod auth;
pub mod employees;
pub mod health;
pub mod solicitudes;

use hyper::Method;

use crate::auth::roles;
use crate::routing::{handler, Access, RouteError, RouteTable};

const ADMIN_ONLY: &[&str] = &[roles::ADMINISTRATOR];

/// Register every route. Runs once at startup; the resulting table is
/// immutable. Duplicate registrations fail here rather than at runtime.
pub fn build_routes() -> Result<RouteTable, RouteError> {
    let table = RouteTable::builder()
        .route("/health", Method::GET, Access::Public, handler(health::health))?
        .route(
            "/api/auth/register",
            Method::POST,
            Access::Public,
            handler(auth::register),
        )?
        .route(
            "/api/auth/login",
            Method::POST,
            Access::Public,
            handler(auth::login),
        )?
        .route(
            "/api/employees",
            Method::GET,
            Access::Authenticated,
            handler(employees::list),
        )?
        .route(
            "/api/employees",
            Method::POST,
            Access::Authenticated,
            handler(employees::create),
        )?
        .route(
            "/api/employees/:id",
            Method::GET,
            Access::Authenticated,
            handler(employees::get),
        )?
        .route(
            "/api/employees/:id",
            Method::PUT,
            Access::Roles(ADMIN_ONLY),
            handler(employees::update),
        )?
        .route(
            "/api/employees/:id",
            Method::DELETE,
            Access::Roles(ADMIN_ONLY),
            handler(employees::remove),
        )?
        .route(
            "/api/solicitudes",
            Method::GET,
            Access::Authenticated,
            handler(solicitudes::list),
        )?
        .route(
            "/api/solicitudes",
            Method::POST,
            Access::Authenticated,
            handler(solicitudes::create),
        )?
        .route(
            "/api/solicitudes/:id",
            Method::GET,
            Access::Authenticated,
            handler(solicitudes::get),
        )?
        .route(
            "/api/solicitudes/:id",
            Method::PUT,
            Access::Roles(ADMIN_ONLY),
            handler(solicitudes::update),
        )?
        .route(
            "/api/solicitudes/:id",
            Method::DELETE,
            Access::Roles(ADMIN_ONLY),
            handler(solicitudes::remove),
        )?
        .build();
    Ok(table)
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain,
/// no whitespace.
pub(crate) fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_builds() {
        let table = build_routes().unwrap();
        assert_eq!(table.len(), 13);
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.com"));
        assert!(!is_valid_email("ana"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("ana@.com"));
        assert!(!is_valid_email("ana garcia@example.com"));
    }
}
