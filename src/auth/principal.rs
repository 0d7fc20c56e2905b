//! The authenticated caller and the seam it is loaded through.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::ApiResult;

/// The authenticated caller for the lifetime of one request.
///
/// Constructed by the auth middleware from verified claims plus the loader's
/// current view of the user; owned by the request task and discarded with it.
#[derive(Debug, Clone)]
pub struct Principal {
    pub id: u64,
    pub email: String,
    pub roles: HashSet<String>,
}

impl Principal {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Non-empty intersection with `required` satisfies RBAC.
    pub fn has_any_role(&self, required: &[&str]) -> bool {
        required.iter().any(|role| self.roles.contains(*role))
    }
}

/// A user as the loader currently knows it.
#[derive(Debug, Clone)]
pub struct PrincipalRecord {
    pub id: u64,
    pub email: String,
    pub roles: Vec<String>,
    pub active: bool,
}

/// Abstract capability for resolving a verified subject id to a user.
///
/// Owned by the data layer; the auth middleware depends on it only through
/// this trait. The lookup may suspend on I/O.
#[async_trait]
pub trait PrincipalLoader: Send + Sync {
    async fn lookup(&self, subject_id: u64) -> ApiResult<Option<PrincipalRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(roles: &[&str]) -> Principal {
        Principal {
            id: 1,
            email: "ana@example.com".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn role_intersection() {
        let employee = principal(&["employee"]);
        assert!(employee.has_role("employee"));
        assert!(!employee.has_role("administrator"));
        assert!(employee.has_any_role(&["employee", "administrator"]));
        assert!(!employee.has_any_role(&["administrator"]));
        assert!(!employee.has_any_role(&[]));
    }
}
