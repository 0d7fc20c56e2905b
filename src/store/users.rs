//! User accounts and the principal lookup they back.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use crate::auth::principal::{PrincipalLoader, PrincipalRecord};
use crate::auth::roles;
use crate::error::{ApiError, ApiResult};

/// A stored user account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub active: bool,
    pub roles: Vec<String>,
}

/// Input for account creation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

struct UserState {
    next_id: u64,
    users: HashMap<u64, UserRecord>,
}

/// In-memory user store; doubles as the [`PrincipalLoader`] implementation.
pub struct UserStore {
    inner: Mutex<UserState>,
}

/// Trim and lowercase; uniqueness and lookups work on this form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(UserState {
                next_id: 1,
                users: HashMap::new(),
            }),
        }
    }

    /// Create an account. Fails with `Conflict` when the normalized email
    /// is already taken.
    pub fn create(&self, new: NewUser, user_roles: Vec<String>) -> ApiResult<UserRecord> {
        let email = normalize_email(&new.email);
        let mut state = self.inner.lock().expect("user store mutex poisoned");

        if state.users.values().any(|u| u.email == email) {
            return Err(ApiError::Conflict("email is already registered".into()));
        }

        let id = state.next_id;
        state.next_id += 1;

        let record = UserRecord {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            email,
            password: new.password,
            active: true,
            roles: user_roles,
        };
        state.users.insert(id, record.clone());
        Ok(record)
    }

    /// Check a credential pair, returning the account on success.
    pub fn verify_credentials(&self, email: &str, password: &str) -> Option<UserRecord> {
        let email = normalize_email(email);
        let state = self.inner.lock().expect("user store mutex poisoned");
        state
            .users
            .values()
            .find(|u| u.email == email && u.password == password)
            .cloned()
    }

    pub fn find(&self, id: u64) -> Option<UserRecord> {
        let state = self.inner.lock().expect("user store mutex poisoned");
        state.users.get(&id).cloned()
    }

    /// Flag an account inactive; subsequent authentications fail.
    pub fn deactivate(&self, id: u64) -> bool {
        let mut state = self.inner.lock().expect("user store mutex poisoned");
        match state.users.get_mut(&id) {
            Some(user) => {
                user.active = false;
                true
            }
            None => false,
        }
    }

    /// Seed the store with an administrator account for bootstrap.
    pub fn seed_administrator(&self, email: &str, password: &str) -> ApiResult<UserRecord> {
        self.create(
            NewUser {
                first_name: "Admin".into(),
                last_name: "Root".into(),
                email: email.into(),
                password: password.into(),
            },
            vec![roles::ADMINISTRATOR.into()],
        )
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrincipalLoader for UserStore {
    async fn lookup(&self, subject_id: u64) -> ApiResult<Option<PrincipalRecord>> {
        Ok(self.find(subject_id).map(|user| PrincipalRecord {
            id: user.id,
            email: user.email,
            roles: user.roles,
            active: user.active,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            first_name: "Ana".into(),
            last_name: "García".into(),
            email: email.into(),
            password: "supersecret".into(),
        }
    }

    #[test]
    fn duplicate_email_conflicts_after_normalization() {
        let store = UserStore::new();
        store
            .create(new_user("Ana@Example.com"), vec!["employee".into()])
            .unwrap();
        let result = store.create(new_user("  ana@example.com "), vec!["employee".into()]);
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[test]
    fn credentials_check() {
        let store = UserStore::new();
        store
            .create(new_user("ana@example.com"), vec!["employee".into()])
            .unwrap();
        assert!(store
            .verify_credentials("ana@example.com", "supersecret")
            .is_some());
        assert!(store
            .verify_credentials("ana@example.com", "wrong")
            .is_none());
        assert!(store.verify_credentials("nobody@example.com", "x").is_none());
    }

    #[tokio::test]
    async fn loader_reflects_deactivation() {
        let store = UserStore::new();
        let user = store
            .create(new_user("ana@example.com"), vec!["employee".into()])
            .unwrap();

        let record = store.lookup(user.id).await.unwrap().unwrap();
        assert!(record.active);

        assert!(store.deactivate(user.id));
        let record = store.lookup(user.id).await.unwrap().unwrap();
        assert!(!record.active);

        assert!(store.lookup(9999).await.unwrap().is_none());
    }
}
