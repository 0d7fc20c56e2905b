//! Employee records.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::store::users::normalize_email;

/// An employee record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub salary: Option<f64>,
    pub email: Option<String>,
}

/// Field-wise update; `None` leaves the field untouched.
#[derive(Debug, Default)]
pub struct EmployeeUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub position: Option<String>,
    pub salary: Option<f64>,
    pub email: Option<String>,
}

struct EmployeeState {
    next_id: u64,
    employees: HashMap<u64, Employee>,
}

/// In-memory employee store.
pub struct EmployeeStore {
    inner: Mutex<EmployeeState>,
}

impl EmployeeStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(EmployeeState {
                next_id: 1,
                employees: HashMap::new(),
            }),
        }
    }

    pub fn list(&self) -> Vec<Employee> {
        let state = self.inner.lock().expect("employee store mutex poisoned");
        let mut all: Vec<Employee> = state.employees.values().cloned().collect();
        all.sort_by_key(|e| e.id);
        all
    }

    pub fn find(&self, id: u64) -> Option<Employee> {
        let state = self.inner.lock().expect("employee store mutex poisoned");
        state.employees.get(&id).cloned()
    }

    /// Insert a record; the optional email must be unique.
    pub fn create(
        &self,
        first_name: String,
        last_name: String,
        position: Option<String>,
        salary: Option<f64>,
        email: Option<String>,
    ) -> ApiResult<Employee> {
        let email = email.map(|e| normalize_email(&e));
        let mut state = self.inner.lock().expect("employee store mutex poisoned");

        if let Some(ref email) = email {
            if state
                .employees
                .values()
                .any(|e| e.email.as_deref() == Some(email.as_str()))
            {
                return Err(ApiError::Conflict("email is already registered".into()));
            }
        }

        let id = state.next_id;
        state.next_id += 1;
        let employee = Employee {
            id,
            first_name,
            last_name,
            position,
            salary,
            email,
        };
        state.employees.insert(id, employee.clone());
        Ok(employee)
    }

    /// Apply a partial update; fails with `NotFound` for an unknown id and
    /// `Conflict` when the new email belongs to another record.
    pub fn update(&self, id: u64, update: EmployeeUpdate) -> ApiResult<Employee> {
        let mut state = self.inner.lock().expect("employee store mutex poisoned");

        if !state.employees.contains_key(&id) {
            return Err(ApiError::NotFound("employee not found".into()));
        }

        if let Some(ref email) = update.email {
            let email = normalize_email(email);
            if state
                .employees
                .values()
                .any(|e| e.id != id && e.email.as_deref() == Some(email.as_str()))
            {
                return Err(ApiError::Conflict("email is already registered".into()));
            }
        }

        let employee = state
            .employees
            .get_mut(&id)
            .expect("presence checked above");
        if let Some(v) = update.first_name {
            employee.first_name = v;
        }
        if let Some(v) = update.last_name {
            employee.last_name = v;
        }
        if let Some(v) = update.position {
            employee.position = Some(v);
        }
        if let Some(v) = update.salary {
            employee.salary = Some(v);
        }
        if let Some(v) = update.email {
            employee.email = Some(normalize_email(&v));
        }
        Ok(employee.clone())
    }

    pub fn remove(&self, id: u64) -> ApiResult<()> {
        let mut state = self.inner.lock().expect("employee store mutex poisoned");
        state
            .employees
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound("employee not found".into()))
    }
}

impl Default for EmployeeStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crud_cycle() {
        let store = EmployeeStore::new();
        let created = store
            .create(
                "Ana".into(),
                "García".into(),
                Some("Engineer".into()),
                Some(52_000.0),
                Some("ana@example.com".into()),
            )
            .unwrap();

        assert_eq!(store.list().len(), 1);
        assert_eq!(store.find(created.id).unwrap().first_name, "Ana");

        let updated = store
            .update(
                created.id,
                EmployeeUpdate {
                    position: Some("Senior Engineer".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.position.as_deref(), Some("Senior Engineer"));
        assert_eq!(updated.first_name, "Ana");

        store.remove(created.id).unwrap();
        assert!(store.find(created.id).is_none());
        assert!(matches!(
            store.remove(created.id),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn email_uniqueness_across_create_and_update() {
        let store = EmployeeStore::new();
        store
            .create("Ana".into(), "García".into(), None, None, Some("a@x.com".into()))
            .unwrap();
        let second = store
            .create("Luis".into(), "Pérez".into(), None, None, Some("b@x.com".into()))
            .unwrap();

        assert!(matches!(
            store.create("Eva".into(), "Ruiz".into(), None, None, Some("a@x.com".into())),
            Err(ApiError::Conflict(_))
        ));
        assert!(matches!(
            store.update(
                second.id,
                EmployeeUpdate {
                    email: Some("A@x.com ".into()),
                    ..Default::default()
                }
            ),
            Err(ApiError::Conflict(_))
        ));
    }
}
