//! Solicitud (request) records.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

/// Lifecycle state of a solicitud.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolicitudStatus {
    Pending,
    Cancelled,
    Completed,
}

impl SolicitudStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// A solicitud raised for an employee.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solicitud {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub status: SolicitudStatus,
    pub employee_id: u64,
}

/// Field-wise update; `None` leaves the field untouched.
#[derive(Debug, Default)]
pub struct SolicitudUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<SolicitudStatus>,
}

struct SolicitudState {
    next_id: u64,
    solicitudes: HashMap<u64, Solicitud>,
}

/// In-memory solicitud store.
pub struct SolicitudStore {
    inner: Mutex<SolicitudState>,
}

impl SolicitudStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(SolicitudState {
                next_id: 1,
                solicitudes: HashMap::new(),
            }),
        }
    }

    pub fn list(&self) -> Vec<Solicitud> {
        let state = self.inner.lock().expect("solicitud store mutex poisoned");
        let mut all: Vec<Solicitud> = state.solicitudes.values().cloned().collect();
        all.sort_by_key(|s| s.id);
        all
    }

    pub fn find(&self, id: u64) -> Option<Solicitud> {
        let state = self.inner.lock().expect("solicitud store mutex poisoned");
        state.solicitudes.get(&id).cloned()
    }

    pub fn create(
        &self,
        title: String,
        description: Option<String>,
        employee_id: u64,
    ) -> Solicitud {
        let mut state = self.inner.lock().expect("solicitud store mutex poisoned");
        let id = state.next_id;
        state.next_id += 1;
        let solicitud = Solicitud {
            id,
            title,
            description,
            status: SolicitudStatus::Pending,
            employee_id,
        };
        state.solicitudes.insert(id, solicitud.clone());
        solicitud
    }

    pub fn update(&self, id: u64, update: SolicitudUpdate) -> ApiResult<Solicitud> {
        let mut state = self.inner.lock().expect("solicitud store mutex poisoned");
        let solicitud = state
            .solicitudes
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound("solicitud not found".into()))?;

        if let Some(v) = update.title {
            solicitud.title = v;
        }
        if let Some(v) = update.description {
            solicitud.description = Some(v);
        }
        if let Some(v) = update.status {
            solicitud.status = v;
        }
        Ok(solicitud.clone())
    }

    pub fn remove(&self, id: u64) -> ApiResult<()> {
        let mut state = self.inner.lock().expect("solicitud store mutex poisoned");
        state
            .solicitudes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound("solicitud not found".into()))
    }
}

impl Default for SolicitudStore {
    fn default() -> Self {
        Self::new()
    }
}
