//! In-memory data layer.
//!
//! # Responsibilities
//! - Hold user accounts with their role assignments
//! - Hold employee and solicitud records behind CRUD primitives
//! - Implement the `PrincipalLoader` capability for the auth middleware
//!
//! # Design Decisions
//! - Plain `Mutex<HashMap>` state; the request core never sees storage
//!   details, only the loader trait and store methods
//! - Ids are monotonically assigned u64s
//! - Email uniqueness is enforced on the normalized (trimmed, lowercased)
//!   form

pub mod employees;
pub mod solicitudes;
pub mod users;

pub use employees::{Employee, EmployeeStore, EmployeeUpdate};
pub use solicitudes::{Solicitud, SolicitudStatus, SolicitudStore, SolicitudUpdate};
pub use users::{NewUser, UserRecord, UserStore};
