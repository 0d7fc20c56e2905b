//! Network foundation.
//!
//! # Responsibilities
//! - Bind the configured address
//! - Accept TCP connections under a concurrency limit

pub mod listener;

pub use listener::{ConnectionPermit, Listener, ListenerError};
