//! Role names used by the route table and the seeded user store.

/// May manage employee and solicitud records (update, delete).
pub const ADMINISTRATOR: &str = "administrator";

/// Default role granted at registration.
pub const EMPLOYEE: &str = "employee";
