//! Role names carried in admin console tokens.

/// Full access to the admin console.
pub const ROLE_ADMIN: &str = "admin";
