//! Services
//!
//! Business logic that sits between the HTTP handlers / CLI commands and the
//! repositories.

pub mod auth;
pub mod email;
pub mod password;

pub use auth::{AuthError, AuthService};
pub use email::EmailService;
