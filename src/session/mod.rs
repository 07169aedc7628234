//! Session management and authentication.

mod auth;
mod core;

pub use self::core::{AuthStatus, BACKEND_HOST_ENV, Config, Session};
