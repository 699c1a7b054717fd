//! HTTP session layer
//!
//! An [`ApiSession`] plays one actor against the backend: it owns its own
//! cookie jar, so the user and the administrator never share
//! authentication state.

mod session;

use serde::Serialize;

pub use session::{ApiResponse, ApiSession};

/// Username/password pair sent to the login endpoints
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}
