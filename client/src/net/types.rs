//! Wire DTOs for the booking backend's auth endpoints.
//!
//! DESIGN
//! ======
//! The backend wraps every answer in `{success, data, message}`. Only the
//! login payload is interpreted here; `userData` keeps any extra profile
//! fields so they survive the trip into storage.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::session::credentials::{Session, UserData};

/// Standard backend response envelope.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// The payload of a successful answer, or the server's message.
    ///
    /// # Errors
    ///
    /// Returns the backend `message` (or `fallback`) when `success` is false
    /// or `data` is missing.
    pub fn into_data(self, fallback: &str) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.message.filter(|m| !m.trim().is_empty()).unwrap_or_else(|| fallback.to_owned())),
        }
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// `data` of a successful login.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: UserData,
}

impl From<LoginData> for Session {
    fn from(data: LoginData) -> Self {
        Self::new(data.token, data.user)
    }
}
