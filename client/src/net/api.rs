//! REST calls to the booking backend's auth endpoints.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning errors since these endpoints are only
//! meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Login failures come back as display strings for the form. Logout failures
//! are typed (`LogoutCallError`) because the orchestrator logs and discards
//! them; they never reach the visitor.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::session::credentials::Session;
use crate::session::role::Role;
#[cfg(feature = "hydrate")]
use crate::session::logout::{LogoutApi, LogoutCallError, LogoutConfig};

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn login_failed_message(status: u16) -> String {
    format!("login failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Authenticate via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns a display string if the request fails, the server answers with a
/// non-OK status, or the envelope reports failure.
pub async fn login(email: &str, password: &str, role: Role) -> Result<Session, String> {
    #[cfg(feature = "hydrate")]
    {
        use super::types::{ApiEnvelope, LoginData, LoginRequest};

        let payload = LoginRequest { email: email.to_owned(), password: password.to_owned(), role: role.as_str().to_owned() };
        let resp = gloo_net::http::Request::post(LOGIN_ENDPOINT)
            .json(&payload)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let status = resp.status();
        let envelope = resp.json::<ApiEnvelope<LoginData>>().await;
        match envelope {
            Ok(envelope) => envelope.into_data(&login_failed_message(status)).map(Session::from),
            Err(_) if !is_success(status) => Err(login_failed_message(status)),
            Err(e) => Err(e.to_string()),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (email, password, role);
        Err("not available on server".to_owned())
    }
}

/// `POST /api/auth/logout` with a bearer token, bounded by a timeout.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Default)]
pub struct HttpLogoutApi {
    config: LogoutConfig,
}

#[cfg(feature = "hydrate")]
impl HttpLogoutApi {
    #[must_use]
    pub fn new(config: LogoutConfig) -> Self {
        Self { config }
    }
}

#[cfg(feature = "hydrate")]
#[async_trait::async_trait(?Send)]
impl LogoutApi for HttpLogoutApi {
    async fn invalidate(&self, token: &str) -> Result<(), LogoutCallError> {
        use futures::future::{Either, select};
        use gloo_timers::future::TimeoutFuture;

        let request = gloo_net::http::Request::post(&self.config.endpoint)
            .header("Authorization", &bearer(token))
            .send();
        let timeout = TimeoutFuture::new(self.config.timeout_ms);

        match select(Box::pin(request), Box::pin(timeout)).await {
            Either::Left((Ok(resp), _)) if is_success(resp.status()) => Ok(()),
            Either::Left((Ok(resp), _)) => Err(LogoutCallError::Status(resp.status())),
            Either::Left((Err(e), _)) => Err(LogoutCallError::Network(e.to_string())),
            Either::Right(((), _)) => Err(LogoutCallError::Timeout(self.config.timeout_ms)),
        }
    }
}
