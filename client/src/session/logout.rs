//! Logout orchestration: best-effort server call, guaranteed local wipe.
//!
//! SYSTEM CONTEXT
//! ==============
//! Logout runs in two phases.
//!
//! 1. Server invalidation. Skipped without a token. Any failure (status,
//!    network, timeout) is logged and otherwise ignored.
//! 2. Local cleanup and navigation. Always runs once phase 1 has resolved:
//!    sensitive keys and the auxiliary keys are removed, then the current
//!    history entry is replaced with the landing page so "back" cannot
//!    return to an authenticated view.
//!
//! ERROR HANDLING
//! ==============
//! A storage or navigation failure in phase 2 switches to the emergency
//! path: both storage areas are cleared wholesale and the browser is sent
//! home with `emergency=true`. The emergency path only logs; `logout` itself
//! cannot fail.

#[cfg(test)]
#[path = "logout_test.rs"]
mod logout_test;

use async_trait::async_trait;

use super::credentials::{CredentialStore, SESSION_SENSITIVE};
use super::redirect::{NavigationError, Navigator, home_url};
use super::storage::{KeyValueStore, StorageArea, StorageAreas, StorageError};

pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";
pub const DEFAULT_LOGOUT_TIMEOUT_MS: u32 = 4_000;

/// Keys written by other pages that must not outlive the session.
pub const AUXILIARY_KEYS: [&str; 4] = ["redirectAfterLogin", "lastLoginType", "userPreferences", "dashboardData"];

/// Settings for the server-side logout call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutConfig {
    pub endpoint: String,
    pub timeout_ms: u32,
}

impl Default for LogoutConfig {
    fn default() -> Self {
        Self { endpoint: LOGOUT_ENDPOINT.to_owned(), timeout_ms: DEFAULT_LOGOUT_TIMEOUT_MS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogoutCallError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server answered {0}")]
    Status(u16),
    #[error("no answer within {0} ms")]
    Timeout(u32),
}

/// Server-side session invalidation.
#[async_trait(?Send)]
pub trait LogoutApi {
    /// Invalidate `token` on the server.
    ///
    /// # Errors
    ///
    /// Returns a [`LogoutCallError`] for non-2xx answers, transport failures
    /// and timeouts.
    async fn invalidate(&self, token: &str) -> Result<(), LogoutCallError>;
}

/// Milliseconds since the epoch, for cache-busting query values.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

#[cfg(feature = "hydrate")]
impl Clock for BrowserClock {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

/// Phase-2 failure that triggers the emergency path.
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

// =============================================================================
// OUTCOME
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerInvalidation {
    /// No token was stored.
    Skipped,
    Confirmed,
    Failed(LogoutCallError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutPath {
    Graceful,
    Emergency,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    pub server: ServerInvalidation,
    pub path: LogoutPath,
    pub destination: String,
    /// False only when even the emergency navigation was refused.
    pub navigated: bool,
}

// =============================================================================
// ORCHESTRATOR
// =============================================================================

pub struct LogoutOrchestrator<'a, S, A, N, C> {
    store: &'a CredentialStore<S>,
    api: &'a A,
    navigator: &'a N,
    clock: C,
}

impl<'a, S, A, N, C> LogoutOrchestrator<'a, S, A, N, C>
where
    S: KeyValueStore,
    A: LogoutApi,
    N: Navigator,
    C: Clock,
{
    pub fn new(store: &'a CredentialStore<S>, api: &'a A, navigator: &'a N, clock: C) -> Self {
        Self { store, api, navigator, clock }
    }

    /// Log the visitor out. Always ends with storage wiped and the browser
    /// sent home (unless the browser refuses every navigation).
    pub async fn logout(&self) -> LogoutOutcome {
        let server = self.invalidate_server().await;

        match self.cleanup_and_leave() {
            Ok(destination) => {
                log::info!("logged out, leaving for {destination}");
                LogoutOutcome { server, path: LogoutPath::Graceful, destination, navigated: true }
            }
            Err(e) => {
                log::error!("logout cleanup failed, taking emergency path: {e}");
                let (destination, navigated) = self.emergency();
                LogoutOutcome { server, path: LogoutPath::Emergency, destination, navigated }
            }
        }
    }

    async fn invalidate_server(&self) -> ServerInvalidation {
        let Some(token) = self.store.token() else {
            log::debug!("no token stored, skipping server logout");
            return ServerInvalidation::Skipped;
        };
        match self.api.invalidate(&token).await {
            Ok(()) => ServerInvalidation::Confirmed,
            Err(e) => {
                log::warn!("server logout failed, clearing locally anyway: {e}");
                ServerInvalidation::Failed(e)
            }
        }
    }

    fn cleanup_and_leave(&self) -> Result<String, LogoutError> {
        self.cleanup()?;
        let url = format!("{}?logout={}", home_url(&self.navigator.location()), self.clock.now_millis());
        self.navigator.replace(&url)?;
        Ok(url)
    }

    fn cleanup(&self) -> Result<(), StorageError> {
        let mut first_err = self.store.clear().err();
        for (area, store) in self.store.areas().iter() {
            for key in AUXILIARY_KEYS {
                if let Err(e) = store.remove(key) {
                    log::warn!("could not remove {key} from {area}: {e}");
                    first_err.get_or_insert(e);
                }
            }
        }
        first_err.map_or(Ok(()), Err)
    }

    fn emergency(&self) -> (String, bool) {
        emergency_exit(self.store.areas().iter(), self.navigator, &self.clock)
    }
}

/// Clear every given area wholesale, then send the browser home with
/// `emergency=true`. Never fails: clear and navigation errors are logged.
/// Returns the destination and whether any navigation was accepted.
///
/// Also used directly when storage could only be partly opened.
pub fn emergency_exit<'s, S, N, C>(
    areas: impl IntoIterator<Item = (StorageArea, &'s S)>,
    navigator: &N,
    clock: &C,
) -> (String, bool)
where
    S: KeyValueStore + 's,
    N: Navigator,
    C: Clock,
{
    for (area, store) in areas {
        if let Err(e) = store.clear() {
            log::error!("emergency clear of {area} failed: {e}");
        }
    }

    let url = format!("{}?emergency=true&t={}", home_url(&navigator.location()), clock.now_millis());
    if let Err(e) = navigator.replace(&url) {
        log::error!("emergency replace failed, trying assign: {e}");
        if let Err(e) = navigator.assign(&url) {
            log::error!("emergency navigation failed: {e}");
            return (url, false);
        }
    }
    (url, true)
}

/// Warning worth logging for a finished logout, if any. `None` input means
/// storage was only partly reachable.
#[must_use]
pub fn logout_warning(outcome: Option<&LogoutOutcome>) -> Option<String> {
    match outcome {
        None => Some("logout ran without full storage access".to_owned()),
        Some(outcome) if !outcome.navigated => {
            Some(format!("logout finished but the browser refused to leave ({})", outcome.destination))
        }
        Some(_) => None,
    }
}

// =============================================================================
// VERIFICATION
// =============================================================================

/// Session-like keys still present after a logout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub leftovers: Vec<(StorageArea, String)>,
    /// Areas whose keys could not be listed.
    pub unreadable: Vec<StorageArea>,
}

impl CleanupReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.leftovers.is_empty() && self.unreadable.is_empty()
    }
}

/// Scan both areas for session-sensitive keys. Reports only; removes nothing.
pub fn verify_cleanup<S: KeyValueStore>(areas: &StorageAreas<S>) -> CleanupReport {
    let mut report = CleanupReport::default();
    for (area, store) in areas.iter() {
        match store.keys() {
            Ok(keys) => report.leftovers.extend(
                keys.into_iter()
                    .filter(|k| SESSION_SENSITIVE.is_sensitive(k))
                    .map(|k| (area, k)),
            ),
            Err(e) => {
                log::warn!("cannot verify {area}: {e}");
                report.unreadable.push(area);
            }
        }
    }
    if !report.leftovers.is_empty() {
        log::warn!("session keys survived logout: {:?}", report.leftovers);
    }
    report
}
