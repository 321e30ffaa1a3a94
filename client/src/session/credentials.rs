//! Credential store: the `authToken` + `userData` pair in browser storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login writes the pair, every protected page reads it, logout wipes it.
//! The pair is only meaningful together: a token without user data (or the
//! reverse) is reported as `SessionState::Incomplete` and treated as no
//! session at all.
//!
//! INVARIANT
//! =========
//! No session-sensitive key survives `clear()`. A key is session-sensitive
//! when it is one of the canonical keys or its name contains one of the
//! markers in `SESSION_SENSITIVE`. The wide match catches stray keys other
//! pages may have written.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use serde::{Deserialize, Serialize};

use super::role::Role;
use super::storage::{KeyValueStore, StorageArea, StorageAreas, StorageError};

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const USER_DATA_KEY: &str = "userData";

/// Which storage keys count as session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensitiveKeys {
    pub canonical: &'static [&'static str],
    /// Case-sensitive substrings.
    pub markers: &'static [&'static str],
}

pub const SESSION_SENSITIVE: SensitiveKeys = SensitiveKeys {
    canonical: &[AUTH_TOKEN_KEY, USER_DATA_KEY],
    markers: &["auth", "user", "token"],
};

impl SensitiveKeys {
    #[must_use]
    pub fn is_sensitive(&self, key: &str) -> bool {
        self.canonical.contains(&key) || self.markers.iter().any(|marker| key.contains(marker))
    }
}

// =============================================================================
// SESSION TYPES
// =============================================================================

/// Profile stored under `userData`, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, rename = "companyName", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, rename = "companyType", skip_serializing_if = "Option::is_none")]
    pub company_type: Option<String>,
    /// Fields the backend sends that this client does not interpret (`id`,
    /// `phone`, ...). Kept so a read-then-write does not drop them.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserData {
    /// Minimal profile with only a role.
    #[must_use]
    pub fn with_role(role: &str) -> Self {
        Self {
            role: role.to_owned(),
            first_name: None,
            last_name: None,
            email: None,
            company_name: None,
            company_type: None,
            extra: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

/// An authenticated browser context.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserData,
}

impl Session {
    #[must_use]
    pub fn new(token: impl Into<String>, user: UserData) -> Self {
        Self { token: token.into(), user }
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.role()
    }
}

/// Result of reading the stored pair, with the reason when it is unusable.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Absent,
    Incomplete { area: StorageArea, missing: &'static str },
    Malformed { area: StorageArea, reason: String },
    Valid(Session),
}

impl SessionState {
    #[must_use]
    pub fn into_session(self) -> Option<Session> {
        match self {
            Self::Valid(session) => Some(session),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("could not encode userData: {0}")]
    Encode(#[from] serde_json::Error),
}

// =============================================================================
// CREDENTIAL STORE
// =============================================================================

/// Reads and writes the session pair across both storage areas.
#[derive(Debug, Clone)]
pub struct CredentialStore<S> {
    areas: StorageAreas<S>,
}

impl<S: KeyValueStore> CredentialStore<S> {
    #[must_use]
    pub fn new(areas: StorageAreas<S>) -> Self {
        Self { areas }
    }

    #[must_use]
    pub fn areas(&self) -> &StorageAreas<S> {
        &self.areas
    }

    /// Read the stored session, reporting why it is unusable.
    ///
    /// The session area wins; the local area is only consulted when the
    /// session area holds neither key. Storage failures read as absence.
    pub fn load(&self) -> SessionState {
        let state = match read_pair(&self.areas.session, StorageArea::Session) {
            Ok(SessionState::Absent) => self.load_local(),
            Ok(state) => state,
            Err(e) => {
                log::warn!("session read failed, falling back to localStorage: {e}");
                self.load_local()
            }
        };

        match &state {
            SessionState::Incomplete { area, missing } => {
                log::warn!("incomplete session in {area}: {missing} missing");
            }
            SessionState::Malformed { area, reason } => {
                log::warn!("unreadable {USER_DATA_KEY} in {area}: {reason}");
            }
            SessionState::Absent | SessionState::Valid(_) => {}
        }
        state
    }

    fn load_local(&self) -> SessionState {
        read_pair(&self.areas.local, StorageArea::Local).unwrap_or_else(|e| {
            log::warn!("localStorage read failed: {e}");
            SessionState::Absent
        })
    }

    /// The stored session, or `None` when absent, partial or unreadable.
    pub fn get(&self) -> Option<Session> {
        self.load().into_session()
    }

    /// The raw bearer token, even when `userData` is missing or corrupt.
    pub fn token(&self) -> Option<String> {
        self.areas.iter().find_map(|(area, store)| match store.get(AUTH_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("token read failed in {area}: {e}");
                None
            }
        })
    }

    /// Write both keys into the session area.
    ///
    /// # Errors
    ///
    /// Returns a [`CredentialError`] if `userData` cannot be encoded or the
    /// storage backend rejects a write. A failed second write leaves the
    /// first in place; the next `load()` reports it as incomplete.
    pub fn set(&self, session: &Session) -> Result<(), CredentialError> {
        let raw_user = serde_json::to_string(&session.user)?;
        self.areas.session.set(AUTH_TOKEN_KEY, &session.token)?;
        self.areas.session.set(USER_DATA_KEY, &raw_user)?;
        Ok(())
    }

    /// Remove every session-sensitive key from both areas.
    ///
    /// Keeps going after a failure so one bad key does not shield the rest;
    /// the first error is returned once both areas have been swept.
    ///
    /// # Errors
    ///
    /// Returns the first [`StorageError`] encountered.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut first_err = None;
        for (area, store) in self.areas.iter() {
            if let Err(e) = clear_area(store, &SESSION_SENSITIVE) {
                log::warn!("clearing {area} incomplete: {e}");
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

fn read_pair<S: KeyValueStore>(store: &S, area: StorageArea) -> Result<SessionState, StorageError> {
    let token = store.get(AUTH_TOKEN_KEY)?.filter(|t| !t.is_empty());
    let raw_user = store.get(USER_DATA_KEY)?.filter(|u| !u.is_empty());

    Ok(match (token, raw_user) {
        (None, None) => SessionState::Absent,
        (Some(_), None) => SessionState::Incomplete { area, missing: USER_DATA_KEY },
        (None, Some(_)) => SessionState::Incomplete { area, missing: AUTH_TOKEN_KEY },
        (Some(token), Some(raw)) => match serde_json::from_str::<UserData>(&raw) {
            Ok(user) => SessionState::Valid(Session { token, user }),
            Err(e) => SessionState::Malformed { area, reason: e.to_string() },
        },
    })
}

fn clear_area<S: KeyValueStore>(store: &S, policy: &SensitiveKeys) -> Result<(), StorageError> {
    let mut first_err = None;
    for key in policy.canonical {
        if let Err(e) = store.remove(key) {
            first_err.get_or_insert(e);
        }
    }

    match store.keys() {
        Ok(keys) => {
            for key in keys.iter().filter(|k| policy.is_sensitive(k)) {
                if let Err(e) = store.remove(key) {
                    first_err.get_or_insert(e);
                }
            }
        }
        Err(e) => {
            first_err.get_or_insert(e);
        }
    }

    first_err.map_or(Ok(()), Err)
}
