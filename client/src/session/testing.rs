//! In-memory fakes shared by the session tests.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use super::credentials::{AUTH_TOKEN_KEY, Session, USER_DATA_KEY, UserData};
use super::logout::{Clock, LogoutApi, LogoutCallError};
use super::redirect::{Location, NavigationError, Navigator};
use super::storage::{KeyValueStore, MemoryStore, StorageAreas, StorageError};

// =============================================================
// Storage
// =============================================================

/// Memory store whose operations can be switched to fail.
#[derive(Debug, Clone, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_get: std::rc::Rc<Cell<bool>>,
    pub fail_remove: std::rc::Rc<Cell<bool>>,
    pub fail_keys: std::rc::Rc<Cell<bool>>,
    pub fail_clear: std::rc::Rc<Cell<bool>>,
}

impl FlakyStore {
    fn check(flag: &Cell<bool>, op: &'static str, key: &str) -> Result<(), StorageError> {
        if flag.get() { Err(StorageError::op(op, key, "SecurityError")) } else { Ok(()) }
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::check(&self.fail_get, "get", key)?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::check(&self.fail_remove, "remove", key)?;
        self.inner.remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Self::check(&self.fail_keys, "keys", "*")?;
        self.inner.keys()
    }

    fn clear(&self) -> Result<(), StorageError> {
        Self::check(&self.fail_clear, "clear", "*")?;
        self.inner.clear()
    }
}

/// Session stored in the session area with the given role.
pub fn areas_with_session(token: &str, user_json: &str) -> StorageAreas<MemoryStore> {
    let areas = StorageAreas::in_memory();
    areas.session.set(AUTH_TOKEN_KEY, token).unwrap();
    areas.session.set(USER_DATA_KEY, user_json).unwrap();
    areas
}

pub fn session_for(role: &str) -> Session {
    Session::new("t1", UserData::with_role(role))
}

// =============================================================
// Navigation
// =============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nav {
    Assign(String),
    Replace(String),
}

/// Navigator that records requests instead of leaving the page.
#[derive(Debug)]
pub struct RecordingNavigator {
    pub location: Location,
    pub visits: RefCell<Vec<Nav>>,
    /// Fail this many navigation calls before succeeding.
    pub failures_left: Cell<u32>,
}

impl RecordingNavigator {
    pub fn at(href: &str) -> Self {
        Self { location: Location::parse(href), visits: RefCell::new(Vec::new()), failures_left: Cell::new(0) }
    }

    pub fn failing(href: &str, failures: u32) -> Self {
        let nav = Self::at(href);
        nav.failures_left.set(failures);
        nav
    }

    pub fn visits(&self) -> Vec<Nav> {
        self.visits.borrow().clone()
    }

    pub fn last(&self) -> Option<Nav> {
        self.visits.borrow().last().cloned()
    }

    fn record(&self, nav: Nav) -> Result<(), NavigationError> {
        let left = self.failures_left.get();
        if left > 0 {
            self.failures_left.set(left - 1);
            return Err(NavigationError("navigation blocked".to_owned()));
        }
        self.visits.borrow_mut().push(nav);
        Ok(())
    }
}

impl Navigator for RecordingNavigator {
    fn location(&self) -> Location {
        self.location.clone()
    }

    fn assign(&self, url: &str) -> Result<(), NavigationError> {
        self.record(Nav::Assign(url.to_owned()))
    }

    fn replace(&self, url: &str) -> Result<(), NavigationError> {
        self.record(Nav::Replace(url.to_owned()))
    }
}

// =============================================================
// Logout API + clock
// =============================================================

/// What the scripted logout endpoint does when called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiScript {
    Succeed,
    Status(u16),
    NetworkError,
    TimeOut,
}

#[derive(Debug)]
pub struct ScriptedLogoutApi {
    pub script: ApiScript,
    pub calls: RefCell<Vec<String>>,
}

impl ScriptedLogoutApi {
    pub fn new(script: ApiScript) -> Self {
        Self { script, calls: RefCell::new(Vec::new()) }
    }
}

#[async_trait(?Send)]
impl LogoutApi for ScriptedLogoutApi {
    async fn invalidate(&self, token: &str) -> Result<(), LogoutCallError> {
        self.calls.borrow_mut().push(token.to_owned());
        match self.script {
            ApiScript::Succeed => Ok(()),
            ApiScript::Status(status) => Err(LogoutCallError::Status(status)),
            ApiScript::NetworkError => Err(LogoutCallError::Network("connection refused".to_owned())),
            ApiScript::TimeOut => Err(LogoutCallError::Timeout(4000)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_millis(&self) -> u64 {
        self.0
    }
}
