//! Session operations bound to the running browser window.

use super::credentials::{CredentialStore, Session};
use super::guard::{self, GuardOutcome};
use super::login::{self, LoginError};
use super::logout::{BrowserClock, LogoutConfig, LogoutOrchestrator, LogoutOutcome, emergency_exit};
use super::redirect::{BrowserNavigator, Navigator, RedirectRouter};
use super::role::PageIdentity;
use super::storage::{BrowserStorage, KeyValueStore, StorageArea, StorageAreas};
use crate::net::api::HttpLogoutApi;

/// Both storage areas, or the ones that opened when the other was refused.
fn open_storage() -> Result<StorageAreas<BrowserStorage>, Vec<(StorageArea, BrowserStorage)>> {
    StorageAreas::open_with(BrowserStorage::open)
}

/// Credential store over this window's storage areas, if both are reachable.
pub fn credential_store() -> Option<CredentialStore<BrowserStorage>> {
    open_storage().map(CredentialStore::new).ok()
}

/// The stored session, if any.
pub fn current_session() -> Option<Session> {
    credential_store().and_then(|store| store.get())
}

/// Run the role guard for the current page. `true` means render.
pub fn guard_current_page() -> bool {
    let navigator = BrowserNavigator;
    let opened = match open_storage() {
        Ok(areas) => {
            let GuardOutcome { decision, .. } = guard::enforce(&CredentialStore::new(areas), &navigator);
            return decision.is_allowed();
        }
        Err(opened) => opened,
    };
    // Half a session cannot be trusted: wipe what is reachable, then log in again.
    for (area, store) in &opened {
        if let Err(e) = store.clear() {
            log::error!("clearing {area} failed: {e}");
        }
    }
    let page = PageIdentity::classify(&navigator.location().pathname);
    if let Err(e) = RedirectRouter::new(&navigator).to_login(page.login_role()) {
        log::error!("login redirect failed: {e}");
    }
    false
}

/// Store a fresh session and leave the login page.
///
/// # Errors
///
/// Returns a [`LoginError`] if storing or navigating fails.
pub fn complete_login(session: &Session) -> Result<String, LoginError> {
    let store = StorageAreas::browser()
        .map(CredentialStore::new)
        .map_err(|e| LoginError::Credentials(e.into()))?;
    login::complete_login(&store, &BrowserNavigator, session)
}

/// Send an already-authenticated visitor away from the login page.
pub fn redirect_if_authenticated() -> Option<String> {
    credential_store().and_then(|store| login::redirect_if_authenticated(&store, &BrowserNavigator))
}

/// Full logout. Returns `None` when a storage area could not be opened; the
/// areas that did open are still cleared and the browser is still sent home.
pub async fn logout() -> Option<LogoutOutcome> {
    let navigator = BrowserNavigator;
    match open_storage() {
        Ok(areas) => {
            let store = CredentialStore::new(areas);
            let api = HttpLogoutApi::new(LogoutConfig::default());
            Some(LogoutOrchestrator::new(&store, &api, &navigator, BrowserClock).logout().await)
        }
        Err(opened) => {
            let (destination, navigated) =
                emergency_exit(opened.iter().map(|(area, store)| (*area, store)), &navigator, &BrowserClock);
            log::warn!("logout without full storage access went to {destination} (navigated: {navigated})");
            None
        }
    }
}
