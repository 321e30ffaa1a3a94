//! Login-page side of the session: storing a fresh session and leaving.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use super::credentials::{CredentialError, CredentialStore, Session};
use super::redirect::{NavigationError, Navigator, RedirectRouter};
use super::role::Role;
use super::storage::KeyValueStore;

/// Remembers which login tab the visitor used last.
pub const LAST_LOGIN_TYPE_KEY: &str = "lastLoginType";

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

/// Store `session`, then go to the pending return URL or the role's dashboard.
///
/// # Errors
///
/// Returns a [`LoginError`] if the session cannot be stored or the browser
/// refuses the navigation.
pub fn complete_login<S, N>(store: &CredentialStore<S>, navigator: &N, session: &Session) -> Result<String, LoginError>
where
    S: KeyValueStore,
    N: Navigator,
{
    store.set(session)?;
    if let Some(role) = session.role() {
        if let Err(e) = store.areas().local.set(LAST_LOGIN_TYPE_KEY, role.as_str()) {
            log::warn!("could not remember {LAST_LOGIN_TYPE_KEY}: {e}");
        }
    }
    Ok(RedirectRouter::new(navigator).land_after_login(session)?)
}

/// On the login page, send an already-authenticated visitor onward.
///
/// Returns the URL navigated to, or `None` when there is no valid session.
pub fn redirect_if_authenticated<S, N>(store: &CredentialStore<S>, navigator: &N) -> Option<String>
where
    S: KeyValueStore,
    N: Navigator,
{
    let session = store.get()?;
    RedirectRouter::new(navigator)
        .land_after_login(&session)
        .inspect_err(|e| log::error!("post-login redirect failed: {e}"))
        .ok()
}

/// Role the login form should preselect: the `role` query parameter, then
/// the last role used on this browser, then `user`.
pub fn preselected_role<S, N>(store: &CredentialStore<S>, navigator: &N) -> Role
where
    S: KeyValueStore,
    N: Navigator,
{
    navigator
        .location()
        .query_param(super::redirect::ROLE_PARAM)
        .and_then(|raw| Role::parse(&raw))
        .or_else(|| {
            store
                .areas()
                .local
                .get(LAST_LOGIN_TYPE_KEY)
                .ok()
                .flatten()
                .and_then(|raw| Role::parse(&raw))
        })
        .unwrap_or(Role::User)
}
