//! Role guard for protected pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! `enforce` runs before a protected page renders anything. It reads the
//! stored session, classifies the current path and either lets the page
//! render or sends the browser elsewhere. A denial is a decision, not an
//! error: nothing here propagates failures to the caller.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::credentials::{CredentialStore, Session};
use super::redirect::{Navigator, RedirectRouter};
use super::role::PageIdentity;
use super::storage::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No session, or the stored pair is partial or unreadable.
    NotAuthenticated,
    /// Valid session whose role may not view this page.
    WrongRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Apply the authorization matrix to a (possibly missing) session.
#[must_use]
pub fn authorize(session: Option<&Session>, page: PageIdentity) -> Decision {
    let Some(session) = session else {
        return Decision::Deny(DenyReason::NotAuthenticated);
    };
    let permitted = match session.role() {
        Some(role) => page.permits(role),
        None => page.permits_unrecognized(),
    };
    if permitted { Decision::Allow } else { Decision::Deny(DenyReason::WrongRole) }
}

/// What `enforce` decided and where it sent the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    pub page: PageIdentity,
    pub decision: Decision,
    pub redirected_to: Option<String>,
}

/// Check the current page against the stored session and redirect on denial.
///
/// - `NotAuthenticated`: wipe the store, then go to login with this URL as
///   the return target.
/// - `WrongRole`: go to the dashboard of the session's own role. A role
///   that does not parse is treated like a stale session: wipe, then login.
pub fn enforce<S, N>(store: &CredentialStore<S>, navigator: &N) -> GuardOutcome
where
    S: KeyValueStore,
    N: Navigator,
{
    let router = RedirectRouter::new(navigator);
    let location = router.location();
    let page = PageIdentity::classify(&location.pathname);
    let session = store.get();
    let decision = authorize(session.as_ref(), page);

    let redirect = match (decision, session) {
        (Decision::Allow, _) => return GuardOutcome { page, decision, redirected_to: None },
        (Decision::Deny(DenyReason::WrongRole), Some(session)) if session.role().is_some() => {
            log::info!("role '{}' may not view {}, redirecting to its dashboard", session.user.role, location.pathname);
            router.to_dashboard(&session.user.role)
        }
        (Decision::Deny(reason), _) => {
            log::info!("{reason:?} on {}, redirecting to login", location.pathname);
            if let Err(e) = store.clear() {
                log::warn!("could not clear stale session before login redirect: {e}");
            }
            router.to_login(page.login_role())
        }
    };

    let redirected_to = redirect.inspect_err(|e| log::error!("guard redirect failed: {e}")).ok();
    GuardOutcome { page, decision, redirected_to }
}
