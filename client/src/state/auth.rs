//! Auth-session state for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as `RwSignal<AuthState>` context. It mirrors what the credential
//! store holds; components call `refresh` after any session mutation, and a
//! `storage` listener refreshes it when another tab logs in or out. The
//! listener is best-effort: browsers only fire it for other tabs.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::session::Session;
use crate::session::profile_menu::{self, DisplayModel};

/// Current session mirror.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    /// False until storage has been read in the browser. SSR never reads it.
    pub loaded: bool,
}

impl AuthState {
    /// Read the session from browser storage. Outside the browser this is
    /// the unloaded default.
    pub fn from_storage() -> Self {
        #[cfg(feature = "hydrate")]
        {
            Self { session: crate::session::browser::current_session(), loaded: true }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::default()
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn display(&self) -> DisplayModel {
        profile_menu::render(self.session.as_ref())
    }
}

/// Re-read storage into `auth`.
pub fn refresh(auth: RwSignal<AuthState>) {
    auth.set(AuthState::from_storage());
}

/// Refresh `auth` whenever another tab touches a session-sensitive key or
/// clears storage.
pub fn install_storage_listener(auth: RwSignal<AuthState>) {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::closure::Closure;

        use crate::session::credentials::SESSION_SENSITIVE;

        let Some(window) = web_sys::window() else {
            return;
        };
        let handler = Closure::<dyn Fn(web_sys::StorageEvent)>::new(move |ev: web_sys::StorageEvent| {
            // A null key means storage.clear().
            if ev.key().is_none_or(|key| SESSION_SENSITIVE.is_sensitive(&key)) {
                refresh(auth);
            }
        });
        if let Err(e) = window.add_event_listener_with_callback("storage", handler.as_ref().unchecked_ref()) {
            log::warn!("storage listener not installed: {e:?}");
        }
        handler.forget();
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = auth;
    }
}
