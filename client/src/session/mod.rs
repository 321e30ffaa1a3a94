//! Client-side session state and guarded navigation.
//!
//! SYSTEM CONTEXT
//! ==============
//! The booking backend issues a bearer token at login; this client mirrors it
//! into Web Storage and decides, page by page, whether the visitor may stay.
//!
//! - `storage`: key-value seam over `sessionStorage` / `localStorage`
//! - `credentials`: the `authToken` + `userData` pair
//! - `role`: roles, page identities, authorization matrix
//! - `guard`: allow/deny a page and redirect on denial
//! - `redirect`: login, dashboard and home URLs, return-URL handling
//! - `login`: storing a fresh session and leaving the login page
//! - `logout`: server invalidation, local wipe, emergency fallback
//! - `profile_menu`: display model for the profile menu
//! - `browser`: the same operations bound to the real window (hydrate only)

#[cfg(feature = "hydrate")]
pub mod browser;
pub mod credentials;
pub mod guard;
pub mod login;
pub mod logout;
pub mod profile_menu;
pub mod redirect;
pub mod role;
pub mod storage;

#[cfg(test)]
mod testing;

pub use credentials::{CredentialStore, Session, SessionState, UserData};
pub use guard::{Decision, DenyReason};
pub use role::{PageIdentity, Role};
