//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared `AuthState` from Leptos context and delegate
//! every session decision to `crate::session`.

pub mod profile_menu;
pub mod protected;
