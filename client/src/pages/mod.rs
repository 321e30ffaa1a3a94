//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components` and every session decision to `session`.

pub mod dashboard;
pub mod home;
pub mod login;
