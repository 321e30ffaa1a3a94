//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Reactive state lives in small models provided through Leptos context; the
//! session logic itself stays in `crate::session` and is framework-free.

pub mod auth;
