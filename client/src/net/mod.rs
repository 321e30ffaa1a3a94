//! Networking modules for the booking backend's REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls and `types` defines the JSON envelopes they
//! exchange.

pub mod api;
pub mod types;
