//! Networking modules for the analysis backend's HTTP API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `request` describes calls, `transport` performs them, `api` names every
//! endpoint, `error` is the single failure type, and `types` defines the wire
//! schema.

pub mod api;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;
