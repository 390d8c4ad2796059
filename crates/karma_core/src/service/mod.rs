//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate source fetches and pure derivations into use-case APIs.
//! - Keep UI/FFI layers decoupled from snapshot transport.

pub mod chart_service;
