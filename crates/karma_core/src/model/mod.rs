//! Domain model for logged actions.
//!
//! # Responsibility
//! - Define the canonical action record consumed by score derivation.
//!
//! # Invariants
//! - Every action is identified by a stable server-assigned `ActionId`.
//! - Derived data (series, plot) never mutates model values.

pub mod action;
