//! Action source abstractions.
//!
//! # Responsibility
//! - Define the data-fetch contract consumed by the chart service.
//! - Keep transport details (HTTP, auth) outside core.

pub mod action_source;
