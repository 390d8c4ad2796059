//! Flutter bridge crate for `karma_core`.

pub mod api;
