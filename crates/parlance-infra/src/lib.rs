//! Infrastructure layer for Parlance.
//!
//! Contains the HTTP implementation of the backend trait defined in
//! `parlance-core` (the Assistants v2 client) and the TOML configuration
//! loader.

pub mod assistants;
pub mod config;
