//! Shared domain types for Parlance.
//!
//! This crate contains the types used across the Parlance relay client:
//! conversation turns, remote thread/run handles, run statuses, and the
//! error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod relay;
