//! Assistants v2 HTTP backend.
//!
//! [`AssistantsClient`] implements `parlance_core::relay::AssistantBackend`
//! against the thread/run/message lifecycle endpoints. The wire types in
//! [`types`] are backend-specific records -- NOT the domain types from
//! parlance-types; those are backend-agnostic.

pub mod client;
pub mod types;

pub use client::AssistantsClient;
