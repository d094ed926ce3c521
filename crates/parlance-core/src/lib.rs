//! Relay orchestration for Parlance.
//!
//! This crate defines the "port" ([`relay::AssistantBackend`]) that the
//! infrastructure layer implements, and the protocol logic written
//! against it: replaying a conversation into a fresh remote thread,
//! polling the resulting run to a terminal state under a deadline, and
//! extracting the newest assistant reply. It depends only on
//! `parlance-types` -- never on `parlance-infra` or any HTTP crate.

pub mod relay;
