//! Shared domain types for Conseil.
//!
//! This crate contains the types used across the consultation chat workspace:
//! transcript turns, contact metadata, session phases, summary and reply
//! payloads, configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod contact;
pub mod error;
pub mod reply;
pub mod session;
pub mod summary;
