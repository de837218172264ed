//! Infrastructure implementations for Conseil.
//!
//! Concrete collaborators for the ports defined in `conseil-core`:
//! - `http`: reply service and summary sink over HTTP (reqwest)
//! - `outbox`: summary sink writing plain-text summaries to disk
//! - `sinks`: picks the summary sink for a configuration
//! - `config`: configuration file discovery, parsing and overrides

pub mod config;
pub mod http;
pub mod outbox;
pub mod sinks;
