//! Reply generation: the `ReplyService` port and the `ReplyClient` that
//! turns service failures into fallback text.

pub mod client;
pub mod service;
