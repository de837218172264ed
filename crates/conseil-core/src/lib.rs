//! Business logic and collaborator ports for Conseil.
//!
//! This crate defines the consultation session controller and the "ports"
//! (reply service, summary sink, navigator, conversion tracker) that the
//! infrastructure and presentation layers implement. It depends only on
//! `conseil-types` -- never on `conseil-infra` or any HTTP/IO crate.

pub mod conversion;
pub mod reply;
pub mod session;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;
