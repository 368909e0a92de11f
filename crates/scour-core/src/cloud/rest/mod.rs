//! Keystone-authenticated REST session.
//!
//! This is the one concrete [`crate::cloud::CloudSession`] implementation:
//! password auth against the identity service, endpoint discovery through
//! the service catalog, and plain blocking HTTP per resource class.

mod auth;
mod client;

pub use auth::TokenData;
pub use client::RestSession;
