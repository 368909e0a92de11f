//! scour-core: Core library for purging every resource an OpenStack project owns
//!
//! This library provides the purge pipeline shared by the CLI: resolve the
//! target project, discover one handler per known resource type, then delete
//! everything in dependency order.
//!
//! # Main Entry Points
//!
//! - [`resources`] - Resource type handlers and the discovery registry
//! - [`sweep`] - The orchestrator that drives the ordered purge
//! - [`scope`] - Target project resolution and privilege elevation
//! - [`cloud`] - The session trait and REST implementation
//! - [`config`] - Configuration management

pub mod cloud;
pub mod config;
pub mod errors;
pub mod events;
pub mod logging;
pub mod poll;
pub mod resources;
pub mod scope;
pub mod sweep;

// Re-export commonly used types at crate root for convenience
pub use cloud::errors::CloudError;
pub use cloud::traits::CloudSession;
pub use cloud::types::Resource;
pub use config::ScourConfig;
pub use poll::{CancelToken, PollError, Poller};
pub use resources::traits::ResourceType;
pub use scope::types::ProjectScope;
pub use sweep::types::{PurgeReport, TypeReport};

// Re-export handler modules as the primary API
pub use scope::handler as scope_ops;
pub use sweep::handler as sweep_ops;

// Re-export logging initialization
pub use logging::init_logging;
