pub mod errors;
pub mod handler;
pub mod types;

// Public API exports
pub use errors::ScopeError;
pub use handler::{ELEVATION_ROLE, release, resolve_own, resolve_project};
pub use types::ProjectScope;
