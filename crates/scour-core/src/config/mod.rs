pub mod defaults;
pub mod loading;
pub mod types;

// Public API exports
pub use loading::{load, validate_credentials};
pub use types::{AuthConfig, PollConfig, ScourConfig};
