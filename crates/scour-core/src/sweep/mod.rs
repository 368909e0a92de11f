pub mod errors;
pub mod handler;
pub mod types;

// Public API exports
pub use errors::SweepError;
pub use handler::run_sweep;
pub use types::{PurgeReport, TypeReport};
