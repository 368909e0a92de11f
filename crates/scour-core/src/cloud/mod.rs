pub mod errors;
pub mod rest;
#[cfg(test)]
pub mod testing;
pub mod traits;
pub mod types;

// Public API exports
pub use errors::CloudError;
pub use rest::RestSession;
pub use traits::CloudSession;
pub use types::Resource;
