//! Resource type handlers.
//!
//! One handler per category of cloud object. Each declares a priority
//! placing it after everything that can reference it, so the orchestrator
//! can delete in a fixed, dependency-safe total order:
//!
//! | priority | type |
//! |---|---|
//! | 5 | servers |
//! | 9 | floating IPs |
//! | 10 | volume snapshots |
//! | 15 | volumes, router interfaces |
//! | 16 | routers |
//! | 17 | ports |
//! | 18 | networks, security groups |
//! | 30 | images |
//! | 100 | objects |
//! | 101 | containers |

pub mod compute;
pub mod images;
pub mod network;
pub mod registry;
pub mod shared;
pub mod storage;
pub mod traits;
pub mod volumes;

// Public API exports
pub use registry::discover;
pub use traits::ResourceType;
