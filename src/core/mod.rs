// mod.rs - Core logic module

pub mod distance;
pub mod mismatch;

// Re-export main types for convenience
pub use distance::{DistanceEngine, DistanceMatrix};
pub use mismatch::{AmbiguityModel, MismatchTable, IGNORE_CHAR};
