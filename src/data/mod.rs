// mod.rs - Data structures module

pub mod alignment;
pub mod loader;

// Re-export main types for convenience
pub use alignment::{Alignment, SequenceRecord};
pub use loader::{load_alignment, read_alignment, LoadError, LoadOptions, DEFAULT_MAX_SEQUENCES};
