// lib.rs - snp-dists library root

//! # snp-dists - Pairwise SNP distance matrix from a FASTA alignment
//!
//! Counts, for every pair of aligned sequences, the positions where the two
//! differ. Which residue pairs count is decided by a [`MismatchTable`]; positions
//! holding the ignore sentinel (`.`) never count.
//!
//! ## Features
//!
//! - **Ambiguity models**: ACGT-only reference table or full IUPAC semantics
//! - **Transparent input**: plain or gzip-compressed FASTA
//! - **Parallel**: rows of the matrix are computed with rayon
//! - **Multiple formats**: TSV, CSV, molten, PHYLIP and JSON output
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use snp_dists::prelude::*;
//! use std::sync::Arc;
//!
//! let alignment = load_alignment(std::path::Path::new("core.aln.gz"), &LoadOptions::default())
//!     .map_err(|e| e.to_string())?;
//!
//! let engine = DistanceEngine::new(Arc::new(MismatchTable::new(AmbiguityModel::Reference)));
//! let matrix = engine.compute(&alignment);
//!
//! write_matrix(std::io::stdout(), &alignment.names(), &matrix, &OutputOptions::default())?;
//! # Ok::<(), String>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod output;
pub mod report;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{AmbiguityModel, DistanceEngine, DistanceMatrix, MismatchTable};
    pub use crate::data::{load_alignment, Alignment, LoadError, LoadOptions, SequenceRecord};
    pub use crate::output::{open_output, write_matrix, OutputFormat, OutputOptions};
    pub use crate::report::Reporter;
}

// Re-export main types at the root level for convenience
pub use crate::cli::{Args, ValidationResult};
pub use crate::core::{AmbiguityModel, DistanceEngine, DistanceMatrix, MismatchTable};
pub use crate::data::{Alignment, LoadError, LoadOptions, SequenceRecord};

/// Executable name, used in the version line and the matrix corner cell
pub const EXENAME: &str = "snp-dists";

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!("{} {}", EXENAME, VERSION)
}
