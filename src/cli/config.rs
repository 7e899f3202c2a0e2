// config.rs - Configuration file support

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    // Input/Output
    pub alignment: Option<String>,
    pub output: Option<String>,
    pub format: Option<String>,
    pub blank_corner: Option<bool>,

    // Residue handling
    pub all_chars: Option<bool>,
    pub keep_case: Option<bool>,
    pub ambiguity: Option<String>,

    // Limits and performance
    pub max_seqs: Option<usize>,
    pub threads: Option<usize>,

    // Sample filtering
    pub include_samples: Option<String>,
    pub exclude_samples: Option<String>,

    // Flags
    pub quiet: Option<bool>,
    pub dry_run: Option<bool>,
}

impl Config {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        Self::from_toml(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# snp-dists.toml - Configuration file for snp-dists
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Alignment file (FASTA, optionally gzip-compressed)
alignment = "/path/to/alignment.fasta.gz"

# Output file (omit to write to stdout)
# output = "distances.tsv"

# Output format: tsv, csv, molten, molten-csv, phylip, json
format = "tsv"

# Leave the top left header cell empty
blank_corner = false

# =============================================================================
# RESIDUE HANDLING
# =============================================================================

# Count all differences, not just A/C/G/T
all_chars = false

# Keep case instead of uppercasing all letters
keep_case = false

# Ambiguity model: reference, iupac
ambiguity = "reference"

# =============================================================================
# LIMITS AND PERFORMANCE
# =============================================================================

# Maximum number of sequences to load
max_seqs = 100000

# Number of threads (omit for auto-detection)
# threads = 8

# =============================================================================
# SAMPLE FILTERING
# =============================================================================

# Include only samples matching regex pattern
# include_samples = "^SAMN.*"

# Exclude samples matching regex pattern
# exclude_samples = "control.*"

# =============================================================================
# FLAGS
# =============================================================================

# Do not print progress information
quiet = false

# Load and validate the alignment without computing distances
dry_run = false
"#
        .to_string()
    }
}
