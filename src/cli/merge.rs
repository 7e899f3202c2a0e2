// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};
use crate::data::DEFAULT_MAX_SEQUENCES;

impl Args {
    /// Merge with configuration from file
    /// CLI arguments take precedence over config file values
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.alignment.is_none() {
            self.alignment = config.alignment;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Core settings (only override defaults, not explicit CLI values)
        if self.format == "tsv" {
            if let Some(format) = config.format {
                self.format = format;
            }
        }
        if self.ambiguity == "reference" {
            if let Some(ambiguity) = config.ambiguity {
                self.ambiguity = ambiguity;
            }
        }
        if self.max_seqs == DEFAULT_MAX_SEQUENCES {
            if let Some(max_seqs) = config.max_seqs {
                self.max_seqs = max_seqs;
            }
        }
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        // Sample filtering
        if self.include_samples.is_none() {
            self.include_samples = config.include_samples;
        }
        if self.exclude_samples.is_none() {
            self.exclude_samples = config.exclude_samples;
        }

        // Flags (CLI flags take precedence, config only sets if not explicitly set)
        self.blank_corner |= config.blank_corner.unwrap_or(false);
        self.all_chars |= config.all_chars.unwrap_or(false);
        self.keep_case |= config.keep_case.unwrap_or(false);
        self.quiet |= config.quiet.unwrap_or(false);
        self.dry_run |= config.dry_run.unwrap_or(false);

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}
