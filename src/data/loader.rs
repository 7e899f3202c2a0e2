// loader.rs - FASTA alignment loading (plain or gzip)

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use bio::io::fasta;
use flate2::read::MultiGzDecoder;
use regex::Regex;
use thiserror::Error;

use crate::core::IGNORE_CHAR;
use crate::data::alignment::{Alignment, SequenceRecord};

/// Default soft limit on the number of sequences held in memory
pub const DEFAULT_MAX_SEQUENCES: usize = 100_000;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Failures while turning an alignment file into an [`Alignment`]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not open filename '{path}': {source}")]
    InputAccess {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid FASTA record in '{path}': {source}")]
    Parse {
        path: String,
        source: std::io::Error,
    },

    /// The FASTA reader works on UTF-8 text, so raw bytes >= 0x80 cannot be loaded
    #[error("'{path}' contains bytes that are not valid UTF-8; only ASCII residue codes are supported")]
    NonUtf8 { path: String },

    #[error("sequence #{index} '{name}' has length {found} but expected {expected}")]
    LengthMismatch {
        index: usize,
        name: String,
        found: usize,
        expected: usize,
    },

    #[error("can only handle {max} sequences at most. Please raise --max-seqs")]
    CapacityExceeded { max: usize },

    #[error("file '{path}' contained no sequences")]
    EmptyInput { path: String },
}

/// How records are cleaned and selected while loading
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Leave residues in their original case
    pub keep_case: bool,
    /// Keep every character instead of masking non-ACGT to the ignore sentinel
    pub all_chars: bool,
    pub max_sequences: usize,
    pub include_samples: Option<Regex>,
    pub exclude_samples: Option<Regex>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            keep_case: false,
            all_chars: false,
            max_sequences: DEFAULT_MAX_SEQUENCES,
            include_samples: None,
            exclude_samples: None,
        }
    }
}

impl LoadOptions {
    fn accepts(&self, name: &str) -> bool {
        if let Some(regex) = &self.include_samples {
            if !regex.is_match(name) {
                return false;
            }
        }
        if let Some(regex) = &self.exclude_samples {
            if regex.is_match(name) {
                return false;
            }
        }
        true
    }
}

/// Uppercase (unless `keep_case`) then mask anything outside ACGT (unless `all_chars`)
pub fn normalize_residues(residues: &mut [u8], keep_case: bool, all_chars: bool) {
    if !keep_case {
        residues.make_ascii_uppercase();
    }
    if !all_chars {
        for residue in residues.iter_mut() {
            if !matches!(*residue, b'A' | b'C' | b'G' | b'T') {
                *residue = IGNORE_CHAR;
            }
        }
    }
}

/// Load an alignment from a FASTA file, decompressing gzip input transparently
pub fn load_alignment(path: &Path, options: &LoadOptions) -> Result<Alignment, LoadError> {
    let reader = open_input(path)?;
    read_alignment(reader, &path.display().to_string(), options)
}

/// Read an alignment from any FASTA stream. `source` names the stream in errors.
pub fn read_alignment<R: Read>(
    reader: R,
    source: &str,
    options: &LoadOptions,
) -> Result<Alignment, LoadError> {
    let mut alignment = Alignment::new();

    for record_result in fasta::Reader::new(reader).records() {
        let record = record_result.map_err(|e| {
            if e.kind() == ErrorKind::InvalidData && e.to_string().contains("UTF-8") {
                LoadError::NonUtf8 {
                    path: source.to_string(),
                }
            } else {
                LoadError::Parse {
                    path: source.to_string(),
                    source: e,
                }
            }
        })?;

        if !options.accepts(record.id()) {
            continue;
        }

        let mut residues = record.seq().to_vec();
        normalize_residues(&mut residues, options.keep_case, options.all_chars);
        let record = SequenceRecord::new(record.id(), residues);

        // Length is checked before capacity so a bad record is reported as such
        alignment.check_length(&record)?;
        if alignment.len() >= options.max_sequences {
            return Err(LoadError::CapacityExceeded {
                max: options.max_sequences,
            });
        }
        alignment.push(record)?;
    }

    if alignment.is_empty() {
        return Err(LoadError::EmptyInput {
            path: source.to_string(),
        });
    }

    Ok(alignment)
}

fn open_input(path: &Path) -> Result<Box<dyn Read>, LoadError> {
    let access_error = |e| LoadError::InputAccess {
        path: path.display().to_string(),
        source: e,
    };

    let file = File::open(path).map_err(access_error)?;
    let mut reader = BufReader::new(file);
    let is_gzip = reader.fill_buf().map_err(access_error)?.starts_with(&GZIP_MAGIC);

    if is_gzip {
        Ok(Box::new(MultiGzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}
