// validation.rs - Input validation utilities

use std::str::FromStr;

use regex::Regex;

use crate::cli::args::Args;
use crate::core::AmbiguityModel;
use crate::data::LoadOptions;
use crate::output::{default_corner, OutputFormat, OutputOptions};

#[derive(Debug)]
pub struct ValidationResult {
    pub alignment_path: String,
    pub ambiguity: AmbiguityModel,
    pub load_options: LoadOptions,
    pub output_options: OutputOptions,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let alignment_path = args
        .alignment
        .clone()
        .ok_or("An alignment file is required (see --help)")?;

    if let Some(output) = &args.output {
        if output == &alignment_path {
            return Err(format!("Output file '{}' would overwrite the input alignment", output));
        }
    }

    if args.threads == Some(0) {
        return Err("--threads must be at least 1".to_string());
    }
    if args.max_seqs == 0 {
        return Err("--max-seqs must be at least 1".to_string());
    }

    let ambiguity = AmbiguityModel::from_str(&args.ambiguity)?;
    let format = resolve_format(&args.format, args.csv)?;

    let include_samples = compile_filter(args.include_samples.as_deref(), "include_samples")?;
    let exclude_samples = compile_filter(args.exclude_samples.as_deref(), "exclude_samples")?;

    Ok(ValidationResult {
        alignment_path,
        ambiguity,
        load_options: LoadOptions {
            keep_case: args.keep_case,
            all_chars: args.all_chars,
            max_sequences: args.max_seqs,
            include_samples,
            exclude_samples,
        },
        output_options: OutputOptions {
            format,
            corner: if args.blank_corner {
                None
            } else {
                Some(default_corner())
            },
        },
    })
}

/// `-c` switches the tabular formats to commas
fn resolve_format(format: &str, csv: bool) -> Result<OutputFormat, String> {
    let format = OutputFormat::from_str(format)?;
    if !csv {
        return Ok(format);
    }
    match format {
        OutputFormat::Tsv | OutputFormat::Csv => Ok(OutputFormat::Csv),
        OutputFormat::MoltenTsv | OutputFormat::MoltenCsv => Ok(OutputFormat::MoltenCsv),
        other => Err(format!("--csv cannot be combined with {} output", other.description())),
    }
}

fn compile_filter(pattern: Option<&str>, name: &str) -> Result<Option<Regex>, String> {
    pattern
        .map(|p| Regex::new(p).map_err(|e| format!("Invalid {} regex: {}", name, e)))
        .transpose()
}
