// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs, Debug)]
/// Pairwise SNP distance matrix from a FASTA alignment
pub struct Args {
    /// alignment file (FASTA, optionally gzip-compressed)
    #[argh(positional)]
    pub alignment: Option<String>,

    /// quiet mode; do not print progress information
    #[argh(switch, short = 'q')]
    pub quiet: bool,

    /// count all differences not just [AGTC]
    #[argh(switch, short = 'a')]
    pub all_chars: bool,

    /// keep case, don't uppercase all letters
    #[argh(switch, short = 'k')]
    pub keep_case: bool,

    /// output CSV instead of TSV
    #[argh(switch, short = 'c')]
    pub csv: bool,

    /// blank top left corner cell
    #[argh(switch, short = 'b')]
    pub blank_corner: bool,

    /// print version and exit
    #[argh(switch, short = 'v')]
    pub version: bool,

    /// output format: tsv, csv, molten, molten-csv, phylip, json (default: tsv)
    #[argh(option, default = "String::from(\"tsv\")")]
    pub format: String,

    /// output file (default: stdout)
    #[argh(option)]
    pub output: Option<String>,

    /// number of threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// maximum number of sequences to load (default: 100000)
    #[argh(option, default = "crate::data::DEFAULT_MAX_SEQUENCES")]
    pub max_seqs: usize,

    /// ambiguity model: reference, iupac (default: reference)
    #[argh(option, default = "String::from(\"reference\")")]
    pub ambiguity: String,

    /// include only samples matching regex pattern
    #[argh(option)]
    pub include_samples: Option<String>,

    /// exclude samples matching regex pattern
    #[argh(option)]
    pub exclude_samples: Option<String>,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,

    /// load and validate the alignment without computing distances
    #[argh(switch)]
    pub dry_run: bool,
}
