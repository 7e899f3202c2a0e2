// report.rs - Status lines and progress bars on stderr

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Writes human-readable progress to stderr so stdout stays reserved for the matrix.
/// Everything is suppressed in quiet mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn timestamp() -> String {
        chrono::Local::now().format("%H:%M:%S").to_string()
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("[{}] {}", Self::timestamp(), message);
        }
    }

    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("[{}] WARNING: {}", Self::timestamp(), message);
        }
    }

    /// Progress bar over `len` steps, hidden in quiet mode
    pub fn progress_bar(&self, len: u64) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rows ({percent}%) ETA: {eta}",
        ) {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}
