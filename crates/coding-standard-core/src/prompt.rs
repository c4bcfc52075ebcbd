//! The user-facing side of a run: questions, answers and progress lines

use crate::config::Configuration;
use crate::conflict::ConflictResolution;
use crate::error::Result;
use colored::Colorize;

/// Everything a run needs to ask or tell the user.
///
/// Passed explicitly to the orchestrator. Implementations that cannot ask
/// return `false` from [`Prompter::is_interactive`]; the orchestrator never
/// calls the `ask_*` methods on them.
pub trait Prompter {
    fn is_interactive(&self) -> bool;

    /// Let the user review and amend `seed`, the configuration built from
    /// defaults, preset and flags.
    fn gather_configuration(&self, seed: Configuration) -> Result<Configuration>;

    /// Run-wide choice for the given existing paths. Asked at most once per run.
    fn ask_conflict_resolution(&self, existing: &[String]) -> Result<ConflictResolution>;

    /// Whether to overwrite one existing path
    fn ask_single_file(&self, path: &str) -> Result<bool>;

    fn warn(&self, _message: &str) {}

    fn file_written(&self, _path: &str, _replaced: bool) {}

    fn file_skipped(&self, _path: &str) {}

    /// Closing line of a successful run
    fn outro(&self, _message: &str) {}
}

/// Prompter for scripts and CI: never asks, prints one line per file
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive {
    quiet: bool,
}

impl NonInteractive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress per-file progress lines
    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

impl Prompter for NonInteractive {
    fn is_interactive(&self) -> bool {
        false
    }

    fn gather_configuration(&self, seed: Configuration) -> Result<Configuration> {
        Ok(seed)
    }

    fn ask_conflict_resolution(&self, _existing: &[String]) -> Result<ConflictResolution> {
        Ok(ConflictResolution::Skip)
    }

    fn ask_single_file(&self, _path: &str) -> Result<bool> {
        Ok(false)
    }

    fn warn(&self, message: &str) {
        eprintln!("{} {}", "warning:".yellow().bold(), message);
    }

    fn file_written(&self, path: &str, replaced: bool) {
        if self.quiet {
            return;
        }
        if replaced {
            println!("  {} {}", "replaced".yellow(), path);
        } else {
            println!("  {} {}", "created".green(), path);
        }
    }

    fn file_skipped(&self, path: &str) {
        if !self.quiet {
            println!("  {} {}", "skipped".dimmed(), path);
        }
    }

    fn outro(&self, message: &str) {
        println!("\n{}", message.green().bold());
    }
}
