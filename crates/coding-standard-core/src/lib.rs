//! Coding Standard Core - library behind the `coding-standard` CLI
//!
//! Scaffolds the configuration of PHP quality tooling (PHP-CS-Fixer, PHPStan,
//! Rector, PHPUnit), a DDEV environment, a Makefile and a CI pipeline into an
//! existing project, without clobbering files the project already has.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Model** - [`Configuration`], [`ConflictResolution`] and the
//!   template renderer
//! - **Layer 2: Generation** - the closed [`GeneratorKind`] registry, the
//!   existing-file detector and the [`orchestrator`] that writes files
//! - **Layer 3: CLI/TUI Interface** - the [`Prompter`] seam with a
//!   non-interactive implementation and optional cliclack prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use coding_standard_core::{orchestrator, InitOptions, InitRequest, NonInteractive};
//!
//! let request = InitRequest {
//!     options: InitOptions { phpstan: Some(true), ..Default::default() },
//!     output_dir: ".".into(),
//!     ..Default::default()
//! };
//! let outcome = orchestrator::init(request, &NonInteractive::new(), "0.1.0").await?;
//! println!("{}", coding_standard_core::report::summary(&outcome.result));
//! ```

pub mod config;
pub mod conflict;
pub mod detector;
pub mod error;
pub mod generator;
pub mod orchestrator;
pub mod prompt;
pub mod report;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{CiProvider, Configuration, Database, DatabaseType, InitOptions, PhpStanLevel};
pub use conflict::{ConflictResolution, Disposition};
pub use detector::ExistingFileDetector;
pub use error::{Result, ScaffoldError};
pub use generator::{registry, GeneratedFiles, Generator, GeneratorKind, ToolGenerator};
pub use orchestrator::{init, list_targets, run, InitOutcome, InitRequest, RunResult};
pub use prompt::{NonInteractive, Prompter};
pub use templates::{TemplateRenderer, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::ClackPrompter;

/// CLI version - used for template compatibility checking
/// The binary passes its own version, but this provides a fallback
pub const DEFAULT_CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
