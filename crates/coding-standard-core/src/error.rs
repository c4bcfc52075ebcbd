//! Error types for scaffolding runs
//!
//! Every variant is fatal: it aborts the run. An already existing target file is
//! not an error, it is input to the conflict resolution policy.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// The renderer has no template registered under this name
    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// The template exists but failed to parse or render
    #[error("Error rendering template \"{template}\": {source}")]
    Render {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    /// Two generators claimed the same output path
    #[error("Generators '{first}' and '{second}' both produce '{path}'")]
    PathCollision {
        path: String,
        first: &'static str,
        second: &'static str,
    },

    /// A filesystem operation failed
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The terminal prompt failed or was cancelled
    #[error("Prompt failed: {0}")]
    Prompt(#[from] io::Error),

    /// A preset or template manifest could not be parsed
    #[error("Failed to parse {}: {source}", path.display())]
    Preset {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A configuration value is out of range or unknown
    #[error("Invalid value for {option}: {message}")]
    InvalidOption {
        option: &'static str,
        message: String,
    },
}

impl ScaffoldError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
