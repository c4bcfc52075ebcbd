//! Non-interactive configuration: command-line flags layered over a YAML preset
//!
//! Every field is optional so that sources can be stacked with [`InitOptions::or`]
//! and the remaining gaps filled with the built-in defaults.
//!
//! ```yaml
//! # coding-standard.yaml
//! project_name: acme-shop
//! php_version: "8.4"   # quote versions, YAML would read 8.4 as a number
//! symfony: "7.4"
//! phpstan_level: max
//! ci: gitlab
//! database: postgresql
//! database_version: "16"
//! ```

use super::{
    CiProvider, Configuration, Database, DatabaseType, DEFAULT_PHP_VERSION, PHPSTAN_MAX_LEVEL,
};
use crate::conflict::ConflictResolution;
use crate::error::{Result, ScaffoldError};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// PHPStan rule level, 0 through 9 ("max" is 9)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawLevel")]
pub struct PhpStanLevel(u8);

impl PhpStanLevel {
    pub const MAX: PhpStanLevel = PhpStanLevel(PHPSTAN_MAX_LEVEL);

    pub fn new(level: u8) -> std::result::Result<Self, String> {
        if level <= PHPSTAN_MAX_LEVEL {
            Ok(Self(level))
        } else {
            Err(format!(
                "PHPStan level must be between 0 and {} or 'max', got {}",
                PHPSTAN_MAX_LEVEL, level
            ))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for PhpStanLevel {
    fn default() -> Self {
        Self::MAX
    }
}

impl fmt::Display for PhpStanLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PhpStanLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("max") {
            return Ok(Self::MAX);
        }
        let level: u8 = s
            .parse()
            .map_err(|_| format!("PHPStan level must be a number or 'max', got '{}'", s))?;
        Self::new(level)
    }
}

/// Presets may write the level as `8` or `max`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawLevel {
    Number(u8),
    Named(String),
}

impl TryFrom<RawLevel> for PhpStanLevel {
    type Error = String;

    fn try_from(raw: RawLevel) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawLevel::Number(level) => PhpStanLevel::new(level),
            RawLevel::Named(name) => name.parse(),
        }
    }
}

/// Configuration values supplied without prompting
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InitOptions {
    pub project_name: Option<String>,
    pub php_version: Option<String>,
    /// Symfony version, or "no" for a plain PHP project
    pub symfony: Option<String>,
    pub php_cs_fixer: Option<bool>,
    pub phpstan: Option<bool>,
    pub phpstan_level: Option<PhpStanLevel>,
    pub rector: Option<bool>,
    pub phpunit: Option<bool>,
    pub ci: Option<CiProvider>,
    pub ddev: Option<bool>,
    pub makefile: Option<bool>,
    pub database: Option<DatabaseType>,
    pub database_version: Option<String>,
    pub src_path: Option<String>,
    pub tests_path: Option<String>,
    pub conflict_resolution: Option<ConflictResolution>,
}

impl InitOptions {
    /// Load a YAML preset file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScaffoldError::io("read preset", path, e))?;
        serde_yaml::from_str(&content).map_err(|source| ScaffoldError::Preset {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Keep the values set here and take the rest from `fallback`
    pub fn or(self, fallback: InitOptions) -> InitOptions {
        InitOptions {
            project_name: self.project_name.or(fallback.project_name),
            php_version: self.php_version.or(fallback.php_version),
            symfony: self.symfony.or(fallback.symfony),
            php_cs_fixer: self.php_cs_fixer.or(fallback.php_cs_fixer),
            phpstan: self.phpstan.or(fallback.phpstan),
            phpstan_level: self.phpstan_level.or(fallback.phpstan_level),
            rector: self.rector.or(fallback.rector),
            phpunit: self.phpunit.or(fallback.phpunit),
            ci: self.ci.or(fallback.ci),
            ddev: self.ddev.or(fallback.ddev),
            makefile: self.makefile.or(fallback.makefile),
            database: self.database.or(fallback.database),
            database_version: self.database_version.or(fallback.database_version),
            src_path: self.src_path.or(fallback.src_path),
            tests_path: self.tests_path.or(fallback.tests_path),
            conflict_resolution: self.conflict_resolution.or(fallback.conflict_resolution),
        }
    }

    /// Fill the gaps with defaults and build the configuration for `output_dir`
    pub fn into_configuration(self, output_dir: PathBuf) -> Result<Configuration> {
        let project_name = non_empty(self.project_name)
            .unwrap_or_else(|| default_project_name(&output_dir));

        let php_version =
            non_empty(self.php_version).unwrap_or_else(|| DEFAULT_PHP_VERSION.to_string());

        let symfony_version = non_empty(self.symfony).filter(|v| {
            !matches!(v.to_lowercase().as_str(), "no" | "none" | "false")
        });

        let database = Database::from_parts(self.database, self.database_version.as_deref());
        if database.is_none() && (self.database.is_some() || self.database_version.is_some()) {
            tracing::warn!(
                database = ?self.database,
                version = ?self.database_version,
                "incomplete database selection ignored, both type and version are required"
            );
        }

        Ok(Configuration {
            project_name,
            php_version,
            phpstan_level: self.phpstan_level.unwrap_or_default().value(),
            symfony_version,
            ci_provider: self.ci.unwrap_or_default(),
            include_php_cs_fixer: self.php_cs_fixer.unwrap_or(true),
            include_phpstan: self.phpstan.unwrap_or(true),
            include_rector: self.rector.unwrap_or(true),
            include_phpunit: self.phpunit.unwrap_or(true),
            include_ddev: self.ddev.unwrap_or(true),
            include_makefile: self.makefile.unwrap_or(true),
            src_path: checked_path("src-path", self.src_path, "src")?,
            tests_path: checked_path("tests-path", self.tests_path, "tests")?,
            output_dir,
            conflict_resolution: self.conflict_resolution.unwrap_or_default(),
            database,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Source and test paths are written into configs relative to the project root
pub(crate) fn checked_path(option: &'static str, value: Option<String>, default: &str) -> Result<String> {
    let path = non_empty(value).unwrap_or_else(|| default.to_string());
    let trimmed = path.trim_end_matches('/');
    if trimmed.starts_with('/') || trimmed.split('/').any(|part| part == "..") {
        return Err(ScaffoldError::InvalidOption {
            option,
            message: format!("'{}' must be a path inside the project", path),
        });
    }
    Ok(trimmed.to_string())
}

/// Name of the output directory, or "project" when it has none (e.g. "/")
pub fn default_project_name(output_dir: &Path) -> String {
    output_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "project".to_string())
}
