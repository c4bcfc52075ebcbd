//! Project configuration
//!
//! A [`Configuration`] is built once per run, either by the interactive prompter
//! or from [`InitOptions`], and is only ever read afterwards. Changing the
//! conflict policy produces a new value.

pub mod database;
pub mod options;

use crate::conflict::ConflictResolution;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use database::{Database, DatabaseType};
pub use options::{InitOptions, PhpStanLevel};

/// PHP versions offered for selection
pub const PHP_VERSIONS: &[&str] = &["8.3", "8.4", "8.5"];
pub const DEFAULT_PHP_VERSION: &str = "8.4";

/// Symfony versions offered for selection
pub const SYMFONY_VERSIONS: &[&str] = &["7.4", "8.0"];
pub const DEFAULT_SYMFONY_VERSION: &str = "8.0";

/// Highest PHPStan rule level ("max")
pub const PHPSTAN_MAX_LEVEL: u8 = 9;

/// CI provider to generate a pipeline for
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CiProvider {
    #[value(name = "gitlab")]
    GitLab,
    #[value(name = "github")]
    GitHub,
    #[value(name = "azure")]
    Azure,
    #[default]
    None,
}

impl CiProvider {
    pub const ALL: [CiProvider; 4] = [
        CiProvider::GitLab,
        CiProvider::GitHub,
        CiProvider::Azure,
        CiProvider::None,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CiProvider::GitLab => "gitlab",
            CiProvider::GitHub => "github",
            CiProvider::Azure => "azure",
            CiProvider::None => "none",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CiProvider::GitLab => "GitLab CI",
            CiProvider::GitHub => "GitHub Actions",
            CiProvider::Azure => "Azure DevOps",
            CiProvider::None => "None",
        }
    }
}

impl fmt::Display for CiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CiProvider::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown CI provider '{}' (expected gitlab, github, azure or none)",
                    s
                )
            })
    }
}

/// Every decision that drives file generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub project_name: String,
    pub php_version: String,
    pub phpstan_level: u8,
    /// `None` when the project does not use Symfony
    pub symfony_version: Option<String>,
    pub ci_provider: CiProvider,
    pub include_php_cs_fixer: bool,
    pub include_phpstan: bool,
    pub include_rector: bool,
    pub include_phpunit: bool,
    pub include_ddev: bool,
    pub include_makefile: bool,
    pub src_path: String,
    pub tests_path: String,
    pub output_dir: PathBuf,
    pub conflict_resolution: ConflictResolution,
    pub database: Option<Database>,
}

impl Configuration {
    /// Same configuration with another conflict policy
    pub fn with_conflict_resolution(self, conflict_resolution: ConflictResolution) -> Self {
        Self {
            conflict_resolution,
            ..self
        }
    }

    pub fn is_symfony(&self) -> bool {
        self.symfony_version.is_some()
    }

    /// PHP version without the dot, as Rector's level sets expect ("8.4" -> "84")
    pub fn php_version_number(&self) -> String {
        self.php_version.replace('.', "")
    }

    /// True when a tool with its own `tools/<name>` install is selected
    pub fn has_any_tool(&self) -> bool {
        self.include_php_cs_fixer || self.include_phpstan || self.include_rector
    }

    pub fn has_any_ci(&self) -> bool {
        self.ci_provider != CiProvider::None
    }

    pub fn has_database(&self) -> bool {
        self.database.is_some()
    }

    pub fn database(&self) -> Option<&Database> {
        self.database.as_ref()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Configuration with every toggle off, for tests to switch on what they need
    pub(crate) fn bare_config() -> Configuration {
        Configuration {
            project_name: "test-project".to_string(),
            php_version: "8.4".to_string(),
            phpstan_level: 5,
            symfony_version: None,
            ci_provider: CiProvider::None,
            include_php_cs_fixer: false,
            include_phpstan: false,
            include_rector: false,
            include_phpunit: false,
            include_ddev: false,
            include_makefile: false,
            src_path: "src".to_string(),
            tests_path: "tests".to_string(),
            output_dir: PathBuf::from("."),
            conflict_resolution: ConflictResolution::Ask,
            database: None,
        }
    }

    #[test]
    fn test_php_version_number() {
        let config = Configuration {
            php_version: "8.3".to_string(),
            ..bare_config()
        };
        assert_eq!(config.php_version_number(), "83");
    }

    #[test]
    fn test_has_any_tool() {
        assert!(!bare_config().has_any_tool());
        for config in [
            Configuration {
                include_php_cs_fixer: true,
                ..bare_config()
            },
            Configuration {
                include_phpstan: true,
                ..bare_config()
            },
            Configuration {
                include_rector: true,
                ..bare_config()
            },
        ] {
            assert!(config.has_any_tool());
        }

        // PHPUnit has no tools/ install and does not count
        let phpunit_only = Configuration {
            include_phpunit: true,
            ..bare_config()
        };
        assert!(!phpunit_only.has_any_tool());
    }

    #[test]
    fn test_has_any_ci() {
        assert!(!bare_config().has_any_ci());
        let config = Configuration {
            ci_provider: CiProvider::GitHub,
            ..bare_config()
        };
        assert!(config.has_any_ci());
    }

    #[test]
    fn test_has_database_requires_both_parts() {
        for (kind, version, expected) in [
            (Some(DatabaseType::MySql), Some("8.0"), true),
            (None, Some("8.0"), false),
            (Some(DatabaseType::MySql), None, false),
            (None, None, false),
        ] {
            let config = Configuration {
                database: Database::from_parts(kind, version),
                ..bare_config()
            };
            assert_eq!(config.has_database(), expected);
        }
    }

    #[test]
    fn test_with_conflict_resolution_keeps_other_fields() {
        let config = Configuration {
            include_rector: true,
            ..bare_config()
        };
        let replaced = config
            .clone()
            .with_conflict_resolution(ConflictResolution::Replace);
        assert_eq!(replaced.conflict_resolution, ConflictResolution::Replace);
        assert_eq!(
            replaced,
            Configuration {
                conflict_resolution: ConflictResolution::Replace,
                ..config
            }
        );
    }

    #[test]
    fn test_parse_ci_provider() {
        assert_eq!("GitHub".parse::<CiProvider>(), Ok(CiProvider::GitHub));
        assert_eq!("none".parse::<CiProvider>(), Ok(CiProvider::None));
        assert!("jenkins".parse::<CiProvider>().is_err());
    }
}
