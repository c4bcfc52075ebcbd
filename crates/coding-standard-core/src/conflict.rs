//! Conflict resolution policy for files that already exist

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How to treat a generated file whose path already exists
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ConflictResolution {
    /// Leave every existing file untouched
    Skip,
    /// Overwrite every existing file
    Replace,
    /// Decide per file (or escalate once for a run-wide choice)
    #[default]
    Ask,
}

impl ConflictResolution {
    pub const ALL: [ConflictResolution; 3] = [
        ConflictResolution::Skip,
        ConflictResolution::Replace,
        ConflictResolution::Ask,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictResolution::Skip => "skip",
            ConflictResolution::Replace => "replace",
            ConflictResolution::Ask => "ask",
        }
    }

    /// Apply command-line overrides: `--force` beats `--skip-existing`, and
    /// either beats whatever the configuration was gathered with.
    pub fn effective(gathered: Self, force: bool, skip_existing: bool) -> Self {
        if force {
            ConflictResolution::Replace
        } else if skip_existing {
            ConflictResolution::Skip
        } else {
            gathered
        }
    }
}

impl fmt::Display for ConflictResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictResolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConflictResolution::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown conflict resolution '{}'", s))
    }
}

/// Final outcome for one generated path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Path did not exist and was written
    Create,
    /// Path existed and was overwritten
    Overwrite,
    /// Path existed and was left untouched
    Skip,
}

impl Disposition {
    pub fn is_write(&self) -> bool {
        !matches!(self, Disposition::Skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_valid_values() {
        assert_eq!("skip".parse::<ConflictResolution>(), Ok(ConflictResolution::Skip));
        assert_eq!("replace".parse::<ConflictResolution>(), Ok(ConflictResolution::Replace));
        assert_eq!("ask".parse::<ConflictResolution>(), Ok(ConflictResolution::Ask));
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("invalid".parse::<ConflictResolution>().is_err());
        assert!("SKIP".parse::<ConflictResolution>().is_err());
    }

    #[test]
    fn test_round_trips_through_as_str() {
        for resolution in ConflictResolution::ALL {
            assert_eq!(resolution.as_str().parse::<ConflictResolution>(), Ok(resolution));
        }
    }

    #[test]
    fn test_force_overrides_everything() {
        for gathered in ConflictResolution::ALL {
            assert_eq!(
                ConflictResolution::effective(gathered, true, true),
                ConflictResolution::Replace
            );
            assert_eq!(
                ConflictResolution::effective(gathered, true, false),
                ConflictResolution::Replace
            );
        }
    }

    #[test]
    fn test_skip_existing_overrides_gathered() {
        assert_eq!(
            ConflictResolution::effective(ConflictResolution::Replace, false, true),
            ConflictResolution::Skip
        );
    }

    #[test]
    fn test_gathered_policy_kept_without_flags() {
        for gathered in ConflictResolution::ALL {
            assert_eq!(
                ConflictResolution::effective(gathered, false, false),
                gathered
            );
        }
    }
}
