//! Manifest describing a local template directory

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Local template manifest (`<template-dir>/template.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template set
    pub name: String,

    /// What the template set customizes
    #[serde(default)]
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,
}

impl TemplateManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScaffoldError::io("read template manifest", path, e))?;
        serde_yaml::from_str(&content).map_err(|source| ScaffoldError::Preset {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_is_optional() {
        let manifest: TemplateManifest =
            serde_yaml::from_str("name: House\nversion: 0.1.0\n").unwrap();
        assert_eq!(manifest.name, "House");
        assert!(manifest.description.is_empty());
    }

    #[test]
    fn test_version_is_required() {
        assert!(serde_yaml::from_str::<TemplateManifest>("name: House\n").is_err());
    }
}
