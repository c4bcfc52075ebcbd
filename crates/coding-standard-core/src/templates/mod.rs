//! Template loading and rendering
//!
//! This module provides:
//! - The built-in templates compiled into the binary
//! - Local template directories that override built-ins by name
//! - An optional `template.yaml` manifest for local directories
//! - Version compatibility checking for local template sets

mod builtin;
pub mod manifest;
pub mod version;

use crate::error::{Result, ScaffoldError};
use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use builtin::builtin_names;
pub use manifest::TemplateManifest;
pub use version::check_compatibility;

/// Suffix of template files on disk; stripped to form the template name
pub const TEMPLATE_SUFFIX: &str = ".j2";

/// Manifest file looked up at the root of a local template directory
pub const MANIFEST_FILE: &str = "template.yaml";

/// Where templates come from
#[derive(Debug, Clone, Default)]
pub enum TemplateSource {
    /// Only the templates compiled into the binary
    #[default]
    Embedded,
    /// Built-ins, overridden by the templates found in this directory
    Local(PathBuf),
}

impl TemplateSource {
    pub fn from_dir(dir: Option<PathBuf>) -> Self {
        dir.map(Self::Local).unwrap_or_default()
    }
}

/// Renders named templates against an explicit variable map.
///
/// Undefined variables are errors, so a template that references a value the
/// generator did not bind fails loudly instead of rendering an empty string.
pub struct TemplateRenderer {
    env: Environment<'static>,
    manifest: Option<TemplateManifest>,
}

impl TemplateRenderer {
    /// Renderer over the built-in templates only
    pub fn embedded() -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        for &(name, source) in builtin::BUILTIN_TEMPLATES {
            env.add_template(name, source)
                .map_err(|source| ScaffoldError::Render {
                    template: name.to_string(),
                    source,
                })?;
        }

        Ok(Self {
            env,
            manifest: None,
        })
    }

    pub fn from_source(source: &TemplateSource) -> Result<Self> {
        match source {
            TemplateSource::Embedded => Self::embedded(),
            TemplateSource::Local(dir) => Self::from_local(dir),
        }
    }

    /// Built-ins plus every `*.j2` file under `dir`, which win on name clashes
    pub fn from_local(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(ScaffoldError::io(
                "read template directory",
                dir,
                std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            ));
        }

        let mut renderer = Self::embedded()?;

        let manifest_path = dir.join(MANIFEST_FILE);
        if manifest_path.is_file() {
            renderer.manifest = Some(TemplateManifest::load(&manifest_path)?);
        }

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry =
                entry.map_err(|e| ScaffoldError::io("read template directory", dir, e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = match entry.path().strip_prefix(dir) {
                Ok(relative) => relative,
                Err(_) => continue,
            };
            let relative = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            let Some(name) = relative.strip_suffix(TEMPLATE_SUFFIX) else {
                continue;
            };

            let content = std::fs::read_to_string(entry.path())
                .map_err(|e| ScaffoldError::io("read template", entry.path(), e))?;
            tracing::debug!(template = name, path = %entry.path().display(), "loaded local template");

            renderer
                .env
                .add_template_owned(name.to_string(), content)
                .map_err(|source| ScaffoldError::Render {
                    template: name.to_string(),
                    source,
                })?;
        }

        Ok(renderer)
    }

    /// Render `name` with the given variables
    pub fn render<S: Serialize>(&self, name: &str, variables: S) -> Result<String> {
        let template = self.env.get_template(name).map_err(|source| {
            if source.kind() == ErrorKind::TemplateNotFound {
                ScaffoldError::TemplateNotFound {
                    name: name.to_string(),
                }
            } else {
                ScaffoldError::Render {
                    template: name.to_string(),
                    source,
                }
            }
        })?;

        template
            .render(variables)
            .map_err(|source| ScaffoldError::Render {
                template: name.to_string(),
                source,
            })
    }

    pub fn exists(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Manifest of the local template directory, if it has one
    pub fn manifest(&self) -> Option<&TemplateManifest> {
        self.manifest.as_ref()
    }
}
