//! Generators map a [`Configuration`] to the files of one tool or integration
//!
//! The set of generators is closed: [`GeneratorKind::ALL`] lists every kind in
//! registration order, and [`ToolGenerator`] dispatches to the kind's rendering
//! code. The [`Generator`] trait is the seam the orchestrator works against.

mod ci;
mod project;
mod tools;

use crate::config::Configuration;
use crate::error::Result;
use crate::templates::TemplateRenderer;

/// A tool or integration that contributes files to the project
pub trait Generator {
    /// Short identifier used in logs and error messages
    fn name(&self) -> &'static str;

    /// Whether this generator takes part in a run with `config`
    fn supports(&self, config: &Configuration) -> bool;

    /// Produce the files. Only called when [`Generator::supports`] is true.
    fn generate(&self, config: &Configuration) -> Result<GeneratedFiles>;

    /// Every path this generator can produce, whatever the configuration
    fn target_files(&self) -> &'static [&'static str];
}

/// One generated file: POSIX-style path relative to the output directory, and its content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Ordered path -> content mapping produced by a generator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    files: Vec<GeneratedFile>,
}

impl GeneratedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
        let path = path.into();
        debug_assert!(!self.contains(&path), "duplicate generated path {}", path);
        self.files.push(GeneratedFile {
            path,
            content: content.into(),
        });
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.iter().any(|f| f.path == path)
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.as_str())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeneratedFile> {
        self.files.iter()
    }
}

impl IntoIterator for GeneratedFiles {
    type Item = GeneratedFile;
    type IntoIter = std::vec::IntoIter<GeneratedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl<'a> IntoIterator for &'a GeneratedFiles {
    type Item = &'a GeneratedFile;
    type IntoIter = std::slice::Iter<'a, GeneratedFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}

/// Every generator the tool knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    PhpCsFixer,
    PhpStan,
    Rector,
    PhpUnit,
    Ddev,
    Makefile,
    GitLabCi,
    GitHubActions,
    AzureDevOps,
    ComposerScripts,
    ToolsGitIgnore,
}

impl GeneratorKind {
    /// Registration order; output order follows it
    pub const ALL: [GeneratorKind; 11] = [
        GeneratorKind::PhpCsFixer,
        GeneratorKind::PhpStan,
        GeneratorKind::Rector,
        GeneratorKind::PhpUnit,
        GeneratorKind::Ddev,
        GeneratorKind::Makefile,
        GeneratorKind::GitLabCi,
        GeneratorKind::GitHubActions,
        GeneratorKind::AzureDevOps,
        GeneratorKind::ComposerScripts,
        GeneratorKind::ToolsGitIgnore,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GeneratorKind::PhpCsFixer => "php-cs-fixer",
            GeneratorKind::PhpStan => "phpstan",
            GeneratorKind::Rector => "rector",
            GeneratorKind::PhpUnit => "phpunit",
            GeneratorKind::Ddev => "ddev",
            GeneratorKind::Makefile => "makefile",
            GeneratorKind::GitLabCi => "gitlab-ci",
            GeneratorKind::GitHubActions => "github-actions",
            GeneratorKind::AzureDevOps => "azure-devops",
            GeneratorKind::ComposerScripts => "composer-scripts",
            GeneratorKind::ToolsGitIgnore => "tools-gitignore",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GeneratorKind::PhpCsFixer => "PHP-CS-Fixer coding style rules",
            GeneratorKind::PhpStan => "PHPStan static analysis",
            GeneratorKind::Rector => "Rector automated refactoring",
            GeneratorKind::PhpUnit => "PHPUnit test configuration",
            GeneratorKind::Ddev => "DDEV local environment",
            GeneratorKind::Makefile => "Makefile shortcuts",
            GeneratorKind::GitLabCi => "GitLab CI pipeline",
            GeneratorKind::GitHubActions => "GitHub Actions workflow",
            GeneratorKind::AzureDevOps => "Azure DevOps pipeline",
            GeneratorKind::ComposerScripts => "Composer scripts snippet",
            GeneratorKind::ToolsGitIgnore => "Ignore rules for tools/ installs",
        }
    }

    pub fn supports(&self, config: &Configuration) -> bool {
        use crate::config::CiProvider;

        match self {
            GeneratorKind::PhpCsFixer => config.include_php_cs_fixer,
            GeneratorKind::PhpStan => config.include_phpstan,
            GeneratorKind::Rector => config.include_rector,
            GeneratorKind::PhpUnit => config.include_phpunit,
            GeneratorKind::Ddev => config.include_ddev,
            GeneratorKind::Makefile => config.include_makefile,
            GeneratorKind::GitLabCi => config.ci_provider == CiProvider::GitLab,
            GeneratorKind::GitHubActions => config.ci_provider == CiProvider::GitHub,
            GeneratorKind::AzureDevOps => config.ci_provider == CiProvider::Azure,
            GeneratorKind::ComposerScripts | GeneratorKind::ToolsGitIgnore => {
                config.has_any_tool()
            }
        }
    }

    pub fn target_files(&self) -> &'static [&'static str] {
        match self {
            GeneratorKind::PhpCsFixer => &[
                tools::PHP_CS_FIXER_CONFIG,
                tools::PHP_CS_FIXER_MANIFEST,
            ],
            GeneratorKind::PhpStan => &[tools::PHPSTAN_CONFIG, tools::PHPSTAN_MANIFEST],
            GeneratorKind::Rector => &[tools::RECTOR_CONFIG, tools::RECTOR_MANIFEST],
            GeneratorKind::PhpUnit => &[tools::PHPUNIT_CONFIG],
            GeneratorKind::Ddev => &[project::DDEV_CONFIG],
            GeneratorKind::Makefile => &[project::MAKEFILE],
            GeneratorKind::GitLabCi => &[ci::GITLAB_PIPELINE],
            GeneratorKind::GitHubActions => &[ci::GITHUB_WORKFLOW],
            GeneratorKind::AzureDevOps => &[ci::AZURE_PIPELINE],
            GeneratorKind::ComposerScripts => &[project::COMPOSER_SCRIPTS],
            GeneratorKind::ToolsGitIgnore => &[project::TOOLS_GITIGNORE],
        }
    }
}

/// A [`GeneratorKind`] bound to the renderer it draws its templates from
#[derive(Clone, Copy)]
pub struct ToolGenerator<'r> {
    kind: GeneratorKind,
    renderer: &'r TemplateRenderer,
}

impl<'r> ToolGenerator<'r> {
    pub fn new(kind: GeneratorKind, renderer: &'r TemplateRenderer) -> Self {
        Self { kind, renderer }
    }

    pub fn kind(&self) -> GeneratorKind {
        self.kind
    }
}

impl Generator for ToolGenerator<'_> {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn supports(&self, config: &Configuration) -> bool {
        self.kind.supports(config)
    }

    fn generate(&self, config: &Configuration) -> Result<GeneratedFiles> {
        let renderer = self.renderer;
        match self.kind {
            GeneratorKind::PhpCsFixer => tools::php_cs_fixer(renderer, config),
            GeneratorKind::PhpStan => tools::phpstan(renderer, config),
            GeneratorKind::Rector => tools::rector(renderer, config),
            GeneratorKind::PhpUnit => tools::phpunit(renderer, config),
            GeneratorKind::Ddev => project::ddev(renderer, config),
            GeneratorKind::Makefile => project::makefile(renderer, config),
            GeneratorKind::GitLabCi => ci::gitlab(renderer, config),
            GeneratorKind::GitHubActions => ci::github(renderer, config),
            GeneratorKind::AzureDevOps => ci::azure(renderer, config),
            GeneratorKind::ComposerScripts => project::composer_scripts(config),
            GeneratorKind::ToolsGitIgnore => project::tools_gitignore(renderer),
        }
    }

    fn target_files(&self) -> &'static [&'static str] {
        self.kind.target_files()
    }
}

/// All generators in registration order
pub fn registry(renderer: &TemplateRenderer) -> Vec<ToolGenerator<'_>> {
    GeneratorKind::ALL
        .into_iter()
        .map(|kind| ToolGenerator::new(kind, renderer))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::bare_config;
    use crate::config::{CiProvider, Configuration};
    use std::collections::HashSet;

    #[test]
    fn test_target_files_are_disjoint_across_generators() {
        let mut seen = HashSet::new();
        for kind in GeneratorKind::ALL {
            for path in kind.target_files() {
                assert!(seen.insert(*path), "{} claimed twice", path);
            }
        }
    }

    #[test]
    fn test_target_files_are_relative_posix_paths() {
        for kind in GeneratorKind::ALL {
            for path in kind.target_files() {
                assert!(!path.starts_with('/'), "{} is absolute", path);
                assert!(!path.contains('\\'), "{} is not POSIX", path);
            }
        }
    }

    #[test]
    fn test_nothing_supported_on_bare_config() {
        let config = bare_config();
        assert!(GeneratorKind::ALL.iter().all(|k| !k.supports(&config)));
    }

    #[test]
    fn test_only_matching_ci_generator_supported() {
        for provider in CiProvider::ALL {
            let config = Configuration {
                ci_provider: provider,
                ..bare_config()
            };
            let supported: Vec<_> = GeneratorKind::ALL
                .into_iter()
                .filter(|k| k.supports(&config))
                .collect();
            let expected = match provider {
                CiProvider::GitLab => vec![GeneratorKind::GitLabCi],
                CiProvider::GitHub => vec![GeneratorKind::GitHubActions],
                CiProvider::Azure => vec![GeneratorKind::AzureDevOps],
                CiProvider::None => vec![],
            };
            assert_eq!(supported, expected);
        }
    }

    #[test]
    fn test_generated_paths_match_declared_targets() {
        let renderer = TemplateRenderer::embedded().unwrap();
        let config = Configuration {
            include_php_cs_fixer: true,
            include_phpstan: true,
            include_rector: true,
            include_phpunit: true,
            include_ddev: true,
            include_makefile: true,
            ..bare_config()
        };

        for generator in registry(&renderer) {
            for provider in CiProvider::ALL {
                let config = Configuration {
                    ci_provider: provider,
                    ..config.clone()
                };
                if !generator.supports(&config) {
                    continue;
                }
                let files = generator.generate(&config).unwrap();
                let generated: Vec<_> = files.paths().collect();
                assert_eq!(
                    generated,
                    generator.target_files().to_vec(),
                    "{}",
                    generator.name()
                );
            }
        }
    }

    #[test]
    fn test_registry_follows_registration_order() {
        let renderer = TemplateRenderer::embedded().unwrap();
        let kinds: Vec<_> = registry(&renderer).iter().map(|g| g.kind()).collect();
        assert_eq!(kinds, GeneratorKind::ALL.to_vec());
    }

    #[test]
    fn test_generated_files_keep_insertion_order() {
        let mut files = GeneratedFiles::new();
        files.insert("b.txt", "b");
        files.insert("a.txt", "a");
        assert_eq!(files.paths().collect::<Vec<_>>(), vec!["b.txt", "a.txt"]);
        assert_eq!(files.get("a.txt"), Some("a"));
        assert!(files.get("c.txt").is_none());
    }
}
