//! Quality tools installed under `tools/<name>`, plus PHPUnit

use super::GeneratedFiles;
use crate::config::Configuration;
use crate::error::Result;
use crate::templates::TemplateRenderer;
use minijinja::context;

pub(super) const PHP_CS_FIXER_CONFIG: &str = ".php-cs-fixer.dist.php";
pub(super) const PHP_CS_FIXER_MANIFEST: &str = "tools/php-cs-fixer/composer.json";
pub(super) const PHPSTAN_CONFIG: &str = "phpstan.neon";
pub(super) const PHPSTAN_MANIFEST: &str = "tools/phpstan/composer.json";
pub(super) const RECTOR_CONFIG: &str = "rector.php";
pub(super) const RECTOR_MANIFEST: &str = "tools/rector/composer.json";
pub(super) const PHPUNIT_CONFIG: &str = "phpunit.dist.xml";

pub(super) fn php_cs_fixer(
    renderer: &TemplateRenderer,
    config: &Configuration,
) -> Result<GeneratedFiles> {
    let mut files = GeneratedFiles::new();
    files.insert(
        PHP_CS_FIXER_CONFIG,
        renderer.render(
            "php-cs-fixer.dist.php",
            context! {
                project_name => &config.project_name,
                src_path => &config.src_path,
                tests_path => &config.tests_path,
                is_symfony => config.is_symfony(),
            },
        )?,
    );
    files.insert(
        PHP_CS_FIXER_MANIFEST,
        renderer.render(PHP_CS_FIXER_MANIFEST, context! {})?,
    );
    Ok(files)
}

pub(super) fn phpstan(renderer: &TemplateRenderer, config: &Configuration) -> Result<GeneratedFiles> {
    let mut files = GeneratedFiles::new();
    files.insert(
        PHPSTAN_CONFIG,
        renderer.render(
            PHPSTAN_CONFIG,
            context! {
                phpstan_level => config.phpstan_level,
                src_path => &config.src_path,
                tests_path => &config.tests_path,
                is_symfony => config.is_symfony(),
            },
        )?,
    );
    files.insert(
        PHPSTAN_MANIFEST,
        renderer.render(
            PHPSTAN_MANIFEST,
            context! { is_symfony => config.is_symfony() },
        )?,
    );
    Ok(files)
}

pub(super) fn rector(renderer: &TemplateRenderer, config: &Configuration) -> Result<GeneratedFiles> {
    let mut files = GeneratedFiles::new();
    files.insert(
        RECTOR_CONFIG,
        renderer.render(
            RECTOR_CONFIG,
            context! {
                src_path => &config.src_path,
                tests_path => &config.tests_path,
                php_version_number => config.php_version_number(),
                is_symfony => config.is_symfony(),
            },
        )?,
    );
    files.insert(
        RECTOR_MANIFEST,
        renderer.render(
            RECTOR_MANIFEST,
            context! { is_symfony => config.is_symfony() },
        )?,
    );
    Ok(files)
}

pub(super) fn phpunit(renderer: &TemplateRenderer, config: &Configuration) -> Result<GeneratedFiles> {
    let mut files = GeneratedFiles::new();
    files.insert(
        PHPUNIT_CONFIG,
        renderer.render(
            PHPUNIT_CONFIG,
            context! {
                src_path => &config.src_path,
                tests_path => &config.tests_path,
                is_symfony => config.is_symfony(),
            },
        )?,
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::bare_config;

    fn symfony_config() -> Configuration {
        Configuration {
            symfony_version: Some("8.0".to_string()),
            phpstan_level: 6,
            ..bare_config()
        }
    }

    #[test]
    fn test_phpstan_uses_configured_level_and_paths() {
        let renderer = TemplateRenderer::embedded().unwrap();
        let config = Configuration {
            src_path: "app".to_string(),
            tests_path: "checks".to_string(),
            phpstan_level: 7,
            ..bare_config()
        };

        let files = phpstan(&renderer, &config).unwrap();
        let neon = files.get(PHPSTAN_CONFIG).unwrap();
        assert!(neon.contains("level: 7"));
        assert!(neon.contains("app"));
        assert!(neon.contains("checks"));
        assert!(files.contains(PHPSTAN_MANIFEST));
    }

    #[test]
    fn test_phpstan_manifest_adds_symfony_extension() {
        let renderer = TemplateRenderer::embedded().unwrap();

        let plain = phpstan(&renderer, &bare_config()).unwrap();
        let symfony = phpstan(&renderer, &symfony_config()).unwrap();

        assert!(!plain.get(PHPSTAN_MANIFEST).unwrap().contains("phpstan-symfony"));
        assert!(symfony.get(PHPSTAN_MANIFEST).unwrap().contains("phpstan-symfony"));
    }

    #[test]
    fn test_rector_targets_php_level_set() {
        let renderer = TemplateRenderer::embedded().unwrap();
        let config = Configuration {
            php_version: "8.3".to_string(),
            ..bare_config()
        };

        let files = rector(&renderer, &config).unwrap();
        assert!(files.get(RECTOR_CONFIG).unwrap().contains("php83: true"));
    }

    #[test]
    fn test_php_cs_fixer_mentions_project() {
        let renderer = TemplateRenderer::embedded().unwrap();
        let config = Configuration {
            project_name: "acme-shop".to_string(),
            ..bare_config()
        };

        let files = php_cs_fixer(&renderer, &config).unwrap();
        assert!(files
            .get(PHP_CS_FIXER_CONFIG)
            .unwrap()
            .contains("acme-shop"));
        assert_eq!(
            files.paths().collect::<Vec<_>>(),
            vec![PHP_CS_FIXER_CONFIG, PHP_CS_FIXER_MANIFEST]
        );
    }

    #[test]
    fn test_phpunit_is_a_single_file() {
        let renderer = TemplateRenderer::embedded().unwrap();
        let files = phpunit(&renderer, &symfony_config()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files.get(PHPUNIT_CONFIG).unwrap().contains("tests"));
    }
}
