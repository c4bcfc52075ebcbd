//! CI pipelines, one generator per provider

use super::GeneratedFiles;
use crate::config::Configuration;
use crate::error::Result;
use crate::templates::TemplateRenderer;
use serde::Serialize;

pub(super) const GITLAB_PIPELINE: &str = ".gitlab-ci.yml";
pub(super) const GITHUB_WORKFLOW: &str = ".github/workflows/ci.yml";
pub(super) const AZURE_PIPELINE: &str = "azure-pipelines.yml";

/// Variables shared by every pipeline template
#[derive(Debug, Serialize)]
struct PipelineVariables<'a> {
    php_version: &'a str,
    is_symfony: bool,
    include_php_cs_fixer: bool,
    include_phpstan: bool,
    include_rector: bool,
    include_phpunit: bool,
    has_database: bool,
    database_image: Option<String>,
    database_port: Option<u16>,
    database_url: Option<String>,
    database_env_vars: Vec<(&'static str, &'static str)>,
    database_driver: Option<&'static str>,
}

impl<'a> PipelineVariables<'a> {
    fn new(config: &'a Configuration) -> Self {
        let database = config.database();
        Self {
            php_version: &config.php_version,
            is_symfony: config.is_symfony(),
            include_php_cs_fixer: config.include_php_cs_fixer,
            include_phpstan: config.include_phpstan,
            include_rector: config.include_rector,
            include_phpunit: config.include_phpunit,
            has_database: database.is_some(),
            database_image: database.map(|db| db.image()),
            database_port: database.map(|db| db.port()),
            database_url: database.map(|db| db.url()),
            database_env_vars: database.map(|db| db.env_vars()).unwrap_or_default(),
            database_driver: database.map(|db| db.driver_name()),
        }
    }
}

fn pipeline(
    renderer: &TemplateRenderer,
    config: &Configuration,
    template: &str,
    target: &'static str,
) -> Result<GeneratedFiles> {
    let mut files = GeneratedFiles::new();
    files.insert(
        target,
        renderer.render(template, PipelineVariables::new(config))?,
    );
    Ok(files)
}

pub(super) fn gitlab(renderer: &TemplateRenderer, config: &Configuration) -> Result<GeneratedFiles> {
    pipeline(renderer, config, "ci/gitlab-ci.yml", GITLAB_PIPELINE)
}

pub(super) fn github(renderer: &TemplateRenderer, config: &Configuration) -> Result<GeneratedFiles> {
    pipeline(renderer, config, "ci/github/workflows/ci.yml", GITHUB_WORKFLOW)
}

pub(super) fn azure(renderer: &TemplateRenderer, config: &Configuration) -> Result<GeneratedFiles> {
    pipeline(renderer, config, "ci/azure-pipelines.yml", AZURE_PIPELINE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::bare_config;
    use crate::config::{CiProvider, Database, DatabaseType};

    fn symfony_with(database: DatabaseType, version: &str) -> Configuration {
        Configuration {
            ci_provider: CiProvider::GitLab,
            symfony_version: Some("8.0".to_string()),
            include_phpstan: true,
            include_phpunit: true,
            database: Some(Database::new(database, version)),
            ..bare_config()
        }
    }

    #[test]
    fn test_pipelines_render_without_database() {
        let renderer = TemplateRenderer::embedded().unwrap();
        let config = Configuration {
            include_php_cs_fixer: true,
            ..bare_config()
        };

        for generate in [gitlab, github, azure] {
            let files = generate(&renderer, &config).unwrap();
            let content = files.iter().next().unwrap().content.as_str();
            assert!(content.contains("8.4"));
            assert!(!content.contains("postgres:"));
        }
    }

    #[test]
    fn test_gitlab_service_points_at_database_host() {
        let renderer = TemplateRenderer::embedded().unwrap();
        let config = symfony_with(DatabaseType::PostgreSql, "16");

        let files = gitlab(&renderer, &config).unwrap();
        let content = files.get(GITLAB_PIPELINE).unwrap();
        assert!(content.contains("postgres:16"));
        assert!(content.contains("@database:5432"));
        assert!(content.contains("POSTGRES_PASSWORD"));
    }

    #[test]
    fn test_github_service_exposes_port() {
        let renderer = TemplateRenderer::embedded().unwrap();
        let config = symfony_with(DatabaseType::MySql, "8.4");

        let files = github(&renderer, &config).unwrap();
        let content = files.get(GITHUB_WORKFLOW).unwrap();
        assert!(content.contains("mysql:8.4"));
        assert!(content.contains("3306"));
        assert!(content.contains("MYSQL_ROOT_PASSWORD"));
    }

    #[test]
    fn test_azure_pipeline_lands_at_root() {
        let renderer = TemplateRenderer::embedded().unwrap();
        let config = symfony_with(DatabaseType::MariaDb, "11.4");

        let files = azure(&renderer, &config).unwrap();
        assert_eq!(files.paths().collect::<Vec<_>>(), vec![AZURE_PIPELINE]);
        assert!(files.get(AZURE_PIPELINE).unwrap().contains("mariadb:11.4"));
    }
}
