//! Project-level files: local environment, Makefile, composer scripts and ignore rules

use super::GeneratedFiles;
use crate::config::{Configuration, DatabaseType};
use crate::error::{Result, ScaffoldError};
use crate::templates::TemplateRenderer;
use minijinja::context;
use serde::Serialize;
use serde_json::{json, Map, Value};

pub(super) const DDEV_CONFIG: &str = ".ddev/config.yaml";
pub(super) const MAKEFILE: &str = "Makefile";
pub(super) const COMPOSER_SCRIPTS: &str = "composer-scripts.json";
pub(super) const TOOLS_GITIGNORE: &str = "tools/.gitignore";

const COMPOSER_SCRIPTS_HEADER: &str =
    "# Add these scripts to your composer.json \"scripts\" section:\n\n";

/// DDEV spells PostgreSQL "postgres"
fn ddev_database_type(kind: DatabaseType) -> &'static str {
    match kind {
        DatabaseType::PostgreSql => "postgres",
        other => other.as_str(),
    }
}

pub(super) fn ddev(renderer: &TemplateRenderer, config: &Configuration) -> Result<GeneratedFiles> {
    let database = config.database();
    let mut files = GeneratedFiles::new();
    files.insert(
        DDEV_CONFIG,
        renderer.render(
            "ddev/config.yaml",
            context! {
                project_name => &config.project_name,
                php_version => &config.php_version,
                is_symfony => config.is_symfony(),
                has_database => database.is_some(),
                ddev_database_type => database.map(|db| ddev_database_type(db.kind)),
                database_version => database.map(|db| db.version.as_str()),
            },
        )?,
    );
    Ok(files)
}

pub(super) fn makefile(renderer: &TemplateRenderer, config: &Configuration) -> Result<GeneratedFiles> {
    let mut files = GeneratedFiles::new();
    files.insert(
        MAKEFILE,
        renderer.render(
            MAKEFILE,
            context! {
                is_symfony => config.is_symfony(),
                include_php_cs_fixer => config.include_php_cs_fixer,
                include_phpstan => config.include_phpstan,
                include_rector => config.include_rector,
                include_phpunit => config.include_phpunit,
            },
        )?,
    );
    Ok(files)
}

/// Scripts to paste into the project's `composer.json`, in the order they are listed
fn composer_script_entries(config: &Configuration) -> Map<String, Value> {
    let mut scripts = Map::new();

    if config.include_php_cs_fixer {
        scripts.insert(
            "csf".into(),
            json!("tools/php-cs-fixer/vendor/bin/php-cs-fixer fix --dry-run --diff"),
        );
        scripts.insert(
            "csf-fix".into(),
            json!("tools/php-cs-fixer/vendor/bin/php-cs-fixer fix"),
        );
    }
    if config.include_phpstan {
        scripts.insert(
            "stan".into(),
            json!("tools/phpstan/vendor/bin/phpstan analyse"),
        );
    }
    if config.include_rector {
        scripts.insert(
            "rector".into(),
            json!("tools/rector/vendor/bin/rector process --dry-run"),
        );
        scripts.insert(
            "rector-fix".into(),
            json!("tools/rector/vendor/bin/rector process"),
        );
    }
    scripts.insert("test".into(), json!("bin/phpunit"));

    let mut qa = Vec::new();
    if config.include_php_cs_fixer {
        qa.push("@csf");
    }
    if config.include_phpstan {
        qa.push("@stan");
    }
    qa.push("@test");
    scripts.insert("qa".into(), json!(qa));

    if config.is_symfony() {
        scripts.insert(
            "lint-yaml".into(),
            json!("bin/console lint:yaml config --parse-tags"),
        );
        scripts.insert("lint-twig".into(), json!("bin/console lint:twig templates"));
        scripts.insert("lint-container".into(), json!("bin/console lint:container"));
        scripts.insert(
            "lint-composer".into(),
            json!("@composer validate --no-check-publish"),
        );
        scripts.insert(
            "lint".into(),
            json!(["@lint-yaml", "@lint-container", "@lint-twig", "@lint-composer"]),
        );
    }

    scripts
}

pub(super) fn composer_scripts(config: &Configuration) -> Result<GeneratedFiles> {
    let document = json!({ "scripts": composer_script_entries(config) });

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    document
        .serialize(&mut serializer)
        .map_err(|e| ScaffoldError::io("serialize", COMPOSER_SCRIPTS, e.into()))?;
    let body = String::from_utf8_lossy(&buf);

    let mut files = GeneratedFiles::new();
    files.insert(
        COMPOSER_SCRIPTS,
        format!("{}{}\n", COMPOSER_SCRIPTS_HEADER, body),
    );
    Ok(files)
}

pub(super) fn tools_gitignore(renderer: &TemplateRenderer) -> Result<GeneratedFiles> {
    let mut files = GeneratedFiles::new();
    files.insert(
        TOOLS_GITIGNORE,
        renderer.render(TOOLS_GITIGNORE, context! {})?,
    );
    Ok(files)
}
