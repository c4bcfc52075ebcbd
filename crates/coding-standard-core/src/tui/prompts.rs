//! Charm-style prompts for gathering a configuration and resolving conflicts

use crate::config::options::checked_path;
use crate::config::{
    CiProvider, Configuration, Database, DatabaseType, DEFAULT_SYMFONY_VERSION, PHPSTAN_MAX_LEVEL,
    PHP_VERSIONS, SYMFONY_VERSIONS,
};
use crate::conflict::ConflictResolution;
use crate::error::Result;
use crate::prompt::Prompter;

/// Prompter backed by the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackPrompter;

impl ClackPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for ClackPrompter {
    fn is_interactive(&self) -> bool {
        true
    }

    fn gather_configuration(&self, seed: Configuration) -> Result<Configuration> {
        cliclack::intro("Coding Standard")?;
        cliclack::log::step("Project settings")?;
        let project_name: String = cliclack::input("Project name")
            .default_input(&seed.project_name)
            .interact()?;
        let php_version = select_php_version(&seed.php_version)?;

        let is_symfony = confirm("Is this a Symfony project?", symfony_prompt_default(&seed))?;
        let (symfony_version, database) = if is_symfony {
            let version = select_symfony_version(seed.symfony_version.as_deref())?;
            (Some(version), select_database(seed.database.as_ref())?)
        } else {
            (None, None)
        };

        cliclack::log::step("Code quality tools")?;
        let include_php_cs_fixer = confirm("Include PHP-CS-Fixer?", seed.include_php_cs_fixer)?;
        let include_phpstan = confirm("Include PHPStan?", seed.include_phpstan)?;
        let phpstan_level = if include_phpstan {
            select_phpstan_level(seed.phpstan_level)?
        } else {
            seed.phpstan_level
        };
        let include_rector = confirm("Include Rector?", seed.include_rector)?;
        let include_phpunit = confirm("Include PHPUnit configuration?", seed.include_phpunit)?;

        cliclack::log::step("Infrastructure")?;
        let ci_provider = select_ci_provider(seed.ci_provider)?;
        let include_ddev = confirm("Include DDEV configuration?", seed.include_ddev)?;
        let include_makefile = confirm("Include Makefile?", seed.include_makefile)?;

        cliclack::log::step("Paths")?;
        let src_path = ask_path("Source directory", "src-path", &seed.src_path)?;
        let tests_path = ask_path("Tests directory", "tests-path", &seed.tests_path)?;

        Ok(Configuration {
            project_name,
            php_version,
            phpstan_level,
            symfony_version,
            ci_provider,
            include_php_cs_fixer,
            include_phpstan,
            include_rector,
            include_phpunit,
            include_ddev,
            include_makefile,
            src_path,
            tests_path,
            database,
            ..seed
        })
    }

    fn ask_conflict_resolution(&self, existing: &[String]) -> Result<ConflictResolution> {
        cliclack::log::warning(format!(
            "The following files already exist: {}",
            existing.join(", ")
        ))?;

        let choice = cliclack::select("How do you want to handle existing files?")
            .item(ConflictResolution::Skip, "Skip existing files", "")
            .item(ConflictResolution::Replace, "Replace all existing files", "")
            .item(ConflictResolution::Ask, "Ask for each file", "")
            .initial_value(ConflictResolution::Ask)
            .interact()?;
        Ok(choice)
    }

    fn ask_single_file(&self, path: &str) -> Result<bool> {
        confirm(&format!("File \"{}\" already exists. Replace it?", path), false)
    }

    fn warn(&self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn file_written(&self, path: &str, replaced: bool) {
        let verb = if replaced { "Replaced" } else { "Created" };
        let _ = cliclack::log::success(format!("{}: {}", verb, path));
    }

    fn file_skipped(&self, path: &str) {
        let _ = cliclack::log::remark(format!("Skipped: {}", path));
    }

    fn outro(&self, message: &str) {
        let _ = cliclack::outro(message);
    }
}

fn confirm(prompt: &str, initial: bool) -> Result<bool> {
    Ok(cliclack::confirm(prompt).initial_value(initial).interact()?)
}

fn select_php_version(current: &str) -> Result<String> {
    let mut select = cliclack::select("PHP version");
    for version in PHP_VERSIONS {
        select = select.item(version.to_string(), version, "");
    }
    if PHP_VERSIONS.contains(&current) {
        select = select.initial_value(current.to_string());
    }
    Ok(select.interact()?)
}

fn select_symfony_version(current: Option<&str>) -> Result<String> {
    let initial = current
        .filter(|v| SYMFONY_VERSIONS.contains(v))
        .unwrap_or(DEFAULT_SYMFONY_VERSION);

    let mut select = cliclack::select("Symfony version");
    for version in SYMFONY_VERSIONS {
        select = select.item(version.to_string(), version, "");
    }
    Ok(select.initial_value(initial.to_string()).interact()?)
}

/// Flags and preset decide the initial answer; without either it is "no"
fn symfony_prompt_default(seed: &Configuration) -> bool {
    seed.symfony_version.is_some()
}

fn database_prompt_default(current: Option<&Database>) -> bool {
    current.is_some()
}

fn select_database(current: Option<&Database>) -> Result<Option<Database>> {
    if !confirm("Configure a database?", database_prompt_default(current))? {
        return Ok(None);
    }

    let mut select = cliclack::select("Database type");
    for kind in DatabaseType::ALL {
        select = select.item(kind, kind.display_name(), "");
    }
    if let Some(db) = current {
        select = select.initial_value(db.kind);
    }
    let kind: DatabaseType = select.interact()?;

    let versions = kind.versions();
    let mut select = cliclack::select(format!("{} version", kind.display_name()));
    for version in versions {
        select = select.item(version.to_string(), version, "");
    }
    if let Some(db) = current.filter(|db| db.kind == kind && versions.contains(&db.version.as_str())) {
        select = select.initial_value(db.version.clone());
    }
    let version: String = select.interact()?;

    Ok(Some(Database::new(kind, version)))
}

fn select_phpstan_level(current: u8) -> Result<u8> {
    let mut select = cliclack::select("PHPStan level");
    for level in 0..=PHPSTAN_MAX_LEVEL {
        let label = if level == PHPSTAN_MAX_LEVEL {
            "max".to_string()
        } else {
            level.to_string()
        };
        select = select.item(level, label, "");
    }
    Ok(select.initial_value(current.min(PHPSTAN_MAX_LEVEL)).interact()?)
}

fn select_ci_provider(current: CiProvider) -> Result<CiProvider> {
    let mut select = cliclack::select("CI provider");
    for provider in CiProvider::ALL {
        select = select.item(provider, provider.display_name(), "");
    }
    Ok(select.initial_value(current).interact()?)
}

fn ask_path(prompt: &str, option: &'static str, current: &str) -> Result<String> {
    let input: String = cliclack::input(prompt)
        .default_input(current)
        .validate(move |value: &String| {
            checked_path(option, Some(value.clone()), "")
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact()?;
    checked_path(option, Some(input), current)
}
