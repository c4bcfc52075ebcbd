//! Runs generators and writes their output
//!
//! A run has two phases. First every supporting generator renders into one
//! ordered set of files and the existing paths are detected, without touching
//! the filesystem. Then each file is resolved against the conflict policy and
//! written in order.

use crate::config::{Configuration, InitOptions};
use crate::conflict::{ConflictResolution, Disposition};
use crate::detector::ExistingFileDetector;
use crate::error::{Result, ScaffoldError};
use crate::generator::{registry, GeneratedFile, Generator, GeneratorKind};
use crate::prompt::Prompter;
use crate::templates::{check_compatibility, TemplateRenderer, TemplateSource};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Gets owner-executable permissions whenever it is written
pub const EXECUTABLE_ENTRY_POINT: &str = "bin/coding-standard";

/// Command printed when local templates ask for a newer release
pub const UPGRADE_COMMAND: &str = "cargo install coding-standard --force";

/// What a run did, for reporting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunResult {
    /// Every path written, new or replaced, in generation order
    pub written: Vec<String>,
    /// Existing paths left untouched
    pub skipped: Vec<String>,
    /// The subset of `written` that overwrote an existing path
    pub replaced: Vec<String>,
}

impl RunResult {
    /// True when no generator produced anything
    pub fn is_empty(&self) -> bool {
        self.written.is_empty() && self.skipped.is_empty()
    }
}

/// Merge the output of every supporting generator, in registration order.
///
/// Generators that do not support `config` are never asked to generate.
pub fn collect_files<G: Generator>(
    config: &Configuration,
    generators: &[G],
) -> Result<Vec<GeneratedFile>> {
    let mut merged = Vec::new();
    let mut owners: HashMap<String, &'static str> = HashMap::new();

    for generator in generators {
        if !generator.supports(config) {
            tracing::debug!(generator = generator.name(), "not selected");
            continue;
        }

        let files = generator.generate(config)?;
        tracing::debug!(generator = generator.name(), files = files.len(), "generated");

        for file in files {
            if let Some(&first) = owners.get(&file.path) {
                return Err(ScaffoldError::PathCollision {
                    path: file.path,
                    first,
                    second: generator.name(),
                });
            }
            owners.insert(file.path.clone(), generator.name());
            merged.push(file);
        }
    }

    Ok(merged)
}

/// Generate, resolve conflicts and write.
///
/// Files are written one after another on the calling task. A failed write
/// aborts the run; files written before it stay on disk.
pub async fn run<G, P>(config: &Configuration, generators: &[G], prompter: &P) -> Result<RunResult>
where
    G: Generator,
    P: Prompter + ?Sized,
{
    let files = collect_files(config, generators)?;
    if files.is_empty() {
        tracing::info!("no generator selected, nothing to write");
        return Ok(RunResult::default());
    }

    let existing = ExistingFileDetector::new()
        .existing(&config.output_dir, files.iter().map(|f| f.path.as_str()));
    let mut policy = config.conflict_resolution;

    if !existing.is_empty() && policy == ConflictResolution::Ask {
        if prompter.is_interactive() {
            policy = prompter.ask_conflict_resolution(&existing)?;
            tracing::debug!(%policy, "run-wide conflict policy chosen");
        } else {
            prompter.warn(&format!(
                "{} existing file(s) left untouched, use --force to overwrite",
                existing.len()
            ));
        }
    }

    let existing: HashSet<String> = existing.into_iter().collect();
    let mut result = RunResult::default();

    for file in files {
        let disposition = if existing.contains(&file.path) {
            if target_path(&config.output_dir, &file.path).is_dir() {
                prompter.warn(&format!(
                    "{} is a directory, remove it to generate this file",
                    file.path
                ));
                Disposition::Skip
            } else {
                resolve_conflict(&file.path, policy, prompter)?
            }
        } else {
            Disposition::Create
        };
        tracing::debug!(path = %file.path, ?disposition, "resolved");

        if !disposition.is_write() {
            prompter.file_skipped(&file.path);
            result.skipped.push(file.path);
            continue;
        }

        write_file(&config.output_dir, &file).await?;

        let replaced = disposition == Disposition::Overwrite;
        prompter.file_written(&file.path, replaced);
        if replaced {
            result.replaced.push(file.path.clone());
        }
        result.written.push(file.path);
    }

    if result.written.iter().any(|p| p == EXECUTABLE_ENTRY_POINT) {
        make_executable(&config.output_dir.join(EXECUTABLE_ENTRY_POINT)).await?;
    }

    Ok(result)
}

fn resolve_conflict<P: Prompter + ?Sized>(
    path: &str,
    policy: ConflictResolution,
    prompter: &P,
) -> Result<Disposition> {
    let overwrite = match policy {
        ConflictResolution::Replace => true,
        ConflictResolution::Skip => false,
        ConflictResolution::Ask => prompter.is_interactive() && prompter.ask_single_file(path)?,
    };
    Ok(if overwrite {
        Disposition::Overwrite
    } else {
        Disposition::Skip
    })
}

fn target_path(output_dir: &Path, path: &str) -> PathBuf {
    output_dir.join(path.trim_start_matches('/'))
}

async fn write_file(output_dir: &Path, file: &GeneratedFile) -> Result<()> {
    let target = target_path(output_dir, &file.path);

    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ScaffoldError::io("create directory", parent, e))?;
    }

    tokio::fs::write(&target, &file.content)
        .await
        .map_err(|e| ScaffoldError::io("write", &target, e))
}

#[cfg(unix)]
async fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .await
        .map_err(|e| ScaffoldError::io("set permissions on", path, e))
}

#[cfg(not(unix))]
async fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Everything the `init` command needs
#[derive(Debug, Clone, Default)]
pub struct InitRequest {
    /// Values given on the command line
    pub options: InitOptions,
    /// YAML preset filling the gaps the command line leaves
    pub preset: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub force: bool,
    pub skip_existing: bool,
    pub template_source: TemplateSource,
}

/// The configuration a run used and what it did
#[derive(Debug, Clone)]
pub struct InitOutcome {
    pub config: Configuration,
    pub result: RunResult,
}

/// The `init` workflow: build the configuration, let the user amend it,
/// apply the override flags, then render and write every selected file.
pub async fn init<P: Prompter + ?Sized>(
    request: InitRequest,
    prompter: &P,
    cli_version: &str,
) -> Result<InitOutcome> {
    let output_dir = resolve_output_dir(&request.output_dir)?;

    let options = match &request.preset {
        Some(path) => request.options.or(InitOptions::load(path)?),
        None => request.options,
    };
    let seed = options.into_configuration(output_dir)?;

    let gathered = if prompter.is_interactive() {
        prompter.gather_configuration(seed)?
    } else {
        seed
    };
    let policy = ConflictResolution::effective(
        gathered.conflict_resolution,
        request.force,
        request.skip_existing,
    );
    let config = gathered.with_conflict_resolution(policy);
    tracing::debug!(?config, "configuration");

    let renderer = TemplateRenderer::from_source(&request.template_source)?;
    if let Some(manifest) = renderer.manifest() {
        if let Some(warning) = check_compatibility(cli_version, &manifest.version, UPGRADE_COMMAND)
        {
            tracing::warn!(template = %manifest.name, version = %manifest.version, "template version mismatch");
            prompter.warn(&warning);
        }
    }

    let generators = registry(&renderer);
    let result = run(&config, &generators, prompter).await?;

    Ok(InitOutcome { config, result })
}

fn resolve_output_dir(dir: &Path) -> Result<PathBuf> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };
    if let Ok(canonical) = std::fs::canonicalize(dir) {
        return Ok(canonical);
    }
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| ScaffoldError::io("read current directory", ".", e))?;
    Ok(cwd.join(dir))
}

/// Every generator with the paths it can produce, in registration order
pub fn list_targets() -> Vec<(GeneratorKind, &'static [&'static str])> {
    GeneratorKind::ALL
        .into_iter()
        .map(|kind| (kind, kind.target_files()))
        .collect()
}
