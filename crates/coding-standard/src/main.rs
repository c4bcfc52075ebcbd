//! Coding Standard CLI - scaffold PHP quality tooling into a project

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use coding_standard_core::report::{next_steps, summary};
use coding_standard_core::tui::{terminal_attached, ClackPrompter};
use coding_standard_core::{
    list_targets, CiProvider, DatabaseType, InitOptions, InitRequest,
    NonInteractive, PhpStanLevel, Prompter, TemplateSource,
};
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser, Debug)]
#[command(name = "coding-standard")]
#[command(about = "Scaffold coding-standard tooling (PHP-CS-Fixer, PHPStan, Rector, CI, DDEV) into a PHP project")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub init: CliInitArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate configuration files for the selected tools (default)
    Init(CliInitArgs),
    /// List every generator and the files it can produce
    List,
}

#[derive(ClapArgs, Debug)]
pub struct CliInitArgs {
    /// Project name (defaults to the output directory name)
    #[arg(long)]
    pub project_name: Option<String>,

    /// PHP version
    #[arg(long)]
    pub php_version: Option<String>,

    /// Symfony version, or "no" for a plain PHP project
    #[arg(long)]
    pub symfony: Option<String>,

    /// Include PHP-CS-Fixer
    #[arg(long, overrides_with = "no_php_cs_fixer")]
    pub php_cs_fixer: bool,
    #[arg(long, overrides_with = "php_cs_fixer", hide = true)]
    pub no_php_cs_fixer: bool,

    /// Include PHPStan
    #[arg(long, overrides_with = "no_phpstan")]
    pub phpstan: bool,
    #[arg(long, overrides_with = "phpstan", hide = true)]
    pub no_phpstan: bool,

    /// PHPStan level (0-9 or "max")
    #[arg(long)]
    pub phpstan_level: Option<PhpStanLevel>,

    /// Include Rector
    #[arg(long, overrides_with = "no_rector")]
    pub rector: bool,
    #[arg(long, overrides_with = "rector", hide = true)]
    pub no_rector: bool,

    /// Include PHPUnit configuration
    #[arg(long, overrides_with = "no_phpunit")]
    pub phpunit: bool,
    #[arg(long, overrides_with = "phpunit", hide = true)]
    pub no_phpunit: bool,

    /// CI provider
    #[arg(long, value_enum)]
    pub ci: Option<CiProvider>,

    /// Include DDEV configuration
    #[arg(long, overrides_with = "no_ddev")]
    pub ddev: bool,
    #[arg(long, overrides_with = "ddev", hide = true)]
    pub no_ddev: bool,

    /// Include Makefile
    #[arg(long, overrides_with = "no_makefile")]
    pub makefile: bool,
    #[arg(long, overrides_with = "makefile", hide = true)]
    pub no_makefile: bool,

    /// Database type (requires --database-version)
    #[arg(long, value_enum)]
    pub database: Option<DatabaseType>,

    /// Database version
    #[arg(long)]
    pub database_version: Option<String>,

    /// Source directory path
    #[arg(long)]
    pub src_path: Option<String>,

    /// Tests directory path
    #[arg(long)]
    pub tests_path: Option<String>,

    /// Overwrite existing files without asking
    #[arg(short, long)]
    pub force: bool,

    /// Skip existing files without asking
    #[arg(long)]
    pub skip_existing: bool,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Do not ask any question
    #[arg(short = 'n', long)]
    pub no_interaction: bool,

    /// Local directory with templates overriding the built-in ones
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// YAML preset providing defaults for any option not given on the command line
    #[arg(long = "config")]
    pub preset: Option<PathBuf>,
}

/// `--x` gives `Some(true)`, `--no-x` gives `Some(false)`, neither leaves it to the preset
fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl From<CliInitArgs> for InitRequest {
    fn from(args: CliInitArgs) -> Self {
        InitRequest {
            options: InitOptions {
                project_name: args.project_name,
                php_version: args.php_version,
                symfony: args.symfony,
                php_cs_fixer: toggle(args.php_cs_fixer, args.no_php_cs_fixer),
                phpstan: toggle(args.phpstan, args.no_phpstan),
                phpstan_level: args.phpstan_level,
                rector: toggle(args.rector, args.no_rector),
                phpunit: toggle(args.phpunit, args.no_phpunit),
                ci: args.ci,
                ddev: toggle(args.ddev, args.no_ddev),
                makefile: toggle(args.makefile, args.no_makefile),
                database: args.database,
                database_version: args.database_version,
                src_path: args.src_path,
                tests_path: args.tests_path,
                conflict_resolution: None,
            },
            preset: args.preset,
            output_dir: args.output_dir,
            force: args.force,
            skip_existing: args.skip_existing,
            template_source: TemplateSource::from_dir(args.template_dir),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

async fn run_init(args: CliInitArgs) -> Result<()> {
    let interactive = !args.no_interaction && terminal_attached();
    tracing::debug!(interactive, output_dir = %args.output_dir.display(), "starting init");
    let prompter: Box<dyn Prompter> = if interactive {
        Box::new(ClackPrompter::new())
    } else {
        Box::new(NonInteractive::new())
    };

    let outcome = coding_standard_core::init(args.into(), prompter.as_ref(), CLI_VERSION)
        .await
        .context("Failed to initialize coding standards")?;

    if outcome.result.is_empty() {
        prompter.warn("No tools or integrations selected, nothing to generate.");
        return Ok(());
    }

    prompter.outro(&summary(&outcome.result));

    let steps = next_steps(&outcome.config);
    if !steps.is_empty() {
        println!("\n{}", "Next steps".bold());
        for step in steps {
            println!("  {}", step);
        }
    }

    Ok(())
}

fn write_targets(out: &mut impl Write) -> io::Result<()> {
    for (kind, paths) in list_targets() {
        writeln!(out, "{} {}", kind.name().cyan().bold(), kind.description().dimmed())?;
        for path in paths {
            writeln!(out, "    {}", path)?;
        }
    }
    out.flush()
}

fn print_targets() -> Result<()> {
    match write_targets(&mut io::stdout().lock()) {
        // Reader went away (e.g. `| head`), nothing left to do
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("Failed to write generator list"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_tracing();
    let args = Args::parse();

    let result = match args.command {
        Some(Command::Init(init_args)) => run_init(init_args).await,
        Some(Command::List) => print_targets(),
        // No subcommand provided, default to init
        None => run_init(args.init).await,
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_flags_without_subcommand_mean_init() {
        let args = Args::parse_from(["coding-standard", "--no-rector", "--ci", "gitlab", "-n"]);
        assert!(args.command.is_none());

        let request: InitRequest = args.init.into();
        assert_eq!(request.options.rector, Some(false));
        assert_eq!(request.options.phpstan, None);
        assert_eq!(request.options.ci, Some(CiProvider::GitLab));
    }

    #[test]
    fn test_last_toggle_wins() {
        let args = Args::parse_from(["coding-standard", "init", "--ddev", "--no-ddev"]);
        let Some(Command::Init(init)) = args.command else {
            panic!("expected init subcommand");
        };
        assert_eq!(toggle(init.ddev, init.no_ddev), Some(false));
    }

    #[test]
    fn test_database_and_level_flags() {
        let args = Args::parse_from([
            "coding-standard",
            "--database",
            "postgresql",
            "--database-version",
            "16",
            "--phpstan-level",
            "max",
            "-o",
            "app",
            "--template-dir",
            "house-templates",
        ]);
        let request: InitRequest = args.init.into();

        assert_eq!(request.options.database, Some(DatabaseType::PostgreSql));
        assert_eq!(request.options.database_version.as_deref(), Some("16"));
        assert_eq!(request.options.phpstan_level, Some(PhpStanLevel::MAX));
        assert_eq!(request.output_dir, PathBuf::from("app"));
        assert!(matches!(request.template_source, TemplateSource::Local(ref dir) if dir == &PathBuf::from("house-templates")));
    }

    #[test]
    fn test_force_and_skip_flags() {
        let args = Args::parse_from(["coding-standard", "-f", "--skip-existing"]);
        let request: InitRequest = args.init.into();
        assert!(request.force);
        assert!(request.skip_existing);
    }

    #[test]
    fn test_list_writes_every_target() {
        let mut out = Vec::new();
        write_targets(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("tools/.gitignore"));
        assert!(text.contains(".php-cs-fixer.dist.php"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_list_into_closed_pipe_returns_error() {
        let err = write_targets(&mut ClosedPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
