//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use folio_core::pipeline::{ExportConfig, ExportResult, ProgressReporter};
use folio_lint::{LintOptions, LintReport};
use folio_shared::{AppConfig, FolioError, Voice, init_config, load_config, load_config_from};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Folio: publish-safe exports of a private career repository.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Export sanitized, voice-normalized portfolio payloads and lint them before publishing.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.folio/folio.toml.
    #[arg(long, env = "FOLIO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Export publish-safe payloads from a career repository.
    Export {
        /// Career repository root (holds career.json and projects/).
        #[arg(long)]
        root: PathBuf,

        /// Voice for selected content: first_person or third_person.
        #[arg(long)]
        voice: Option<Voice>,

        /// Output directory, relative to --root unless absolute.
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Name used for third-person rewriting.
        #[arg(long, env = "FOLIO_DISPLAY_NAME")]
        display_name: Option<String>,

        /// Run the publish lint gate over the output afterwards.
        #[arg(long)]
        lint: bool,
    },

    /// Lint payloads for blocked tokens.
    Lint {
        /// File or directory to lint.
        #[arg(long)]
        path: PathBuf,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "folio=info",
        1 => "folio=debug",
        _ => "folio=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config;
    match cli.command {
        Command::Export {
            root,
            voice,
            out_dir,
            display_name,
            lint,
        } => {
            let config = app_config(config_path.as_deref())?;
            let export = resolve_export_config(&config, root, voice, out_dir, display_name)?;
            cmd_export(&config, &export, lint).await
        }
        Command::Lint { path } => {
            let config = app_config(config_path.as_deref())?;
            cmd_lint(&config, &path)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path.as_deref()),
        },
    }
}

fn app_config(path: Option<&Path>) -> Result<AppConfig> {
    Ok(match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    })
}

/// Merge flags over the config file. Flags win.
fn resolve_export_config(
    config: &AppConfig,
    root: PathBuf,
    voice: Option<Voice>,
    out_dir: Option<PathBuf>,
    display_name: Option<String>,
) -> Result<ExportConfig> {
    let display_name = display_name
        .or_else(|| config.export.display_name.clone())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            eyre!("no display name: pass --display-name or set export.display_name in the config file")
        })?;

    Ok(ExportConfig {
        root,
        out_dir: out_dir.unwrap_or_else(|| PathBuf::from(&config.export.out_dir)),
        voice: voice.unwrap_or(config.export.voice),
        display_name,
    })
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_export(config: &AppConfig, export: &ExportConfig, lint: bool) -> Result<ExitCode> {
    info!(
        root = %export.root.display(),
        voice = %export.voice,
        "exporting career repository"
    );

    let reporter = CliProgress::new();
    let result = run_export(export, &reporter).await?;

    println!();
    println!("  Export complete!");
    println!("  Voice:    {}", result.index.voice);
    println!("  Projects: {}", result.projects.len());
    println!("  Output:   {}", result.out_dir.display());
    println!("  Time:     {:.1}s", result.elapsed.as_secs_f64());
    println!();

    if lint {
        return cmd_lint(config, &result.out_dir);
    }
    Ok(ExitCode::SUCCESS)
}

/// Run the export, clearing the spinner whether or not it succeeds.
async fn run_export(export: &ExportConfig, reporter: &CliProgress) -> Result<ExportResult> {
    folio_core::export_site(export, reporter)
        .await
        .inspect_err(|_| reporter.spinner.finish_and_clear())
        .map_err(Into::into)
}

fn cmd_lint(config: &AppConfig, path: &Path) -> Result<ExitCode> {
    let options = LintOptions::from(&config.lint);
    match folio_lint::lint_path(path, &options) {
        Ok(report) => Ok(print_report(&report)),
        Err(e @ FolioError::NothingToScan { .. }) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_report(report: &LintReport) -> ExitCode {
    println!("{report}");
    if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_config_init() -> Result<ExitCode> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(ExitCode::SUCCESS)
}

fn cmd_config_show(path: Option<&Path>) -> Result<ExitCode> {
    let config = app_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(ExitCode::SUCCESS)
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn project_exported(&self, slug: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("[{current}/{total}] {slug}"));
    }

    fn done(&self, _result: &ExportResult) {
        self.spinner.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn export_flags_parse() {
        let cli = Cli::try_parse_from([
            "folio",
            "export",
            "--root",
            "/career",
            "--voice",
            "third_person",
            "--display-name",
            "Jane Doe",
            "--lint",
        ])
        .unwrap();
        match cli.command {
            Command::Export {
                voice, lint, root, ..
            } => {
                assert_eq!(voice, Some(Voice::ThirdPerson));
                assert!(lint);
                assert_eq!(root, PathBuf::from("/career"));
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn unknown_voice_is_rejected() {
        let parsed = Cli::try_parse_from(["folio", "export", "--root", ".", "--voice", "royal_we"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let mut config = AppConfig::default();
        config.export.display_name = Some("Config Name".into());
        config.export.voice = Voice::ThirdPerson;

        let export = resolve_export_config(
            &config,
            PathBuf::from("/career"),
            None,
            None,
            Some("Flag Name".into()),
        )
        .unwrap();
        assert_eq!(export.display_name, "Flag Name");
        assert_eq!(export.voice, Voice::ThirdPerson);
        assert_eq!(export.out_dir, PathBuf::from("public_site"));

        let export =
            resolve_export_config(&config, PathBuf::from("/career"), None, None, None).unwrap();
        assert_eq!(export.display_name, "Config Name");
    }

    #[tokio::test]
    async fn failed_export_clears_the_spinner() {
        let export = ExportConfig {
            root: PathBuf::from("/career"),
            out_dir: PathBuf::from("public_site"),
            voice: Voice::FirstPerson,
            display_name: "MISSING".into(),
        };
        let reporter = CliProgress::new();
        assert!(run_export(&export, &reporter).await.is_err());
        assert!(reporter.spinner.is_finished());
    }

    #[test]
    fn missing_display_name_is_an_error() {
        let err = resolve_export_config(
            &AppConfig::default(),
            PathBuf::from("/career"),
            None,
            None,
            Some("   ".into()),
        )
        .unwrap_err();
        assert!(err.to_string().contains("display name"));
    }
}
