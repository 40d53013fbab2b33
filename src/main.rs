//! formaudit - structural and semantic audits for HTML forms
//!
//! Main entry point for the formaudit CLI.

mod cli;
mod output;

use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use formaudit_capture::{capture_snapshot, parse_snapshot};
use formaudit_config::{Config, ConfigLoader, ConfigValidator, LoggingSettings};
use formaudit_core::audits::AuditRegistry;
use formaudit_core::{AuditReport, AuditRunner, AuditType, Suggesters};
use formaudit_protocols::TreeNode;

use cli::{Cli, Commands, OutputFormat};

/// Initialize tracing with console output and, when `logging.dir` is set, a
/// daily rolling log file.
fn init_tracing(logging: &LoggingSettings) -> anyhow::Result<()> {
    let file_layer: Option<Box<dyn Layer<Registry> + Send + Sync>> = match logging.dir_path() {
        Some(log_dir) => {
            std::fs::create_dir_all(&log_dir)
                .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("formaudit")
                .filename_suffix("log")
                .max_log_files(30)
                .build(&log_dir)
                .context("Failed to create log file appender")?;

            // Dropping the guard stops the background writer.
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            static GUARD: OnceLock<WorkerGuard> = OnceLock::new();
            let _ = GUARD.set(guard);

            let layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
            Some(if logging.json {
                layer.json().boxed()
            } else {
                layer.boxed()
            })
        }
        None => None,
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("Invalid log level '{}'", logging.level))?;

    tracing_subscriber::registry()
        .with(file_layer)
        .with(env_filter)
        // Console goes to stderr; stdout carries the report.
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    Ok(())
}

/// Read a file, or stdin for `-`.
fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Load the configuration and refuse to run on validation errors.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = ConfigLoader::load_or_default(path).context("Failed to load configuration")?;
    let validation = ConfigValidator::validate(&config)?;
    if let Some(error) = validation.errors.first() {
        bail!("Invalid configuration: {}: {}", error.path, error.message);
    }
    Ok(config)
}

fn build_runner(config: &Config, extra_disabled: &[String]) -> anyhow::Result<AuditRunner> {
    let extra = extra_disabled
        .iter()
        .map(|id| id.parse::<AuditType>().map_err(anyhow::Error::msg))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(AuditRunner::new(
        AuditRegistry::default(),
        Suggesters::new(config.suggestions.thresholds()),
    )
    .with_disabled(config.audits.disabled_types())
    .with_disabled(extra))
}

fn audit_tree(runner: &AuditRunner, root: &TreeNode, format: OutputFormat) -> anyhow::Result<()> {
    let (tree, results) = runner.audit(root);
    let score = output::score(runner.enabled_count(), &results);
    info!(
        "Audited {} nodes with {} audits: {} diagnostic(s), score {}",
        tree.len(),
        runner.enabled_count(),
        results.len(),
        score
    );

    let report = AuditReport::render(&tree, &results, score);
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{json}");
        }
        OutputFormat::Text => print!("{}", output::render_text(&report)),
    }
    Ok(())
}

fn cmd_audit(
    config: &Config,
    input: &Path,
    format: OutputFormat,
    disabled: &[String],
) -> anyhow::Result<()> {
    let content = read_input(input)?;
    let root: TreeNode = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a valid tree", input.display()))?;
    let runner = build_runner(config, disabled)?;
    audit_tree(&runner, &root, format)
}

async fn cmd_capture(
    config: &Config,
    input: &Path,
    audit: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let content = read_input(input)?;
    let snapshot = parse_snapshot(&content)
        .with_context(|| format!("{} is not a valid DOM snapshot", input.display()))?;
    let capture_config = config.capture.to_capture_config()?;
    let root = capture_snapshot(snapshot, &capture_config)
        .await
        .context("Failed to capture snapshot")?;
    debug!("Captured {} nodes", root.count());

    if audit {
        let runner = build_runner(config, &[])?;
        return audit_tree(&runner, &root, format);
    }
    let json = serde_json::to_string_pretty(&root).context("Failed to serialize tree")?;
    println!("{json}");
    Ok(())
}

/// Load config, start logging and surface config warnings.
fn start(config_path: Option<&Path>) -> anyhow::Result<Config> {
    let config = load_config(config_path)?;
    init_tracing(&config.logging)?;

    for warning in ConfigValidator::validate(&config)?.warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    Ok(config)
}

/// Print validation findings and fail on errors.
fn check_config(path: Option<&Path>) -> anyhow::Result<()> {
    let source = match path {
        Some(path) => path.display().to_string(),
        None => match ConfigLoader::default_path() {
            Some(path) if path.exists() => path.display().to_string(),
            _ => "built-in defaults".to_string(),
        },
    };
    let config = ConfigLoader::load_or_default(path).context("Failed to load configuration")?;
    let validation = ConfigValidator::validate(&config)?;

    println!("Checked {source}");
    for warning in &validation.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &validation.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    if !validation.is_valid() {
        bail!("{} configuration error(s)", validation.errors.len());
    }
    println!("Configuration is valid");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Audit {
            input,
            format,
            disabled,
        } => {
            let config = start(config_path)?;
            cmd_audit(&config, &input, format, &disabled)
        }
        Commands::Capture {
            input,
            audit,
            format,
        } => {
            let config = start(config_path)?;
            cmd_capture(&config, &input, audit, format).await
        }
        Commands::CheckConfig => check_config(config_path),
    }
}
