/*
[INPUT]:  CLI arguments, YAML configuration file, TASK_CLONER__* environment overrides
[OUTPUT]: Terminal UI session or headless import/clone output
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or logging setup
*/

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

use task_cloner::config::{LoggingConfig, default_config_path};
use task_cloner::platform::{SystemClipboard, SystemOpener};
use task_cloner::{ClonerConfig, FlowController, Notices};

mod cli;
mod tui;

const LOG_FILE_PREFIX: &str = "task-cloner.log";

#[derive(Parser, Debug)]
#[command(name = "task-cloner", version, about = "Import a JIRA task, edit a copy, and create the clone")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    /// Overrides `logging.level` from the config file
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    log_level: Option<String>,
    /// Validate configuration and exit
    #[arg(long = "dry-run", global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a configuration file interactively
    Init {
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Import a task and print it as JSON
    Import {
        #[arg(value_name = "TASK_ID")]
        task_id: String,
    },
    /// Import a task, build the clone draft, and create it
    Clone {
        #[arg(value_name = "TASK_ID")]
        task_id: String,
        /// Replace the default "Clone - <summary>" summary
        #[arg(long, value_name = "SUMMARY")]
        summary: Option<String>,
        /// Leave the original's attachments out of the clone
        #[arg(long = "no-attachments")]
        no_attachments: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Command::Init { output }) = &args.command {
        let output = output
            .clone()
            .or_else(|| args.config_path.clone())
            .or_else(default_config_path)
            .context("no config directory available; pass --output")?;
        return cli::init::run_init(output);
    }

    let config = load_config(args.config_path.as_deref())?;
    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());

    if args.dry_run {
        init_tracing(&log_level)?;
        info!(
            mode = ?config.backend.mode,
            settle_delay_ms = config.flow.settle_delay_ms,
            "dry-run requested; configuration validated"
        );
        config.build_backend().context("build backend")?;
        println!("configuration OK (backend: {:?})", config.backend.mode);
        return Ok(());
    }

    match args.command {
        Some(Command::Import { task_id }) => {
            init_tracing(&log_level)?;
            let flow = build_flow(&config)?;
            cli::headless::run_import(&flow, &task_id).await
        }
        Some(Command::Clone {
            task_id,
            summary,
            no_attachments,
        }) => {
            init_tracing(&log_level)?;
            let flow = build_flow(&config)?;
            cli::headless::run_clone(&flow, &task_id, summary.as_deref(), !no_attachments).await
        }
        Some(Command::Init { .. }) => Ok(()),
        None => run_ui(&config, &log_level).await,
    }
}

async fn run_ui(config: &ClonerConfig, log_level: &str) -> Result<()> {
    let log_buffer = tui::LogBuffer::handle(tui::LOG_BUFFER_CAPACITY);
    let _file_guard = init_tui_tracing(log_level, &config.logging, log_buffer.clone())?;
    info!(mode = ?config.backend.mode, "starting task-cloner");

    let flow = build_flow(config)?;
    tui::run_tui(
        flow,
        log_buffer,
        Arc::new(SystemClipboard::new()),
        Arc::new(SystemOpener),
    )
    .await
}

fn build_flow(config: &ClonerConfig) -> Result<FlowController> {
    let backend = config.build_backend().context("build backend")?;
    Ok(FlowController::new(backend, Notices::new(config.notice_ttl()))
        .with_settle_delay(config.settle_delay()))
}

fn load_config(path: Option<&Path>) -> Result<ClonerConfig> {
    ClonerConfig::load(path).with_context(|| match path {
        Some(path) => format!("load config from {}", path.display()),
        None => "load config".to_string(),
    })
}

/// Logs go to stderr so stdout stays clean for JSON output.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

/// The terminal owns stdout, so UI logs land in the Logs tab and, when
/// configured, a daily-rolling file.
fn init_tui_tracing(
    log_level: &str,
    logging: &LoggingConfig,
    buffer: tui::LogBufferHandle,
) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    let buffer_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(tui::LogWriterFactory::new(buffer));

    let (file_layer, guard) = match logging.file_dir.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    registry()
        .with(filter)
        .with(buffer_layer)
        .with(file_layer)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}
