//! # DueWatch
//!
//! Due-date notification worker. Reads expiration records from a
//! document store, emails a reminder for every record due today or
//! tomorrow (UTC), and reports each record's outcome.
//!
//! Usage:
//!   duewatch run                 # one pipeline run, report on stdout
//!   duewatch serve               # HTTP gateway + scheduled trigger
//!   duewatch --config cfg.toml serve

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use duewatch_core::DuewatchConfig;
use duewatch_gateway::AppState;
use duewatch_mailer::EmailJsMailer;
use duewatch_pipeline::NotificationPipeline;
use duewatch_store::RestRecordSource;

#[derive(Parser)]
#[command(name = "duewatch", version, about = "⏳ DueWatch — due-date notification worker")]
struct Cli {
    /// Config file path (default: ~/.duewatch/config.toml)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the pipeline once and print the report.
    Run,
    /// Start the HTTP gateway and the scheduled trigger (default).
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => DuewatchConfig::load_from(path)?,
        None => DuewatchConfig::load()?,
    };

    let pipeline = Arc::new(NotificationPipeline::new(
        Arc::new(RestRecordSource::new(config.store.clone())),
        Arc::new(EmailJsMailer::new(config.mailer.clone())),
    ));
    let run_deadline = Duration::from_secs(config.scheduler.run_timeout_secs.max(1));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Run => {
            let report = pipeline.run_with_deadline(run_deadline).await?;
            println!("{report}");
            Ok(())
        }
        Command::Serve => {
            if config.scheduler.enabled {
                let scheduler_pipeline = pipeline.clone();
                let scheduler_config = config.scheduler.clone();
                tokio::spawn(async move {
                    duewatch_scheduler::run_scheduler(scheduler_pipeline, scheduler_config).await;
                });
            } else {
                tracing::info!("Scheduler disabled; on-demand runs only");
            }

            duewatch_gateway::serve(
                &config.gateway,
                AppState {
                    pipeline,
                    run_deadline,
                },
            )
            .await?;
            Ok(())
        }
    }
}
