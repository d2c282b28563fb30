//! Binary entrypoint for the GS1 scan driver.
//!
//! Logs go to stderr; stdout carries JSON (or CSV for `export`).
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use gs1_scan::config::{CONFIG_ENV, STORE_ENV};
use gs1_scan::{inspect, ScanContext, ScanSession, ScannerConfig};
use gs1_store::DEFAULT_COLUMNS;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gs1-scan")]
#[command(version, about = "Decode, classify and log GS1 barcode scans")]
struct Cli {
    /// Scanner config file
    #[arg(long, global = true, env = CONFIG_ENV)]
    config: Option<PathBuf>,

    /// Record store (JSON file)
    #[arg(long, global = true, env = STORE_ENV)]
    store: Option<PathBuf>,

    /// Assign every scan to this provider instead of classifying
    #[arg(long, global = true)]
    provider: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process scans from arguments, or one per stdin line
    Scan { text: Vec<String> },

    /// Print stored records
    List,

    /// Delete the record at INDEX
    Remove { index: usize },

    /// Write stored records as CSV
    Export {
        /// AI columns, comma-separated
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
    },

    /// Decode and classify one scan without storing it
    Inspect { text: String },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ScannerConfig::resolve(cli.config.as_deref())
        .context("loading scanner config")?
        .with_store_path(cli.store)
        .with_provider(cli.provider);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Scan { text } => {
            let mut session = open_session(&config)?;
            if text.is_empty() {
                for line in std::io::stdin().lock().lines() {
                    let line = line.context("reading stdin")?;
                    if line.is_empty() {
                        continue;
                    }
                    scan_one(&mut session, &line, &mut out)?;
                }
            } else {
                for raw in &text {
                    scan_one(&mut session, raw, &mut out)?;
                }
            }
        }
        Command::List => {
            let session = open_session(&config)?;
            serde_json::to_writer_pretty(&mut out, session.records())?;
            writeln!(out)?;
        }
        Command::Remove { index } => {
            let mut session = open_session(&config)?;
            let removed = session
                .remove(index)
                .with_context(|| format!("removing record {}", index))?;
            serde_json::to_writer(&mut out, &removed)?;
            writeln!(out)?;
        }
        Command::Export { columns } => {
            let session = open_session(&config)?;
            let table = if columns.is_empty() {
                session.export(DEFAULT_COLUMNS)
            } else {
                session.export(columns.as_slice())
            };
            table.write_csv(&mut out).context("writing CSV")?;
        }
        Command::Inspect { text } => {
            let registry = config.build_registry()?;
            let rules = config.load_rules()?;
            let selection = config.selection();
            let ctx = ScanContext::new(Utc::now(), &registry, &rules).with_selection(&selection);

            serde_json::to_writer_pretty(&mut out, &inspect(&text, &ctx))?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn open_session(config: &ScannerConfig) -> Result<ScanSession> {
    config
        .open_session()
        .with_context(|| format!("opening store {}", config.store_path.display()))
}

fn scan_one(session: &mut ScanSession, raw: &str, out: &mut impl Write) -> Result<()> {
    let outcome = session
        .handle(raw, Utc::now())
        .context("saving scan")?;
    serde_json::to_writer(&mut *out, &outcome)?;
    writeln!(out)?;
    Ok(())
}
