mod clipboard;
mod commands;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Parser;
use textpad_config::EditorConfig;
use textpad_core::document::Document;
use textpad_core::fonts::{FixedWidthMetrics, FontMetricsProvider, TtfMetrics};
use textpad_core::persistence::FsPersistence;

use crate::commands::Session;

/// A plain-text editor driven by commands on standard input.
#[derive(Parser, Debug)]
#[command(name = "textpad", version, about)]
struct Cli {
    /// File to edit. Created on first save if it does not exist.
    file: PathBuf,

    /// Config file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Metrics from the configured font file, or fixed-width metrics if there is
/// none or it cannot be loaded.
fn load_metrics(config: &EditorConfig) -> Box<dyn FontMetricsProvider> {
    let Some(path) = config.font_file() else {
        return Box::new(FixedWidthMetrics::default());
    };
    match TtfMetrics::open(&path) {
        Ok(metrics) => Box::new(metrics),
        Err(e) => {
            tracing::warn!("{e:#}; falling back to fixed-width metrics");
            Box::new(FixedWidthMetrics::default())
        }
    }
}

fn open_document(path: &Path, config: &EditorConfig) -> Result<Document> {
    if path.is_dir() {
        bail!("{} is a directory", path.display());
    }
    let doc = Document::open(
        path,
        &FsPersistence,
        config.layout_config(),
        load_metrics(config),
    )?
    .with_history_config(config.history_config())
    .with_font_size_policy(config.font_size_policy());
    Ok(doc)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting textpad");

    let config_path = cli.config.unwrap_or_else(EditorConfig::config_path);
    let config = EditorConfig::load_or_create(&config_path);
    let doc = open_document(&cli.file, &config)?;
    tracing::info!(
        path = %cli.file.display(),
        glyphs = doc.len(),
        lines = doc.layout().total_lines(),
        "opened document"
    );

    let mut session = Session::new(doc, clipboard::host_clipboard(), FsPersistence);
    commands::run(&mut session, std::io::stdin().lock(), std::io::stdout().lock())
}
