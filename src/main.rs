use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use logcast::{CodecConfig, CodecSettings};

#[derive(Parser)]
#[command(name = "logcast", about = "Decode JSON log lines into typed records and re-encode them")]
struct Cli {
    /// TOML settings file (field names, path rules, flattening).
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Merge dotted field names one level deep before encoding.
    #[arg(long)]
    unflatten: bool,

    /// Log at debug level to stderr (RUST_LOG overrides).
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let settings = match &cli.config {
        Some(path) => CodecSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => CodecSettings::default(),
    };
    let config = CodecConfig::new(settings);
    tracing::debug!(rules = config.rules().len(), "settings loaded");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for (lineno, line) in stdin.lock().lines().enumerate() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let mut record = logcast::decode(&line, &config);
        if cli.unflatten {
            if let Err(err) = record.unflatten() {
                tracing::warn!(line = lineno + 1, error = %err, "unflatten failed, fields kept as-is");
            }
        }

        match logcast::encode(&record, &config) {
            Ok(bytes) => {
                stdout.write_all(&bytes)?;
                stdout.write_all(b"\n")?;
            }
            Err(err) => tracing::warn!(line = lineno + 1, error = %err, "dropping record"),
        }
    }
    stdout.flush()?;
    Ok(())
}
