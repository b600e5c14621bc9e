//! fdbstat CLI
//!
//! Fetches the cluster status document once and prints one metric line per
//! numeric leaf to stdout.
//!
//! # Usage
//!
//! ```bash
//! fdbstat /etc/foundationdb/fdb.cluster
//! fdbstat --prefix fdb --fdbcli /usr/bin/fdbcli /etc/foundationdb/fdb.cluster
//! fdbcli --exec "status json" | fdbstat --input -
//! ```

#![deny(unsafe_code)]

use clap::Parser;
use shared::config::TransformConfig;
use shared::provider::{FdbcliProvider, FileProvider, StatusProvider};
use shared::transform::{status_to_lines, TransformError};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code used when no status source was given.
const EXIT_USAGE: u8 = 1;

/// fdbstat - cluster status to telemetry metric lines
#[derive(Parser, Debug)]
#[command(name = "fdbstat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cluster file passed to fdbcli
    cluster_file: Option<PathBuf>,

    /// fdbcli program to run
    #[arg(long, env = "FDBSTAT_FDBCLI", default_value = "fdbcli")]
    fdbcli: PathBuf,

    /// Read a saved status document instead of running fdbcli (`-` for stdin)
    #[arg(short, long, env = "FDBSTAT_INPUT")]
    input: Option<PathBuf>,

    /// Prefix prepended to every measurement path
    #[arg(short, long, env = "FDBSTAT_PREFIX")]
    prefix: Option<String>,

    /// Emit boolean leaves as 1/0 fields
    #[arg(long, env = "FDBSTAT_BOOLEANS_AS_FIELDS")]
    booleans_as_fields: bool,
}

impl Cli {
    fn provider(&self) -> Option<Box<dyn StatusProvider>> {
        if let Some(input) = &self.input {
            return Some(Box::new(FileProvider::new(input)));
        }
        self.cluster_file.as_ref().map(|cluster_file| {
            Box::new(FdbcliProvider::new(cluster_file).with_program(&self.fdbcli))
                as Box<dyn StatusProvider>
        })
    }

    fn transform_config(&self) -> TransformConfig {
        let config = TransformConfig::new().with_booleans_as_fields(self.booleans_as_fields);
        match &self.prefix {
            Some(prefix) => config.with_prefix(prefix),
            None => config,
        }
    }
}

/// Runs one status pass, writing metric lines to `out`.
///
/// Returns the process exit code. Decode and shape failures end the pass
/// without output and still exit successfully; provider failures are errors.
fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<u8> {
    let Some(provider) = cli.provider() else {
        return Ok(EXIT_USAGE);
    };

    let raw = provider.fetch()?;

    match status_to_lines(&raw, &cli.transform_config()) {
        Ok(lines) => {
            for line in &lines {
                writeln!(out, "{line}")?;
            }
            out.flush()?;
        }
        Err(TransformError::Decode(e)) => {
            tracing::debug!(error = %e, "Status output is not valid JSON, skipping");
        }
        Err(e @ TransformError::Shape(_)) => {
            tracing::error!(error = %e, "Failed to transform status document");
        }
    }

    Ok(0)
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let code = run(&cli, &mut out)?;
    Ok(ExitCode::from(code))
}
