//! Command-line arguments and the two subcommand runners.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use s3tagger_core::{AwsRegion, ErrorPolicy, StorageClient, Table, TaggerConfig};
use tracing::info;

/// Audit and bulk-apply S3 bucket tags in one region.
#[derive(Debug, Parser)]
#[command(name = "s3tagger", version, about)]
pub struct Cli {
    /// Target region (overrides `AWS_REGION` / `DEFAULT_REGION`).
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Custom S3 endpoint URL (overrides `S3_ENDPOINT_URL`).
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing (overrides `S3_FORCE_PATH_STYLE`);
    /// `--force-path-style=false` turns it off.
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub force_path_style: Option<bool>,

    /// `abort` or `continue` when a listed bucket turns out not to exist.
    #[arg(long, global = true)]
    pub on_region_not_found: Option<ErrorPolicy>,

    /// `abort` or `continue` when fetching or writing a bucket's tags fails.
    #[arg(long, global = true)]
    pub on_write_error: Option<ErrorPolicy>,

    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read tags from every bucket in the region into CSV.
    Read {
        /// Comma-separated tag keys to read, e.g. `env,team`.
        #[arg(short, long)]
        tags: String,

        /// Output file; stdout if omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Merge tags from a CSV file into the listed buckets.
    Write {
        /// CSV file: bucket names in column 0, tag keys in row 0.
        #[arg(short, long)]
        input: PathBuf,
    },
}

impl Cli {
    /// Layer command-line flags over `config`.
    pub fn apply(&self, config: &mut TaggerConfig) {
        if let Some(region) = &self.region {
            config.region = AwsRegion::new(region.clone());
        }
        if let Some(endpoint) = &self.endpoint_url {
            config.endpoint_url = Some(endpoint.clone());
        }
        if let Some(force) = self.force_path_style {
            config.force_path_style = force;
        }
        if let Some(policy) = self.on_region_not_found {
            config.on_region_not_found = policy;
        }
        if let Some(policy) = self.on_write_error {
            config.on_write_error = policy;
        }
    }
}

/// Read `tags` from every bucket in the target region and write CSV.
pub async fn run_read<C>(
    client: &C,
    config: &TaggerConfig,
    tags: &str,
    output: Option<&Path>,
) -> Result<()>
where
    C: StorageClient + ?Sized,
{
    let table = s3tagger_core::read_tags(client, tags, config).await?;
    info!(
        rows = table.data_rows().len(),
        region = %config.region,
        "read bucket tags"
    );

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            table.write_csv(BufWriter::new(file))?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            table.write_csv(&mut lock)?;
            lock.flush()?;
        }
    }

    Ok(())
}

/// Apply the CSV at `input` to its buckets.
pub async fn run_write<C>(client: &C, config: &TaggerConfig, input: &Path) -> Result<()>
where
    C: StorageClient + ?Sized,
{
    let file = File::open(input).with_context(|| format!("cannot open {}", input.display()))?;
    let table = Table::read_csv(BufReader::new(file))
        .with_context(|| format!("cannot load table from {}", input.display()))?;

    let summary = s3tagger_core::write_tags(client, &table, config).await;
    info!(
        applied = summary.applied,
        failed = summary.failed.len(),
        aborted = summary.aborted,
        "write finished"
    );

    if !summary.failed.is_empty() {
        bail!(
            "failed to tag {} bucket(s): {}",
            summary.failed.len(),
            summary.failed.join(", ")
        );
    }
    Ok(())
}
