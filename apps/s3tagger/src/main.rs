//! s3tagger - audit and bulk-apply S3 bucket tags in one region.
//!
//! # Usage
//!
//! ```text
//! s3tagger read --tags env,team --output tags.csv
//! s3tagger write --input tags.csv
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AWS_REGION` / `DEFAULT_REGION` | `us-east-1` | Target region |
//! | `S3_ENDPOINT_URL` | *(unset)* | Custom S3 endpoint |
//! | `S3_FORCE_PATH_STYLE` | `false` | Path-style addressing |
//! | `TAGGER_ON_REGION_NOT_FOUND` | `abort` | `abort` or `continue` |
//! | `TAGGER_ON_WRITE_ERROR` | `abort` | `abort` or `continue` |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//!
//! Credentials come from the standard AWS provider chain.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use s3tagger_aws::AwsStorageClient;
use s3tagger_core::TaggerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber, writing to stderr.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = TaggerConfig::from_env().context("invalid environment configuration")?;
    cli.apply(&mut config);

    init_tracing(&config.log_level)?;

    info!(
        region = %config.region,
        endpoint_url = ?config.endpoint_url,
        on_region_not_found = %config.on_region_not_found,
        on_write_error = %config.on_write_error,
        version = VERSION,
        "starting s3tagger",
    );

    let client = AwsStorageClient::from_env(&config).await;

    match &cli.command {
        Command::Read { tags, output } => {
            cli::run_read(&client, &config, tags, output.as_deref()).await
        }
        Command::Write { input } => cli::run_write(&client, &config, input).await,
    }
}
