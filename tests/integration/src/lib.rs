//! Integration tests for s3tagger.
//!
//! These tests require a running S3-compatible server (LocalStack, RustStack,
//! MinIO) at `localhost:4566`. They are marked `#[ignore]` so they don't run
//! during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p s3tagger-integration -- --ignored
//! ```

use std::sync::Once;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use s3tagger_aws::AwsStorageClient;
use s3tagger_core::{AwsRegion, TaggerConfig};

static INIT: Once = Once::new();

/// Region every test bucket is created in.
pub const TEST_REGION: &str = "us-east-1";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint URL for the server.
fn endpoint_url() -> String {
    std::env::var("S3_ENDPOINT_URL").unwrap_or_else(|_| "http://localhost:4566".to_owned())
}

/// Create a configured S3 client pointing at the local server.
#[must_use]
pub fn s3_client() -> aws_sdk_s3::Client {
    init_tracing();

    let creds = Credentials::new("test", "test", None, None, "integration-test");

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new(TEST_REGION))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url())
        .force_path_style(true)
        .build();

    aws_sdk_s3::Client::from_conf(config)
}

/// Wrap the raw client in the storage client under test.
#[must_use]
pub fn storage_client() -> AwsStorageClient {
    AwsStorageClient::from_client(s3_client())
}

/// Tagger configuration targeting [`TEST_REGION`].
#[must_use]
pub fn tagger_config() -> TaggerConfig {
    TaggerConfig::builder()
        .region(AwsRegion::new(TEST_REGION))
        .endpoint_url(endpoint_url())
        .force_path_style(true)
        .build()
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a bucket and return its name. Caller is responsible for cleanup.
pub async fn create_test_bucket(client: &aws_sdk_s3::Client, prefix: &str) -> String {
    let name = test_bucket_name(prefix);
    client
        .create_bucket()
        .bucket(&name)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));
    name
}

/// Delete a (tag-only, object-free) test bucket.
pub async fn cleanup_bucket(client: &aws_sdk_s3::Client, bucket: &str) {
    let _ = client.delete_bucket_tagging().bucket(bucket).send().await;
    let _ = client.delete_bucket().bucket(bucket).send().await;
}

mod test_client;
mod test_tagging;
