//! [`StorageClient`] implementation backed by `aws-sdk-s3`.
//!
//! [`AwsStorageClient`] wraps a single [`aws_sdk_s3::Client`] and turns SDK
//! failures into [`StorageError`] variants by their S3 error code:
//!
//! | S3 error code | [`StorageError`] |
//! |---------------|------------------|
//! | `NoSuchBucket`, `NotFound`, bare HTTP 404 | `NoSuchBucket` |
//! | `NoSuchTagSet` | `NoSuchTagSet` |
//! | `AuthorizationHeaderMalformed` | `AuthorizationHeaderMalformed` |
//! | anything else, transport failures | `Service` |

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::types::{BucketLocationConstraint, Tagging};
use s3tagger_core::{AwsRegion, StorageClient, StorageError, Tag, TagSet, TaggerConfig};
use tracing::debug;

/// S3 storage client.
#[derive(Debug, Clone)]
pub struct AwsStorageClient {
    client: Client,
}

impl AwsStorageClient {
    /// Build a client from the default credential chain, targeting
    /// `config.region` and honouring a custom endpoint if one is set.
    pub async fn from_env(config: &TaggerConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.as_str().to_owned()))
            .load()
            .await;
        Self::new(&sdk_config, config)
    }

    /// Build a client from an already loaded SDK configuration.
    #[must_use]
    pub fn new(sdk_config: &SdkConfig, config: &TaggerConfig) -> Self {
        let mut builder = aws_sdk_s3::config::Builder::from(sdk_config)
            .region(Region::new(config.region.as_str().to_owned()))
            .force_path_style(config.force_path_style);
        if let Some(endpoint) = &config.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }

        Self {
            client: Client::from_conf(builder.build()),
        }
    }

    /// Wrap an existing S3 client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// The underlying S3 client.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

/// Map an SDK failure onto a [`StorageError`].
fn classify<E>(operation: &'static str, bucket: Option<&str>, err: &SdkError<E>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    let status = err.raw_response().map(|r| r.status().as_u16());
    classify_code(
        operation,
        bucket,
        err.code(),
        status,
        DisplayErrorContext(err).to_string(),
    )
}

fn classify_code(
    operation: &'static str,
    bucket: Option<&str>,
    code: Option<&str>,
    status: Option<u16>,
    message: String,
) -> StorageError {
    if let Some(bucket) = bucket {
        let bucket = bucket.to_owned();
        match code {
            Some("NoSuchBucket" | "NotFound") => return StorageError::NoSuchBucket { bucket },
            Some("NoSuchTagSet") => return StorageError::NoSuchTagSet { bucket },
            Some("AuthorizationHeaderMalformed") => {
                return StorageError::AuthorizationHeaderMalformed { bucket };
            }
            None if status == Some(404) => return StorageError::NoSuchBucket { bucket },
            _ => {}
        }
    }

    StorageError::Service {
        operation,
        bucket: bucket.map(ToOwned::to_owned),
        code: code.map(ToOwned::to_owned),
        message,
    }
}

#[async_trait]
impl StorageClient for AwsStorageClient {
    async fn list_buckets(&self) -> Result<Vec<String>, StorageError> {
        let resp = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| classify("ListBuckets", None, &e))?;

        Ok(resp
            .buckets()
            .iter()
            .filter_map(|b| b.name())
            .map(ToOwned::to_owned)
            .collect())
    }

    async fn bucket_region(
        &self,
        bucket: &str,
        hint: &AwsRegion,
    ) -> Result<AwsRegion, StorageError> {
        let resp = self
            .client
            .get_bucket_location()
            .bucket(bucket)
            .customize()
            .config_override(
                aws_sdk_s3::config::Builder::default()
                    .region(Region::new(hint.as_str().to_owned())),
            )
            .send()
            .await
            .map_err(|e| classify("GetBucketLocation", Some(bucket), &e))?;

        let region = AwsRegion::from_location_constraint(
            resp.location_constraint()
                .map(BucketLocationConstraint::as_str),
        );
        debug!(bucket = %bucket, region = %region, "resolved bucket region");
        Ok(region)
    }

    async fn get_bucket_tags(&self, bucket: &str) -> Result<TagSet, StorageError> {
        let resp = self
            .client
            .get_bucket_tagging()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| classify("GetBucketTagging", Some(bucket), &e))?;

        Ok(resp
            .tag_set()
            .iter()
            .map(|t| Tag::new(t.key(), t.value()))
            .collect())
    }

    async fn put_bucket_tags(&self, bucket: &str, tags: &TagSet) -> Result<(), StorageError> {
        let build_failed = |e: aws_sdk_s3::error::BuildError| StorageError::Service {
            operation: "PutBucketTagging",
            bucket: Some(bucket.to_owned()),
            code: None,
            message: e.to_string(),
        };

        let tag_set = tags
            .iter()
            .map(|t| {
                aws_sdk_s3::types::Tag::builder()
                    .key(&t.key)
                    .value(&t.value)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(build_failed)?;
        let tagging = Tagging::builder()
            .set_tag_set(Some(tag_set))
            .build()
            .map_err(build_failed)?;

        self.client
            .put_bucket_tagging()
            .bucket(bucket)
            .tagging(tagging)
            .send()
            .await
            .map_err(|e| classify("PutBucketTagging", Some(bucket), &e))?;

        debug!(bucket = %bucket, tag_count = tags.len(), "put_bucket_tagging completed");
        Ok(())
    }
}
