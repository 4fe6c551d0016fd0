//! Storage client seam.
//!
//! [`StorageClient`] is the only way the tag operations talk to the storage
//! service. Failures come back as a closed set of [`StorageError`] variants
//! so callers match on the kind instead of inspecting error-code strings.

use async_trait::async_trait;

use crate::tags::TagSet;
use crate::types::AwsRegion;

/// Errors reported by a [`StorageClient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The bucket does not exist (or is not visible to the caller).
    #[error("bucket not found: {bucket}")]
    NoSuchBucket {
        /// The bucket that was not found.
        bucket: String,
    },

    /// The bucket exists but carries no tag set.
    #[error("tag set for bucket {bucket} does not exist")]
    NoSuchTagSet {
        /// The untagged bucket.
        bucket: String,
    },

    /// The request was signed for a different region than the bucket's.
    #[error("bucket {bucket} is not in the client's region (authorization header malformed)")]
    AuthorizationHeaderMalformed {
        /// The bucket whose region did not match.
        bucket: String,
    },

    /// Any other service or transport failure.
    #[error("{operation} failed{}: {message}", bucket_suffix(.bucket.as_deref()))]
    Service {
        /// The operation that failed (e.g. `"PutBucketTagging"`).
        operation: &'static str,
        /// The bucket involved, if any.
        bucket: Option<String>,
        /// The service error code, if one was returned.
        code: Option<String>,
        /// Human-readable description.
        message: String,
    },
}

fn bucket_suffix(bucket: Option<&str>) -> String {
    bucket.map(|b| format!(" for bucket {b}")).unwrap_or_default()
}

/// Bucket listing, region resolution, and tag get/replace operations.
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// List every bucket owned by the caller, regardless of region.
    async fn list_buckets(&self) -> Result<Vec<String>, StorageError>;

    /// Resolve the region `bucket` lives in.
    ///
    /// `hint` names a region in the partition to ask.
    async fn bucket_region(&self, bucket: &str, hint: &AwsRegion)
    -> Result<AwsRegion, StorageError>;

    /// Fetch the bucket's current tag set.
    async fn get_bucket_tags(&self, bucket: &str) -> Result<TagSet, StorageError>;

    /// Replace the bucket's entire tag set with `tags`.
    async fn put_bucket_tags(&self, bucket: &str, tags: &TagSet) -> Result<(), StorageError>;
}
