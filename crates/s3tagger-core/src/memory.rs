//! In-memory [`StorageClient`].
//!
//! [`InMemoryStorage`] keeps buckets in insertion order, which is the order
//! [`StorageClient::list_buckets`] reports them in. It records every call it
//! receives and can be told to fail specific operations, which makes it the
//! backend for exercising the read and write paths without a live service.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::client::{StorageClient, StorageError};
use crate::tags::TagSet;
use crate::types::AwsRegion;

/// Operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `ListBuckets`.
    ListBuckets,
    /// Bucket region resolution.
    BucketRegion,
    /// `GetBucketTagging`.
    GetBucketTags,
    /// `PutBucketTagging`.
    PutBucketTags,
}

impl Operation {
    fn label(self) -> &'static str {
        match self {
            Self::ListBuckets => "list",
            Self::BucketRegion => "region",
            Self::GetBucketTags => "get",
            Self::PutBucketTags => "put",
        }
    }
}

#[derive(Debug, Clone)]
struct MemoryBucket {
    name: String,
    region: AwsRegion,
    tags: TagSet,
}

/// A [`StorageClient`] backed by process memory.
#[derive(Default)]
pub struct InMemoryStorage {
    buckets: RwLock<Vec<MemoryBucket>>,
    /// Region the simulated client signs requests for; tag calls against a
    /// bucket elsewhere fail with `AuthorizationHeaderMalformed`.
    client_region: Option<AwsRegion>,
    faults: Mutex<HashMap<(Operation, String), StorageError>>,
    calls: Mutex<Vec<String>>,
}

impl std::fmt::Debug for InMemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStorage")
            .field("bucket_count", &self.buckets.read().len())
            .field("client_region", &self.client_region)
            .finish_non_exhaustive()
    }
}

impl InMemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store whose simulated client is bound to `region`.
    #[must_use]
    pub fn with_client_region(region: impl Into<AwsRegion>) -> Self {
        Self {
            client_region: Some(region.into()),
            ..Self::default()
        }
    }

    /// Add a bucket. An empty `tags` set means the bucket has no tag set.
    pub fn insert_bucket(&self, name: &str, region: impl Into<AwsRegion>, tags: TagSet) {
        self.buckets.write().push(MemoryBucket {
            name: name.to_owned(),
            region: region.into(),
            tags,
        });
    }

    /// Make `operation` fail with `err` whenever it targets `bucket`.
    ///
    /// For [`Operation::ListBuckets`] the bucket name is ignored; use `""`.
    pub fn fail(&self, operation: Operation, bucket: &str, err: StorageError) {
        let key = match operation {
            Operation::ListBuckets => String::new(),
            _ => bucket.to_owned(),
        };
        self.faults.lock().insert((operation, key), err);
    }

    /// Current tags of `bucket`, or `None` if it does not exist.
    #[must_use]
    pub fn tags(&self, bucket: &str) -> Option<TagSet> {
        self.buckets
            .read()
            .iter()
            .find(|b| b.name == bucket)
            .map(|b| b.tags.clone())
    }

    /// Every call received so far, as `"<op>:<bucket>"` (`"list"` for listings).
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, operation: Operation, bucket: &str) -> Result<(), StorageError> {
        let entry = match operation {
            Operation::ListBuckets => operation.label().to_owned(),
            _ => format!("{}:{bucket}", operation.label()),
        };
        self.calls.lock().push(entry);

        match self.faults.lock().get(&(operation, bucket.to_owned())) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn find(&self, bucket: &str) -> Result<MemoryBucket, StorageError> {
        self.buckets
            .read()
            .iter()
            .find(|b| b.name == bucket)
            .cloned()
            .ok_or_else(|| StorageError::NoSuchBucket {
                bucket: bucket.to_owned(),
            })
    }

    fn check_region(&self, bucket: &MemoryBucket) -> Result<(), StorageError> {
        match &self.client_region {
            Some(region) if *region != bucket.region => {
                Err(StorageError::AuthorizationHeaderMalformed {
                    bucket: bucket.name.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl StorageClient for InMemoryStorage {
    async fn list_buckets(&self) -> Result<Vec<String>, StorageError> {
        self.record(Operation::ListBuckets, "")?;
        Ok(self.buckets.read().iter().map(|b| b.name.clone()).collect())
    }

    async fn bucket_region(
        &self,
        bucket: &str,
        _hint: &AwsRegion,
    ) -> Result<AwsRegion, StorageError> {
        self.record(Operation::BucketRegion, bucket)?;
        Ok(self.find(bucket)?.region)
    }

    async fn get_bucket_tags(&self, bucket: &str) -> Result<TagSet, StorageError> {
        self.record(Operation::GetBucketTags, bucket)?;
        let found = self.find(bucket)?;
        self.check_region(&found)?;

        if found.tags.is_empty() {
            return Err(StorageError::NoSuchTagSet {
                bucket: bucket.to_owned(),
            });
        }
        Ok(found.tags)
    }

    async fn put_bucket_tags(&self, bucket: &str, tags: &TagSet) -> Result<(), StorageError> {
        self.record(Operation::PutBucketTags, bucket)?;
        let found = self.find(bucket)?;
        self.check_region(&found)?;

        if let Some(b) = self.buckets.write().iter_mut().find(|b| b.name == bucket) {
            b.tags = tags.clone();
        }

        debug!(bucket = %bucket, tag_count = tags.len(), "replaced bucket tags");
        Ok(())
    }
}
