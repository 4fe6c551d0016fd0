//! Error types for s3tagger.

use tracing::error;

use crate::client::StorageError;
use crate::config::ErrorPolicy;

/// Errors that end a read or write operation.
#[derive(Debug, thiserror::Error)]
pub enum TaggerError {
    /// Listing buckets failed; nothing else can be done.
    #[error("not able to list buckets: {0}")]
    ListBuckets(#[source] StorageError),

    /// Region lookup for a listed bucket failed.
    #[error("unable to resolve bucket region: {0}")]
    RegionLookup(#[source] StorageError),

    /// A table does not have the expected shape.
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// Malformed CSV input or CSV output failure.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for s3tagger operations.
pub type TaggerResult<T> = Result<T, TaggerError>;

/// Report a write-path failure for `bucket` and decide whether to stop.
///
/// Returns `true` when no further rows should be processed.
pub fn handle_write_error(bucket: &str, err: &StorageError, policy: ErrorPolicy) -> bool {
    let stop = policy == ErrorPolicy::Abort;
    error!(bucket = %bucket, error = %err, stop, "failed to apply tags");
    stop
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_error() -> StorageError {
        StorageError::Service {
            operation: "PutBucketTagging",
            bucket: Some("b".to_owned()),
            code: Some("AccessDenied".to_owned()),
            message: "Access Denied".to_owned(),
        }
    }

    #[test]
    fn test_should_stop_on_abort_policy() {
        assert!(handle_write_error("b", &service_error(), ErrorPolicy::Abort));
    }

    #[test]
    fn test_should_continue_on_continue_policy() {
        assert!(!handle_write_error("b", &service_error(), ErrorPolicy::Continue));
    }

    #[test]
    fn test_should_describe_list_failure() {
        let err = TaggerError::ListBuckets(service_error());
        assert!(err.to_string().starts_with("not able to list buckets"));
    }
}
