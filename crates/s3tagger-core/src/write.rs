//! Write path: merge table values into each bucket's tag set and replace it.

use tracing::{debug, info};

use crate::client::{StorageClient, StorageError};
use crate::config::TaggerConfig;
use crate::error::handle_write_error;
use crate::table::Table;
use crate::tags::TagSet;

/// Outcome of a [`write_tags`] run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSummary {
    /// Number of buckets whose merged tag set was written.
    pub applied: usize,
    /// Buckets whose tags could not be fetched or written.
    pub failed: Vec<String>,
    /// Whether the run stopped before reaching the last row.
    pub aborted: bool,
}

/// Apply every data row of `table` to its bucket.
///
/// For each row the bucket's current tags are fetched, each header key is set
/// to the row's value (overwriting a tag with the same key, appending
/// otherwise), and the merged set replaces the bucket's tags. Tags not named
/// in the header are kept; no tag is ever deleted.
///
/// A bucket without a tag set starts from an empty set. Any other fetch
/// failure, and every replace failure, goes through [`handle_write_error`]
/// with `config.on_write_error`; the row is skipped and the run stops if the
/// handler says so.
pub async fn write_tags<C>(client: &C, table: &Table, config: &TaggerConfig) -> WriteSummary
where
    C: StorageClient + ?Sized,
{
    let mut summary = WriteSummary::default();
    let keys = table.tag_keys();

    for row in table.data_rows() {
        let bucket = row[0].as_str();

        let mut tags = match client.get_bucket_tags(bucket).await {
            Ok(tags) => tags,
            Err(StorageError::NoSuchTagSet { .. }) => TagSet::new(),
            Err(err) => {
                summary.failed.push(bucket.to_owned());
                if handle_write_error(bucket, &err, config.on_write_error) {
                    summary.aborted = true;
                    break;
                }
                continue;
            }
        };

        for (key, value) in keys.iter().zip(&row[1..]) {
            tags.set(key, value);
        }
        debug!(bucket = %bucket, tag_count = tags.len(), "merged tag set");

        match client.put_bucket_tags(bucket, &tags).await {
            Ok(()) => {
                info!(bucket = %bucket, "applied tags");
                summary.applied += 1;
            }
            Err(err) => {
                summary.failed.push(bucket.to_owned());
                if handle_write_error(bucket, &err, config.on_write_error) {
                    summary.aborted = true;
                    break;
                }
            }
        }
    }

    summary
}
