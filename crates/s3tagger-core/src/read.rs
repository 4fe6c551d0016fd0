//! Read path: enumerate buckets, keep the target region, project tags.

use tracing::{debug, info, warn};

use crate::client::{StorageClient, StorageError};
use crate::config::{ErrorPolicy, TaggerConfig};
use crate::error::{TaggerError, TaggerResult};
use crate::table::{NAME_COLUMN, Table, parse_tag_keys};

/// Read the tags named in `tags_to_read` (comma-delimited) from every bucket
/// in `config.region`.
///
/// The returned table has the header `["Name", <keys>...]` and one row per
/// bucket whose tags could be read. Buckets in other regions, buckets without
/// a tag set, and buckets whose tags could not be fetched get no row.
///
/// When a listed bucket's region lookup reports that the bucket does not
/// exist, `config.on_region_not_found` decides between skipping that bucket
/// and stopping the scan; with [`ErrorPolicy::Abort`] the rows collected so
/// far are returned.
///
/// # Errors
///
/// - [`TaggerError::ListBuckets`] if the bucket listing fails.
/// - [`TaggerError::RegionLookup`] if a region lookup fails for any reason
///   other than the bucket not being found.
pub async fn read_tags<C>(
    client: &C,
    tags_to_read: &str,
    config: &TaggerConfig,
) -> TaggerResult<Table>
where
    C: StorageClient + ?Sized,
{
    let buckets = client
        .list_buckets()
        .await
        .map_err(TaggerError::ListBuckets)?;
    let keys = parse_tag_keys(tags_to_read);
    let mut table = Table::with_headers(NAME_COLUMN, &keys);

    debug!(
        bucket_count = buckets.len(),
        region = %config.region,
        "listed buckets"
    );

    for bucket in &buckets {
        let region = match client.bucket_region(bucket, &config.region).await {
            Ok(region) => region,
            Err(StorageError::NoSuchBucket { .. }) => {
                warn!(bucket = %bucket, "unable to find bucket region, bucket not found");
                match config.on_region_not_found {
                    ErrorPolicy::Abort => {
                        warn!(bucket = %bucket, "stopping scan of remaining buckets");
                        break;
                    }
                    ErrorPolicy::Continue => continue,
                }
            }
            Err(err) => return Err(TaggerError::RegionLookup(err)),
        };

        if region != config.region {
            debug!(bucket = %bucket, region = %region, "bucket outside target region");
            continue;
        }

        match client.get_bucket_tags(bucket).await {
            Ok(tags) => table.push_tags(bucket, &tags.to_map()),
            Err(StorageError::NoSuchTagSet { .. }) => {
                info!(bucket = %bucket, "tag set for bucket doesn't exist");
            }
            Err(StorageError::AuthorizationHeaderMalformed { .. }) => {
                warn!(bucket = %bucket, region = %config.region, "bucket is not in your region");
            }
            Err(err @ (StorageError::NoSuchBucket { .. } | StorageError::Service { .. })) => {
                warn!(bucket = %bucket, error = %err, "not able to get tags");
            }
        }
    }

    Ok(table)
}
