//! Storage client integration tests.

#[cfg(test)]
mod tests {
    use s3tagger_core::{AwsRegion, StorageClient, StorageError, TagSet};

    use crate::{
        TEST_REGION, cleanup_bucket, create_test_bucket, s3_client, storage_client,
        test_bucket_name,
    };

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_list_created_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "list").await;

        let names = storage_client().list_buckets().await.expect("list_buckets");
        assert!(names.contains(&bucket), "should contain {bucket}");

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_resolve_bucket_region() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "region").await;

        let region = storage_client()
            .bucket_region(&bucket, &AwsRegion::new(TEST_REGION))
            .await
            .expect("bucket_region");
        tracing::info!(%region, "bucket region");
        assert_eq!(region.as_str(), TEST_REGION);

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_missing_bucket_region() {
        let name = test_bucket_name("ghost");

        let err = storage_client()
            .bucket_region(&name, &AwsRegion::new(TEST_REGION))
            .await
            .unwrap_err();
        assert_eq!(err, StorageError::NoSuchBucket { bucket: name });
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_missing_tag_set() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "untagged").await;

        let err = storage_client().get_bucket_tags(&bucket).await.unwrap_err();
        assert!(
            matches!(err, StorageError::NoSuchTagSet { .. }),
            "unexpected error: {err}"
        );

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_replace_and_fetch_tags() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "tags").await;
        let storage = storage_client();

        let tags = TagSet::from_pairs([("env", "dev"), ("team", "core")]);
        storage
            .put_bucket_tags(&bucket, &tags)
            .await
            .expect("put_bucket_tags");

        let fetched = storage.get_bucket_tags(&bucket).await.expect("get_bucket_tags");
        assert_eq!(fetched.to_map(), tags.to_map());

        cleanup_bucket(&client, &bucket).await;
    }
}
