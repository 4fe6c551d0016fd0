//! Read and write path integration tests.

#[cfg(test)]
mod tests {
    use s3tagger_core::{NAME_COLUMN, StorageClient, Table, TagSet, read_tags, write_tags};

    use crate::{cleanup_bucket, create_test_bucket, s3_client, storage_client, tagger_config};

    fn row_for<'a>(table: &'a Table, bucket: &str) -> Option<&'a Vec<String>> {
        table.data_rows().iter().find(|r| r[0] == bucket)
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_read_tags_into_table() {
        let client = s3_client();
        let tagged = create_test_bucket(&client, "read-tagged").await;
        let bare = create_test_bucket(&client, "read-bare").await;
        let storage = storage_client();

        storage
            .put_bucket_tags(&tagged, &TagSet::from_pairs([("env", "prod")]))
            .await
            .expect("put_bucket_tags");

        let table = read_tags(&storage, "env,team", &tagger_config())
            .await
            .expect("read_tags");

        assert_eq!(table.header(), &[NAME_COLUMN, "env", "team"]);
        assert_eq!(
            row_for(&table, &tagged).map(Vec::as_slice),
            Some([tagged.clone(), "prod".to_owned(), String::new()].as_slice())
        );
        assert!(row_for(&table, &bare).is_none(), "untagged bucket has no row");

        cleanup_bucket(&client, &tagged).await;
        cleanup_bucket(&client, &bare).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_merge_tags_on_write() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "write").await;
        let storage = storage_client();

        storage
            .put_bucket_tags(&bucket, &TagSet::from_pairs([("owner", "alice")]))
            .await
            .expect("put_bucket_tags");

        let table = Table::from_rows(vec![
            vec![NAME_COLUMN.to_owned(), "env".to_owned()],
            vec![bucket.clone(), "prod".to_owned()],
        ])
        .expect("table");

        let config = tagger_config();
        let first = write_tags(&storage, &table, &config).await;
        let second = write_tags(&storage, &table, &config).await;
        assert_eq!(first.applied, 1);
        assert_eq!(second.applied, 1);

        let tags = storage.get_bucket_tags(&bucket).await.expect("get_bucket_tags");
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("owner"), Some("alice"));
        assert_eq!(tags.get("env"), Some("prod"));

        cleanup_bucket(&client, &bucket).await;
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_tag_untagged_bucket() {
        let client = s3_client();
        let bucket = create_test_bucket(&client, "write-bare").await;
        let storage = storage_client();

        let table = Table::from_rows(vec![
            vec![NAME_COLUMN.to_owned(), "team".to_owned()],
            vec![bucket.clone(), "core".to_owned()],
        ])
        .expect("table");

        let summary = write_tags(&storage, &table, &tagger_config()).await;
        assert!(summary.failed.is_empty());

        let tags = storage.get_bucket_tags(&bucket).await.expect("get_bucket_tags");
        assert_eq!(tags, TagSet::from_pairs([("team", "core")]));

        cleanup_bucket(&client, &bucket).await;
    }
}
