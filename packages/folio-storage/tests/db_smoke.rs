use serde_json::json;

use folio_config::Postgres;
use folio_storage::{CollectionKind, DocumentKey, DocumentStore, db::Db};

#[tokio::test]
#[ignore = "Requires external Postgres. Set FOLIO_PG_DSN to run."]
async fn db_connects_and_bootstraps() {
	let Some(base_dsn) = folio_testkit::env_dsn() else {
		eprintln!("Skipping db_connects_and_bootstraps; set FOLIO_PG_DSN to run this test.");

		return;
	};

	folio_testkit::with_test_db(&base_dsn, |test_db| {
		let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };

		async move {
			let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

			db.ensure_schema().await.expect("Failed to ensure schema.");
			// Bootstrapping twice must be a no-op.
			db.ensure_schema().await.expect("Failed to ensure schema.");

			for table in ["document_annotations", "document_tags", "document_removed_tags"] {
				let count: i64 = sqlx::query_scalar(
					"SELECT count(*) FROM information_schema.tables WHERE table_name = $1",
				)
				.bind(table)
				.fetch_one(&db.pool)
				.await
				.expect("Failed to query schema tables.");

				assert_eq!(count, 1, "Missing table {table}.");
			}

			db.pool.close().await;

			Ok(())
		}
	})
	.await
	.expect("Failed to run against a test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set FOLIO_PG_DSN to run."]
async fn upsert_overwrites_in_place() {
	let Some(base_dsn) = folio_testkit::env_dsn() else {
		eprintln!("Skipping upsert_overwrites_in_place; set FOLIO_PG_DSN to run this test.");

		return;
	};

	folio_testkit::with_test_db(&base_dsn, |test_db| {
		let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 1 };

		async move {
			let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

			db.ensure_schema().await.expect("Failed to ensure schema.");

			let owned = DocumentKey::owned("user-1", "MS-1");
			let shared = DocumentKey::shared("MS-1");

			for version in 1..=2 {
				db.upsert(CollectionKind::Annotations, &owned, &json!({ "version": version }))
					.await
					.expect("Failed to upsert annotations.");
				db.upsert(CollectionKind::Tags, &shared, &json!({ "version": version }))
					.await
					.expect("Failed to upsert tags.");
			}

			let annotations = db
				.get(CollectionKind::Annotations, &owned)
				.await
				.expect("Failed to read annotations.")
				.expect("Expected a stored document.");
			let tags = db
				.get_for_document(CollectionKind::Tags, "MS-1")
				.await
				.expect("Failed to read tags.");
			let ids =
				db.document_ids(CollectionKind::Annotations).await.expect("Failed to list ids.");

			assert_eq!(annotations, json!({ "version": 2 }));
			assert_eq!(tags, vec![json!({ "version": 2 })]);
			assert_eq!(ids, vec!["MS-1".to_string()]);
			assert!(
				db.get(CollectionKind::RemovedTags, &owned)
					.await
					.expect("Failed to read removed tags.")
					.is_none()
			);

			db.pool.close().await;

			Ok(())
		}
	})
	.await
	.expect("Failed to run against a test database.");
}
