use serde_json::Value;
use sqlx::PgExecutor;
use time::OffsetDateTime;

use crate::{
	BoxFuture, CollectionKind, DocumentKey, DocumentStore, Result, db::Db, store::ensure_owned,
};

pub async fn get_document<'e, E>(
	executor: E,
	kind: CollectionKind,
	key: &DocumentKey,
) -> Result<Option<Value>>
where
	E: PgExecutor<'e>,
{
	key.validate(kind)?;

	let table = kind.table();
	let body = match key.owner_id.as_deref() {
		Some(owner_id) => {
			let sql = format!("SELECT body FROM {table} WHERE owner_id = $1 AND doc_id = $2");

			sqlx::query_scalar::<_, Value>(&sql)
				.bind(owner_id)
				.bind(key.document_id.as_str())
				.fetch_optional(executor)
				.await?
		},
		None => {
			let sql = format!("SELECT body FROM {table} WHERE doc_id = $1");

			sqlx::query_scalar::<_, Value>(&sql)
				.bind(key.document_id.as_str())
				.fetch_optional(executor)
				.await?
		},
	};

	Ok(body)
}

pub async fn list_documents_for_document<'e, E>(
	executor: E,
	kind: CollectionKind,
	document_id: &str,
) -> Result<Vec<Value>>
where
	E: PgExecutor<'e>,
{
	let table = kind.table();
	let sql = if kind.is_owned() {
		format!("SELECT body FROM {table} WHERE doc_id = $1 ORDER BY owner_id")
	} else {
		format!("SELECT body FROM {table} WHERE doc_id = $1")
	};
	let bodies =
		sqlx::query_scalar::<_, Value>(&sql).bind(document_id).fetch_all(executor).await?;

	Ok(bodies)
}

pub async fn list_documents_for_owner<'e, E>(
	executor: E,
	kind: CollectionKind,
	owner_id: &str,
) -> Result<Vec<Value>>
where
	E: PgExecutor<'e>,
{
	ensure_owned(kind)?;

	let sql = format!("SELECT body FROM {} WHERE owner_id = $1 ORDER BY doc_id", kind.table());
	let bodies = sqlx::query_scalar::<_, Value>(&sql).bind(owner_id).fetch_all(executor).await?;

	Ok(bodies)
}

pub async fn upsert_document<'e, E>(
	executor: E,
	kind: CollectionKind,
	key: &DocumentKey,
	body: &Value,
	now: OffsetDateTime,
) -> Result<()>
where
	E: PgExecutor<'e>,
{
	key.validate(kind)?;

	let table = kind.table();

	match key.owner_id.as_deref() {
		Some(owner_id) => {
			let sql = format!(
				"\
INSERT INTO {table} (owner_id, doc_id, body, created_at, updated_at)
VALUES ($1, $2, $3, $4, $4)
ON CONFLICT (owner_id, doc_id) DO UPDATE
SET
	body = EXCLUDED.body,
	updated_at = EXCLUDED.updated_at"
			);

			sqlx::query(&sql)
				.bind(owner_id)
				.bind(key.document_id.as_str())
				.bind(body)
				.bind(now)
				.execute(executor)
				.await?;
		},
		None => {
			let sql = format!(
				"\
INSERT INTO {table} (doc_id, body, created_at, updated_at)
VALUES ($1, $2, $3, $3)
ON CONFLICT (doc_id) DO UPDATE
SET
	body = EXCLUDED.body,
	updated_at = EXCLUDED.updated_at"
			);

			sqlx::query(&sql)
				.bind(key.document_id.as_str())
				.bind(body)
				.bind(now)
				.execute(executor)
				.await?;
		},
	}

	Ok(())
}

pub async fn list_document_ids<'e, E>(executor: E, kind: CollectionKind) -> Result<Vec<String>>
where
	E: PgExecutor<'e>,
{
	let sql = format!("SELECT DISTINCT doc_id FROM {} ORDER BY doc_id", kind.table());
	let ids = sqlx::query_scalar::<_, String>(&sql).fetch_all(executor).await?;

	Ok(ids)
}

impl DocumentStore for Db {
	fn get<'a>(
		&'a self,
		kind: CollectionKind,
		key: &'a DocumentKey,
	) -> BoxFuture<'a, Result<Option<Value>>> {
		Box::pin(get_document(&self.pool, kind, key))
	}

	fn get_for_document<'a>(
		&'a self,
		kind: CollectionKind,
		document_id: &'a str,
	) -> BoxFuture<'a, Result<Vec<Value>>> {
		Box::pin(list_documents_for_document(&self.pool, kind, document_id))
	}

	fn get_for_owner<'a>(
		&'a self,
		kind: CollectionKind,
		owner_id: &'a str,
	) -> BoxFuture<'a, Result<Vec<Value>>> {
		Box::pin(list_documents_for_owner(&self.pool, kind, owner_id))
	}

	fn upsert<'a>(
		&'a self,
		kind: CollectionKind,
		key: &'a DocumentKey,
		body: &'a Value,
	) -> BoxFuture<'a, Result<()>> {
		Box::pin(upsert_document(&self.pool, kind, key, body, OffsetDateTime::now_utc()))
	}

	fn document_ids<'a>(&'a self, kind: CollectionKind) -> BoxFuture<'a, Result<Vec<String>>> {
		Box::pin(list_document_ids(&self.pool, kind))
	}
}
