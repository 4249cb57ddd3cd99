//! In-process [`DocumentStore`] for tests and local tooling.

use std::{
	collections::BTreeMap,
	sync::{Mutex, MutexGuard},
};

use serde_json::Value;

use crate::{
	BoxFuture, CollectionKind, DocumentKey, DocumentStore, Result, store::ensure_owned,
};

#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
	documents: Mutex<BTreeMap<CollectionKind, BTreeMap<DocumentKey, Value>>>,
}
impl MemoryDocumentStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored documents of `kind`.
	pub fn len(&self, kind: CollectionKind) -> usize {
		self.lock().get(&kind).map(BTreeMap::len).unwrap_or_default()
	}

	fn lock(&self) -> MutexGuard<'_, BTreeMap<CollectionKind, BTreeMap<DocumentKey, Value>>> {
		self.documents.lock().unwrap_or_else(|err| err.into_inner())
	}

	fn get_now(&self, kind: CollectionKind, key: &DocumentKey) -> Result<Option<Value>> {
		key.validate(kind)?;

		Ok(self.lock().get(&kind).and_then(|documents| documents.get(key)).cloned())
	}

	fn for_document_now(&self, kind: CollectionKind, document_id: &str) -> Vec<Value> {
		let guard = self.lock();
		let Some(documents) = guard.get(&kind) else {
			return Vec::new();
		};

		documents
			.iter()
			.filter(|(key, _)| key.document_id == document_id)
			.map(|(_, body)| body.clone())
			.collect()
	}

	fn for_owner_now(&self, kind: CollectionKind, owner_id: &str) -> Result<Vec<Value>> {
		ensure_owned(kind)?;

		let guard = self.lock();
		let Some(documents) = guard.get(&kind) else {
			return Ok(Vec::new());
		};
		let mut owned = documents
			.iter()
			.filter(|(key, _)| key.owner_id.as_deref() == Some(owner_id))
			.map(|(key, body)| (key.document_id.as_str(), body.clone()))
			.collect::<Vec<_>>();

		owned.sort_by(|a, b| a.0.cmp(b.0));

		Ok(owned.into_iter().map(|(_, body)| body).collect())
	}

	fn upsert_now(&self, kind: CollectionKind, key: &DocumentKey, body: &Value) -> Result<()> {
		key.validate(kind)?;
		self.lock().entry(kind).or_default().insert(key.clone(), body.clone());

		Ok(())
	}

	fn document_ids_now(&self, kind: CollectionKind) -> Vec<String> {
		let guard = self.lock();
		let mut ids = guard
			.get(&kind)
			.map(|documents| {
				documents.keys().map(|key| key.document_id.clone()).collect::<Vec<_>>()
			})
			.unwrap_or_default();

		ids.sort();
		ids.dedup();

		ids
	}
}
impl DocumentStore for MemoryDocumentStore {
	fn get<'a>(
		&'a self,
		kind: CollectionKind,
		key: &'a DocumentKey,
	) -> BoxFuture<'a, Result<Option<Value>>> {
		let result = self.get_now(kind, key);

		Box::pin(async move { result })
	}

	fn get_for_document<'a>(
		&'a self,
		kind: CollectionKind,
		document_id: &'a str,
	) -> BoxFuture<'a, Result<Vec<Value>>> {
		let bodies = self.for_document_now(kind, document_id);

		Box::pin(async move { Ok(bodies) })
	}

	fn get_for_owner<'a>(
		&'a self,
		kind: CollectionKind,
		owner_id: &'a str,
	) -> BoxFuture<'a, Result<Vec<Value>>> {
		let result = self.for_owner_now(kind, owner_id);

		Box::pin(async move { result })
	}

	fn upsert<'a>(
		&'a self,
		kind: CollectionKind,
		key: &'a DocumentKey,
		body: &'a Value,
	) -> BoxFuture<'a, Result<()>> {
		let result = self.upsert_now(kind, key, body);

		Box::pin(async move { result })
	}

	fn document_ids<'a>(&'a self, kind: CollectionKind) -> BoxFuture<'a, Result<Vec<String>>> {
		let ids = self.document_ids_now(kind);

		Box::pin(async move { Ok(ids) })
	}
}
