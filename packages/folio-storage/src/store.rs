//! Owner-scoped JSON document collections behind one async seam.
//!
//! Annotation and removed-tag documents are keyed by `(owner, document)`. Tag documents are
//! shared and keyed by document alone.

use std::{future::Future, pin::Pin};

use serde_json::Value;

use crate::{Error, Result};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectionKind {
	Annotations,
	Tags,
	RemovedTags,
}
impl CollectionKind {
	pub fn table(self) -> &'static str {
		match self {
			Self::Annotations => "document_annotations",
			Self::Tags => "document_tags",
			Self::RemovedTags => "document_removed_tags",
		}
	}

	/// Whether documents of this kind belong to a single owner.
	pub fn is_owned(self) -> bool {
		!matches!(self, Self::Tags)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentKey {
	pub owner_id: Option<String>,
	pub document_id: String,
}
impl DocumentKey {
	pub fn owned(owner_id: impl Into<String>, document_id: impl Into<String>) -> Self {
		Self { owner_id: Some(owner_id.into()), document_id: document_id.into() }
	}

	pub fn shared(document_id: impl Into<String>) -> Self {
		Self { owner_id: None, document_id: document_id.into() }
	}

	/// Checks that the key addresses a document of `kind`.
	pub fn validate(&self, kind: CollectionKind) -> Result<()> {
		if self.document_id.trim().is_empty() {
			return Err(Error::InvalidArgument("document_id must be non-empty.".to_string()));
		}

		match (kind.is_owned(), self.owner_id.as_deref()) {
			(true, None) =>
				Err(Error::InvalidArgument(format!("{} requires an owner_id.", kind.table()))),
			(true, Some(owner_id)) if owner_id.trim().is_empty() =>
				Err(Error::InvalidArgument("owner_id must be non-empty.".to_string())),
			(false, Some(_)) =>
				Err(Error::InvalidArgument(format!("{} is not owner-scoped.", kind.table()))),
			_ => Ok(()),
		}
	}
}

pub trait DocumentStore
where
	Self: Send + Sync,
{
	fn get<'a>(
		&'a self,
		kind: CollectionKind,
		key: &'a DocumentKey,
	) -> BoxFuture<'a, Result<Option<Value>>>;

	/// Every owner's document for `document_id`, ordered by owner.
	fn get_for_document<'a>(
		&'a self,
		kind: CollectionKind,
		document_id: &'a str,
	) -> BoxFuture<'a, Result<Vec<Value>>>;

	/// Every document of `owner_id`, ordered by document id. Only valid for owned kinds.
	fn get_for_owner<'a>(
		&'a self,
		kind: CollectionKind,
		owner_id: &'a str,
	) -> BoxFuture<'a, Result<Vec<Value>>>;

	/// Inserts or replaces the document under `key` in one statement.
	fn upsert<'a>(
		&'a self,
		kind: CollectionKind,
		key: &'a DocumentKey,
		body: &'a Value,
	) -> BoxFuture<'a, Result<()>>;

	/// Distinct document ids with at least one stored document, sorted.
	fn document_ids<'a>(&'a self, kind: CollectionKind) -> BoxFuture<'a, Result<Vec<String>>>;
}

pub(crate) fn ensure_owned(kind: CollectionKind) -> Result<()> {
	if kind.is_owned() {
		Ok(())
	} else {
		Err(Error::InvalidArgument(format!("{} is not owner-scoped.", kind.table())))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn owned_kinds_require_an_owner() {
		let shared = DocumentKey::shared("MS-1");

		assert!(shared.validate(CollectionKind::Tags).is_ok());
		assert!(matches!(
			shared.validate(CollectionKind::Annotations),
			Err(Error::InvalidArgument(_))
		));
		assert!(matches!(
			DocumentKey::owned("user-1", "MS-1").validate(CollectionKind::Tags),
			Err(Error::InvalidArgument(_))
		));
		assert!(matches!(
			DocumentKey::owned(" ", "MS-1").validate(CollectionKind::RemovedTags),
			Err(Error::InvalidArgument(_))
		));
		assert!(matches!(
			DocumentKey::shared("").validate(CollectionKind::Tags),
			Err(Error::InvalidArgument(_))
		));
	}
}
