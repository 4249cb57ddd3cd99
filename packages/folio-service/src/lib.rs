pub mod annotations;
pub mod removed_tags;
pub mod tags;
pub mod terms;

mod error;

pub use error::{Error, Result};
pub use terms::DocumentTermsView;

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use time::{Duration, OffsetDateTime, UtcOffset};
use uuid::Uuid;

use folio_config::Config;
use folio_domain::{DocumentTerms, Term, TermVariant, TermWeights};
use folio_storage::{CollectionKind, DocumentKey, DocumentStore};

pub type IdGenerator = fn() -> Uuid;

pub type Clock = fn() -> OffsetDateTime;

/// Outcome of an upsert: the stored value and whether it replaced nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertResult<T> {
	pub value: T,
	pub was_created: bool,
}
impl<T> UpsertResult<T> {
	pub fn created(value: T) -> Self {
		Self { value, was_created: true }
	}

	pub fn updated(value: T) -> Self {
		Self { value, was_created: false }
	}

	pub fn was_updated(&self) -> bool {
		!self.was_created
	}
}

pub struct FolioService {
	pub store: Arc<dyn DocumentStore>,
	pub weights: TermWeights,
	new_id: IdGenerator,
	now: Clock,
}
impl FolioService {
	pub fn new(store: Arc<dyn DocumentStore>, weights: TermWeights) -> Self {
		Self { store, weights, new_id: Uuid::new_v4, now: OffsetDateTime::now_utc }
	}

	pub fn from_config(cfg: &Config, store: Arc<dyn DocumentStore>) -> Result<Self> {
		let weights =
			TermWeights::new(cfg.weights.tag, cfg.weights.annotation, cfg.weights.removed_tag)?;

		Ok(Self::new(store, weights))
	}

	/// Replaces the identity source and wall clock used to stamp new annotations.
	pub fn with_identity(mut self, new_id: IdGenerator, now: Clock) -> Self {
		self.new_id = new_id;
		self.now = now;

		self
	}

	/// Current UTC time at the precision stored documents keep.
	pub(crate) fn timestamp(&self) -> OffsetDateTime {
		let now = (self.now)().to_offset(UtcOffset::UTC);

		now - Duration::nanoseconds(i64::from(now.nanosecond()))
	}

	pub(crate) fn next_id(&self) -> Uuid {
		(self.new_id)()
	}

	/// Loads one collection, empty when nothing is stored under `key`.
	pub(crate) async fn load_collection<T>(
		&self,
		kind: CollectionKind,
		key: &DocumentKey,
	) -> Result<DocumentTerms<T>>
	where
		T: TermVariant,
	{
		let Some(body) = self.store.get(kind, key).await? else {
			return Ok(DocumentTerms::empty(key.owner_id.as_deref(), &key.document_id));
		};
		let collection = decode_collection::<T>(kind, body)?;

		if collection.owner_id != key.owner_id || collection.document_id != key.document_id {
			return Err(corrupt(kind, "document does not match its storage key".to_string()));
		}

		Ok(collection)
	}

	pub(crate) async fn load_collections_for_document<T>(
		&self,
		kind: CollectionKind,
		document_id: &str,
	) -> Result<Vec<DocumentTerms<T>>>
	where
		T: TermVariant,
	{
		let bodies = self.store.get_for_document(kind, document_id).await?;
		let mut collections = Vec::with_capacity(bodies.len());

		for body in bodies {
			let collection = decode_collection::<T>(kind, body)?;

			if collection.document_id != document_id {
				return Err(corrupt(kind, "document id does not match its storage key".to_string()));
			}

			collections.push(collection);
		}

		Ok(collections)
	}

	pub(crate) async fn load_collections_for_owner<T>(
		&self,
		kind: CollectionKind,
		owner_id: &str,
	) -> Result<Vec<DocumentTerms<T>>>
	where
		T: TermVariant,
	{
		let bodies = self.store.get_for_owner(kind, owner_id).await?;
		let mut collections = Vec::with_capacity(bodies.len());

		for body in bodies {
			let collection = decode_collection::<T>(kind, body)?;

			if collection.owner_id.as_deref() != Some(owner_id) {
				return Err(corrupt(kind, "owner id does not match its storage key".to_string()));
			}

			collections.push(collection);
		}

		Ok(collections)
	}

	/// Writes the whole collection in one upsert.
	pub(crate) async fn store_collection<T>(
		&self,
		kind: CollectionKind,
		collection: &DocumentTerms<T>,
	) -> Result<()>
	where
		T: TermVariant,
	{
		let key = DocumentKey {
			owner_id: collection.owner_id.clone(),
			document_id: collection.document_id.clone(),
		};
		let body = serde_json::to_value(collection).map_err(|err| Error::InvalidRequest {
			message: format!("Failed to encode {}: {err}.", kind.table()),
		})?;

		self.store.upsert(kind, &key, &body).await?;

		Ok(())
	}
}

pub(crate) fn decode_collection<T>(kind: CollectionKind, body: Value) -> Result<DocumentTerms<T>>
where
	T: TermVariant,
{
	serde_json::from_value(body).map_err(|err| corrupt(kind, err.to_string()))
}

pub(crate) fn corrupt(kind: CollectionKind, message: String) -> Error {
	tracing::warn!(collection = kind.table(), %message, "Rejected corrupt stored document.");

	Error::Corrupt { message: format!("{}: {message}", kind.table()) }
}

/// Incoming terms must carry a finite value, or they cannot be stored and read back.
pub(crate) fn ensure_storable(term: &Term) -> Result<()> {
	if term.name.trim().is_empty() {
		return Err(Error::InvalidRequest { message: "Term name must be non-empty.".to_string() });
	}
	if !term.value.is_finite() {
		return Err(Error::InvalidRequest {
			message: format!("Value of term {:?} must be a finite number.", term.name),
		});
	}

	Ok(())
}
