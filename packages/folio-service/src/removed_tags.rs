//! Tags a user flagged as not relevant to a document.

use folio_domain::{DocumentTags, Tag};
use folio_storage::{CollectionKind, DocumentKey};

use crate::{Error, FolioService, Result, UpsertResult, ensure_storable};

const KIND: CollectionKind = CollectionKind::RemovedTags;

impl FolioService {
	pub async fn get_removed_tags(
		&self,
		owner_id: &str,
		document_id: &str,
	) -> Result<DocumentTags> {
		let key = DocumentKey::owned(owner_id, document_id);
		let removed = self.load_collection(KIND, &key).await?;

		tracing::debug!(owner_id, document_id, total = removed.len(), "Loaded removed tags.");

		Ok(removed)
	}

	pub async fn get_removed_tag(
		&self,
		owner_id: &str,
		document_id: &str,
		name: &str,
	) -> Result<Tag> {
		let removed = self.get_removed_tags(owner_id, document_id).await?;

		removed.items.into_iter().find(|tag| tag.name() == name).ok_or_else(|| Error::NotFound {
			message: format!("Removed tag {name:?} of document {document_id:?}."),
		})
	}

	/// Records `tag` as removed, replacing an earlier removal of the same name.
	pub async fn add_removed_tag(
		&self,
		owner_id: &str,
		document_id: &str,
		tag: Tag,
	) -> Result<UpsertResult<DocumentTags>> {
		ensure_storable(tag.term())?;

		let stored = self.get_removed_tags(owner_id, document_id).await?;
		let mut items =
			stored.items.iter().filter(|existing| *existing != &tag).cloned().collect::<Vec<_>>();
		let was_created = items.len() == stored.len();

		items.push(tag);

		let updated = stored.with_items(items);

		self.store_collection(KIND, &updated).await?;

		tracing::info!(owner_id, document_id, was_created, "Removed tag recorded.");

		let result =
			if was_created { UpsertResult::created(updated) } else { UpsertResult::updated(updated) };

		Ok(result)
	}

	/// Drops the removal of `name`. Returns whether anything was dropped.
	pub async fn remove_removed_tag(
		&self,
		owner_id: &str,
		document_id: &str,
		name: &str,
	) -> Result<bool> {
		let stored = self.get_removed_tags(owner_id, document_id).await?;
		let kept =
			stored.items.iter().filter(|tag| tag.name() != name).cloned().collect::<Vec<_>>();

		if kept.len() == stored.len() {
			return Ok(false);
		}

		self.store_collection(KIND, &stored.with_items(kept)).await?;

		tracing::info!(owner_id, document_id, name, "Removed tag restored.");

		Ok(true)
	}
}
