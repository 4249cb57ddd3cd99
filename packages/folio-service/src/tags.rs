use folio_domain::DocumentTags;
use folio_storage::{CollectionKind, DocumentKey};

use crate::{Error, FolioService, Result, ensure_storable};

const KIND: CollectionKind = CollectionKind::Tags;

impl FolioService {
	/// Tags shared by every user of `document_id`, empty when none were ingested.
	pub async fn get_tags_by_document(&self, document_id: &str) -> Result<DocumentTags> {
		let tags = self.load_collection(KIND, &DocumentKey::shared(document_id)).await?;

		tracing::debug!(document_id, total = tags.len(), "Loaded document tags.");

		Ok(tags)
	}

	/// Overwrites the shared tags of `tags.document_id`.
	pub async fn replace_document_tags(&self, tags: &DocumentTags) -> Result<()> {
		if tags.owner_id.is_some() {
			return Err(Error::InvalidRequest {
				message: "Document tags are shared and must not carry an owner id.".to_string(),
			});
		}

		for tag in &tags.items {
			ensure_storable(tag.term())?;
		}

		self.store_collection(KIND, tags).await?;

		tracing::info!(
			document_id = %tags.document_id,
			total = tags.len(),
			"Document tags replaced."
		);

		Ok(())
	}

	pub async fn tagged_documents(&self) -> Result<Vec<String>> {
		Ok(self.store.document_ids(KIND).await?)
	}
}
