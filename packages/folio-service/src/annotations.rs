use uuid::Uuid;

use folio_domain::{Annotation, DocumentAnnotations, UserAnnotations};
use folio_storage::{CollectionKind, DocumentKey};

use crate::{FolioService, Result, corrupt, ensure_storable};

const KIND: CollectionKind = CollectionKind::Annotations;

impl FolioService {
	pub async fn get_annotations(
		&self,
		owner_id: &str,
		document_id: &str,
	) -> Result<DocumentAnnotations> {
		let annotations = self.load_annotations(&DocumentKey::owned(owner_id, document_id)).await?;

		tracing::debug!(owner_id, document_id, total = annotations.len(), "Loaded annotations.");

		Ok(annotations)
	}

	pub async fn get_page_annotations(
		&self,
		owner_id: &str,
		document_id: &str,
		page: i32,
	) -> Result<DocumentAnnotations> {
		let annotations = self.get_annotations(owner_id, document_id).await?;
		let on_page = annotations
			.items
			.iter()
			.filter(|annotation| annotation.page == page)
			.cloned()
			.collect::<Vec<_>>();

		Ok(annotations.with_items(on_page))
	}

	/// Stores `annotation` under a fresh identity, replacing any stored annotation equal to it.
	pub async fn add_annotation(
		&self,
		owner_id: &str,
		document_id: &str,
		annotation: Annotation,
	) -> Result<Annotation> {
		ensure_storable(annotation.term())?;

		let key = DocumentKey::owned(owner_id, document_id);
		let stored = self.load_annotations(&key).await?;
		let annotation = annotation.stamped(self.next_id(), self.timestamp());
		let mut items = stored
			.items
			.iter()
			.filter(|existing| *existing != &annotation)
			.cloned()
			.collect::<Vec<_>>();
		let replaced = stored.len() - items.len();

		items.push(annotation.clone());

		self.store_collection(KIND, &stored.with_items(items)).await?;

		tracing::info!(
			owner_id,
			document_id,
			uuid = ?annotation.uuid,
			replaced,
			"Annotation added."
		);

		Ok(annotation)
	}

	/// Removes every stored annotation whose identity is in `ids` and returns the ids removed.
	pub async fn remove_annotations(
		&self,
		owner_id: &str,
		document_id: &str,
		ids: &[Uuid],
	) -> Result<Vec<Uuid>> {
		let key = DocumentKey::owned(owner_id, document_id);
		let stored = self.load_annotations(&key).await?;
		let (removed, kept): (Vec<_>, Vec<_>) = stored
			.items
			.iter()
			.cloned()
			.partition(|annotation| annotation.uuid.is_some_and(|uuid| ids.contains(&uuid)));

		if removed.is_empty() {
			return Ok(Vec::new());
		}

		self.store_collection(KIND, &stored.with_items(kept)).await?;

		let removed =
			removed.into_iter().filter_map(|annotation| annotation.uuid).collect::<Vec<_>>();

		tracing::info!(owner_id, document_id, removed = removed.len(), "Annotations removed.");

		Ok(removed)
	}

	pub async fn remove_annotation(
		&self,
		owner_id: &str,
		document_id: &str,
		id: Uuid,
	) -> Result<bool> {
		let removed = self.remove_annotations(owner_id, document_id, &[id]).await?;

		Ok(removed.len() == 1)
	}

	/// Every annotation of `owner_id`, grouped by document.
	pub async fn annotations_by_owner(&self, owner_id: &str) -> Result<UserAnnotations> {
		let documents = self.load_collections_for_owner(KIND, owner_id).await?;

		for document in &documents {
			ensure_identified(document)?;
		}

		let annotations = UserAnnotations { owner_id: owner_id.to_string(), documents };

		tracing::debug!(owner_id, total = annotations.total(), "Loaded owner annotations.");

		Ok(annotations)
	}

	pub async fn annotated_documents(&self) -> Result<Vec<String>> {
		Ok(self.store.document_ids(KIND).await?)
	}

	/// Every owner's annotations on `document_id`.
	pub(crate) async fn annotations_for_document(
		&self,
		document_id: &str,
	) -> Result<Vec<DocumentAnnotations>> {
		let documents = self.load_collections_for_document(KIND, document_id).await?;

		for document in &documents {
			ensure_identified(document)?;
		}

		Ok(documents)
	}

	async fn load_annotations(&self, key: &DocumentKey) -> Result<DocumentAnnotations> {
		let annotations = self.load_collection(KIND, key).await?;

		ensure_identified(&annotations)?;

		Ok(annotations)
	}
}

/// Stored annotations are addressed by identity, so every one must carry it.
fn ensure_identified(annotations: &DocumentAnnotations) -> Result<()> {
	match annotations.items.iter().position(|annotation| annotation.uuid.is_none()) {
		Some(index) => Err(corrupt(
			KIND,
			format!("annotation {index} of document {:?} has no uuid", annotations.document_id),
		)),
		None => Ok(()),
	}
}
