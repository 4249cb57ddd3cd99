//! Combined view of every contribution to one document.

use std::collections::{HashMap, hash_map::Entry};

use serde::Serialize;

use folio_domain::{Term, TermCombiner, TermType, TermWeights, positive_terms, weighted};
use folio_storage::CollectionKind;

use crate::{FolioService, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentTermsView {
	#[serde(rename = "docId")]
	pub document_id: String,
	pub total: usize,
	pub terms: Vec<Term>,
}

impl FolioService {
	/// All owners' annotations on `document_id`, summed by term name.
	pub async fn merged_annotations_by_document(&self, document_id: &str) -> Result<Vec<Term>> {
		let documents = self.annotations_for_document(document_id).await?;

		Ok(merge_by_name(documents.iter().flat_map(|document| document.terms())))
	}

	/// All owners' removed tags on `document_id`, summed by term name.
	pub async fn merged_removed_tags_by_document(&self, document_id: &str) -> Result<Vec<Term>> {
		let documents = self
			.load_collections_for_document::<folio_domain::Tag>(
				CollectionKind::RemovedTags,
				document_id,
			)
			.await?;

		Ok(merge_by_name(documents.iter().flat_map(|document| document.terms())))
	}

	/// Weighted sum of shared tags, annotations and removed tags, keeping positive terms only.
	pub async fn document_terms(&self, document_id: &str) -> Result<DocumentTermsView> {
		let tags = self.get_tags_by_document(document_id).await?;
		let tags = tags.terms().cloned().collect::<Vec<_>>();
		let annotations = self.merged_annotations_by_document(document_id).await?;
		let removed = self.merged_removed_tags_by_document(document_id).await?;
		let terms = combine(self.weights, &tags, &annotations, &removed)?;

		tracing::debug!(
			document_id,
			tags = tags.len(),
			annotations = annotations.len(),
			removed = removed.len(),
			total = terms.len(),
			"Combined document terms."
		);

		Ok(DocumentTermsView { document_id: document_id.to_string(), total: terms.len(), terms })
	}
}

fn combine(
	weights: TermWeights,
	tags: &[Term],
	annotations: &[Term],
	removed: &[Term],
) -> Result<Vec<Term>> {
	let mut combiner = weighted(weights).post_processed_by(positive_terms);

	combiner
		.add_terms(TermType::Tag, || tags.iter())
		.add_terms(TermType::Annotation, || annotations.iter())
		.add_terms(TermType::RemovedTag, || removed.iter());

	Ok(combiner.combined_terms()?)
}

/// Sums terms sharing a name, sorted by name.
fn merge_by_name<'a, I>(terms: I) -> Vec<Term>
where
	I: IntoIterator<Item = &'a Term>,
{
	let mut merged: HashMap<&str, Term> = HashMap::new();

	for term in terms {
		match merged.entry(term.name.as_str()) {
			Entry::Occupied(mut entry) => {
				let combined = entry.get().merge_by_adding(term);

				entry.insert(combined);
			},
			Entry::Vacant(entry) => {
				entry.insert(term.clone());
			},
		}
	}

	let mut terms = merged.into_values().collect::<Vec<_>>();

	terms.sort_by(|a, b| a.name.cmp(&b.name));

	terms
}
