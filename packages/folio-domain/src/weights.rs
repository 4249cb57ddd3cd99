use crate::{Error, Result, TermType};

/// One weight per term type. Construction fails unless every type has a finite weight, so
/// lookups never miss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermWeights {
	tag: f64,
	annotation: f64,
	removed_tag: f64,
}
impl TermWeights {
	pub fn new(tag: f64, annotation: f64, removed_tag: f64) -> Result<Self> {
		for (term_type, weight) in [
			(TermType::Tag, tag),
			(TermType::Annotation, annotation),
			(TermType::RemovedTag, removed_tag),
		] {
			if !weight.is_finite() {
				return Err(Error::InvalidWeight { term_type });
			}
		}

		Ok(Self { tag, annotation, removed_tag })
	}

	/// Builds the table from loose entries. A later entry for the same type wins.
	pub fn from_entries<I>(entries: I) -> Result<Self>
	where
		I: IntoIterator<Item = (TermType, f64)>,
	{
		let mut tag = None;
		let mut annotation = None;
		let mut removed_tag = None;

		for (term_type, weight) in entries {
			match term_type {
				TermType::Tag => tag = Some(weight),
				TermType::Annotation => annotation = Some(weight),
				TermType::RemovedTag => removed_tag = Some(weight),
			}
		}

		Self::new(
			tag.ok_or(Error::MissingWeight { term_type: TermType::Tag })?,
			annotation.ok_or(Error::MissingWeight { term_type: TermType::Annotation })?,
			removed_tag.ok_or(Error::MissingWeight { term_type: TermType::RemovedTag })?,
		)
	}

	pub fn weight_of(&self, term_type: TermType) -> f64 {
		match term_type {
			TermType::Tag => self.tag,
			TermType::Annotation => self.annotation,
			TermType::RemovedTag => self.removed_tag,
		}
	}
}
