//! Merges typed streams of terms into one term set.
//!
//! Sources are registered per [`TermType`]. On every call to
//! [`TermCombiner::combined_terms`] each type's sources are concatenated, passed through a
//! per-type transform, and all types are then grouped by term name and summed.

use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use crate::{Result, Term, TermType, TermWeights};

pub type TermIter<'a> = Box<dyn Iterator<Item = Term> + 'a>;

type TermSource<'a> = Box<dyn Fn() -> TermIter<'a> + 'a>;

pub trait TermCombiner<'a> {
	type Output;

	/// Registers another source for `term_type`. Sources are restartable: each call to
	/// `combined_terms` invokes them again.
	fn add_terms<F, I>(&mut self, term_type: TermType, source: F) -> &mut Self
	where
		F: Fn() -> I + 'a,
		I: IntoIterator,
		I::IntoIter: 'a,
		I::Item: Into<Term> + 'a;

	fn combined_terms(&self) -> Result<Self::Output>;

	/// Wraps this combiner so `post_processor` is applied to every combined result.
	fn post_processed_by<F, O>(self, post_processor: F) -> PostProcessed<Self, F>
	where
		Self: Sized,
		F: Fn(Self::Output) -> O,
	{
		PostProcessed { inner: self, post_processor }
	}
}

/// Groups terms across types by name and merges each group with [`Term::merge_by_adding`].
///
/// `before_combine` sees each type's concatenated terms before they meet terms of other types.
pub struct DefaultTermCombiner<'a, B> {
	sources: BTreeMap<TermType, Vec<TermSource<'a>>>,
	before_combine: B,
}
impl<'a, B> DefaultTermCombiner<'a, B>
where
	B: Fn(TermType, TermIter<'a>) -> Result<TermIter<'a>>,
{
	pub fn new(before_combine: B) -> Self {
		Self { sources: BTreeMap::new(), before_combine }
	}

	fn terms_of(sources: &[TermSource<'a>]) -> TermIter<'a> {
		let streams = sources.iter().map(|source| source()).collect::<Vec<_>>();

		Box::new(streams.into_iter().flatten())
	}
}
impl<'a, B> TermCombiner<'a> for DefaultTermCombiner<'a, B>
where
	B: Fn(TermType, TermIter<'a>) -> Result<TermIter<'a>>,
{
	type Output = HashMap<String, Term>;

	fn add_terms<F, I>(&mut self, term_type: TermType, source: F) -> &mut Self
	where
		F: Fn() -> I + 'a,
		I: IntoIterator,
		I::IntoIter: 'a,
		I::Item: Into<Term> + 'a,
	{
		let boxed: TermSource<'a> = Box::new(move || -> TermIter<'a> {
			Box::new(source().into_iter().map(Into::into))
		});

		self.sources.entry(term_type).or_default().push(boxed);

		self
	}

	fn combined_terms(&self) -> Result<Self::Output> {
		let mut merged: HashMap<String, Term> = HashMap::new();

		for (term_type, sources) in &self.sources {
			let terms = (self.before_combine)(*term_type, Self::terms_of(sources))?;

			for term in terms {
				match merged.entry(term.name.clone()) {
					Entry::Occupied(mut entry) => {
						let combined = entry.get().merge_by_adding(&term);

						entry.insert(combined);
					},
					Entry::Vacant(entry) => {
						entry.insert(term);
					},
				}
			}
		}

		Ok(merged)
	}
}

/// A combiner whose output is mapped by a post-processing function on every call.
pub struct PostProcessed<C, F> {
	inner: C,
	post_processor: F,
}
impl<'a, C, F, O> TermCombiner<'a> for PostProcessed<C, F>
where
	C: TermCombiner<'a>,
	F: Fn(C::Output) -> O,
{
	type Output = O;

	fn add_terms<S, I>(&mut self, term_type: TermType, source: S) -> &mut Self
	where
		S: Fn() -> I + 'a,
		I: IntoIterator,
		I::IntoIter: 'a,
		I::Item: Into<Term> + 'a,
	{
		self.inner.add_terms(term_type, source);

		self
	}

	fn combined_terms(&self) -> Result<Self::Output> {
		self.inner.combined_terms().map(&self.post_processor)
	}
}

/// Scales each term's value by the weight of its type before merging.
pub fn weighted<'a>(
	weights: TermWeights,
) -> DefaultTermCombiner<'a, impl Fn(TermType, TermIter<'a>) -> Result<TermIter<'a>>> {
	DefaultTermCombiner::new(
		move |term_type: TermType, terms: TermIter<'a>| -> Result<TermIter<'a>> {
			let factor = weights.weight_of(term_type);

			Ok(Box::new(terms.map(move |term| term.weight(factor))))
		},
	)
}

/// Keeps terms with a positive value, highest value first, ties by name.
pub fn positive_terms(merged: HashMap<String, Term>) -> Vec<Term> {
	let mut terms = merged.into_values().filter(Term::has_positive_value).collect::<Vec<_>>();

	terms.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.name.cmp(&b.name)));

	terms
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Error;

	fn reject(term_type: TermType, _terms: TermIter<'_>) -> Result<TermIter<'_>> {
		Err(Error::Transform { message: format!("rejected {term_type}") })
	}

	fn weights(tag: f64, annotation: f64, removed_tag: f64) -> TermWeights {
		TermWeights::new(tag, annotation, removed_tag).expect("Weights must be valid.")
	}

	#[test]
	fn weights_single_source() {
		let tags = vec![Term::new("x", 1, 1.0)];
		let mut combiner = weighted(weights(2.0, 1.0, -1.0));

		combiner.add_terms(TermType::Tag, || tags.iter());

		let merged = combiner.combined_terms().expect("Combine must succeed.");
		let x = &merged["x"];

		assert_eq!(merged.len(), 1);
		assert_eq!(x.raw, 1);
		assert_eq!(x.value, 2.0);
	}

	#[test]
	fn removed_tags_cancel_positive_contributions() {
		let term = vec![Term::new("x", 1, 1.0)];
		let mut combiner = weighted(weights(1.0, 1.0, -3.0)).post_processed_by(positive_terms);

		combiner
			.add_terms(TermType::Tag, || term.iter())
			.add_terms(TermType::Annotation, || term.iter())
			.add_terms(TermType::RemovedTag, || term.iter());

		assert!(combiner.combined_terms().expect("Combine must succeed.").is_empty());
	}

	#[test]
	fn sources_of_one_type_are_concatenated() {
		let first = vec![Term::new("x", 1, 1.0)];
		let second = vec![Term::new("x", 2, 2.0), Term::new("y", 1, 1.0)];
		let mut combiner = weighted(weights(0.5, 1.0, -1.0));

		combiner
			.add_terms(TermType::Tag, || first.iter())
			.add_terms(TermType::Tag, || second.iter());

		let merged = combiner.combined_terms().expect("Combine must succeed.");

		assert_eq!(merged["x"].raw, 3);
		assert_eq!(merged["x"].value, 1.5);
		assert_eq!(merged["y"].value, 0.5);
	}

	#[test]
	fn accepts_borrowed_and_owned_sources() {
		let borrowed = vec![Term::new("x", 1, 1.0)];
		let tags = vec![crate::Tag::new("x", 2, 2.0)];
		let mut combiner = weighted(weights(1.0, 1.0, -1.0));

		combiner
			.add_terms(TermType::Tag, || borrowed.iter())
			.add_terms(TermType::Tag, || tags.iter())
			.add_terms(TermType::Annotation, || vec![Term::new("x", 4, 4.0)]);

		let merged = combiner.combined_terms().expect("Combine must succeed.");

		assert_eq!(merged["x"].raw, 7);
		assert_eq!(merged["x"].value, 7.0);
	}

	#[test]
	fn sources_are_restartable() {
		let tags = vec![Term::new("x", 1, 1.0)];
		let mut combiner = weighted(weights(1.0, 1.0, -1.0));

		combiner.add_terms(TermType::Tag, || tags.iter());

		let first = combiner.combined_terms().expect("Combine must succeed.");
		let second = combiner.combined_terms().expect("Combine must succeed.");

		assert_eq!(first["x"].value, second["x"].value);
	}

	#[test]
	fn weighting_happens_before_merging() {
		let tags = vec![Term::new("x", 1, 1.0), Term::new("x", 1, 1.0)];
		let annotations = vec![Term::new("x", 1, 1.0)];
		let mut combiner = weighted(weights(0.25, 4.0, -1.0));

		combiner
			.add_terms(TermType::Tag, || tags.iter())
			.add_terms(TermType::Annotation, || annotations.iter());

		let merged = combiner.combined_terms().expect("Combine must succeed.");

		assert_eq!(merged["x"].raw, 3);
		assert_eq!(merged["x"].value, 4.5);
	}

	#[test]
	fn transform_failure_fails_the_combination() {
		let tags = vec![Term::new("x", 1, 1.0)];
		let mut combiner = DefaultTermCombiner::new(reject);

		combiner.add_terms(TermType::Tag, || tags.iter());

		assert!(matches!(combiner.combined_terms(), Err(Error::Transform { .. })));
	}

	#[test]
	fn positive_terms_are_ranked() {
		let mut merged = HashMap::new();

		for term in [
			Term::new("b", 1, 2.0),
			Term::new("a", 1, 2.0),
			Term::new("c", 1, 5.0),
			Term::new("d", 1, -1.0),
		] {
			merged.insert(term.name.clone(), term);
		}

		let names = positive_terms(merged).into_iter().map(|term| term.name).collect::<Vec<_>>();

		assert_eq!(names, vec!["c", "a", "b"]);
	}
}
