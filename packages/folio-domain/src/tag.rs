use serde::{Deserialize, Serialize};

use crate::Term;

/// A term attached to a whole document, either machine-extracted or flagged by a user.
///
/// Equality is the term's: two tags are equal when their names match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag {
	term: Term,
}
impl Tag {
	pub fn new(name: impl Into<String>, raw: i32, value: f64) -> Self {
		Self { term: Term::new(name, raw, value) }
	}

	pub fn name(&self) -> &str {
		&self.term.name
	}

	pub fn term(&self) -> &Term {
		&self.term
	}
}
impl From<Term> for Tag {
	fn from(term: Term) -> Self {
		Self { term }
	}
}
impl From<Tag> for Term {
	fn from(tag: Tag) -> Self {
		tag.term
	}
}
impl From<&Tag> for Term {
	fn from(tag: &Tag) -> Self {
		tag.term.clone()
	}
}
