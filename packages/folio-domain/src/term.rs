use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A named, weighted count contributed by some source.
///
/// Two terms are the same term when their names match, whatever their `raw` and `value`. Sets
/// and maps of terms therefore deduplicate by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TermFields")]
pub struct Term {
	pub name: String,
	pub raw: i32,
	pub value: f64,
}
impl Term {
	pub fn new(name: impl Into<String>, raw: i32, value: f64) -> Self {
		Self { name: name.into(), raw, value }
	}

	/// Scales `value` by `factor`. `raw` keeps counting contributions and is never rescaled.
	pub fn weight(&self, factor: f64) -> Self {
		Self { name: self.name.clone(), raw: self.raw, value: self.value * factor }
	}

	/// Sums `raw` and `value` of two terms sharing a name.
	///
	/// The caller guarantees the names match; the result always takes `self`'s name. `raw` wraps
	/// on overflow.
	pub fn merge_by_adding(&self, other: &Self) -> Self {
		Self {
			name: self.name.clone(),
			raw: self.raw.wrapping_add(other.raw),
			value: self.value + other.value,
		}
	}

	pub fn has_positive_value(&self) -> bool {
		self.value > 0.0
	}
}
impl PartialEq for Term {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name
	}
}
impl Eq for Term {}
impl Hash for Term {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.name.hash(state);
	}
}
impl From<&Term> for Term {
	fn from(term: &Term) -> Self {
		term.clone()
	}
}

/// Wire form of a term. A missing `value` falls back to `raw`.
#[derive(Deserialize)]
pub(crate) struct TermFields {
	name: String,
	raw: i32,
	#[serde(default)]
	value: Option<f64>,
}
impl From<TermFields> for Term {
	fn from(fields: TermFields) -> Self {
		let value = fields.value.unwrap_or(fields.raw as f64);

		Self { name: fields.name, raw: fields.raw, value }
	}
}
