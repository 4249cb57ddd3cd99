use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of contribution a term comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TermType {
	/// Terms mined from the document's metadata.
	Tag,
	/// Terms from annotations created by users.
	Annotation,
	/// Tags users marked as unhelpful. Weighted negatively.
	RemovedTag,
}
impl TermType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Tag => "TAG",
			Self::Annotation => "ANNOTATION",
			Self::RemovedTag => "REMOVED_TAG",
		}
	}
}
impl fmt::Display for TermType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
