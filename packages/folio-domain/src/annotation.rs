use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::Term;

/// Target of annotations that describe a whole page rather than a region of it.
pub const DOC_TARGET: &str = "doc";

/// A user's term pinned to a page, or to a region of a page.
///
/// Equality depends on the target. Two page-level annotations (`target == "doc"`) collide when
/// they share `page` and `type`; the term name and position are ignored. Any other pair collides
/// only when `name`, `page`, `target`, `type` and `position` all match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Annotation {
	#[serde(flatten)]
	term: Term,
	pub target: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub page: i32,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub uuid: Option<Uuid>,
	#[serde(
		default,
		skip_serializing_if = "Option::is_none",
		with = "crate::date_format::option"
	)]
	pub date: Option<OffsetDateTime>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub position: Option<Position>,
}
impl Annotation {
	pub fn new(term: Term, target: impl Into<String>, kind: impl Into<String>, page: i32) -> Self {
		Self {
			term,
			target: target.into(),
			kind: kind.into(),
			page,
			uuid: None,
			date: None,
			position: None,
		}
	}

	pub fn with_position(mut self, position: Position) -> Self {
		self.position = Some(position);

		self
	}

	/// Replaces identity and timestamp, whatever the annotation carried before.
	pub fn stamped(mut self, uuid: Uuid, date: OffsetDateTime) -> Self {
		self.uuid = Some(uuid);
		self.date = Some(date);

		self
	}

	pub fn name(&self) -> &str {
		&self.term.name
	}

	pub fn term(&self) -> &Term {
		&self.term
	}

	pub fn targets_page(&self) -> bool {
		self.target == DOC_TARGET
	}
}
impl PartialEq for Annotation {
	fn eq(&self, other: &Self) -> bool {
		if self.targets_page() && other.targets_page() {
			return self.page == other.page && self.kind == other.kind;
		}

		self.term.name == other.term.name
			&& self.page == other.page
			&& self.target == other.target
			&& self.kind == other.kind
			&& self.position == other.position
	}
}
impl From<Annotation> for Term {
	fn from(annotation: Annotation) -> Self {
		annotation.term
	}
}
impl From<&Annotation> for Term {
	fn from(annotation: &Annotation) -> Self {
		annotation.term.clone()
	}
}

/// Shape drawn on the page, as an ordered list of points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
	#[serde(rename = "type")]
	pub kind: String,
	pub coordinates: Vec<Point>,
}
impl Position {
	pub fn new(kind: impl Into<String>, coordinates: Vec<Point>) -> Self {
		Self { kind: kind.into(), coordinates }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}
impl Point {
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn annotation(name: &str, target: &str, kind: &str, page: i32) -> Annotation {
		Annotation::new(Term::new(name, 1, 1.0), target, kind, page)
	}

	fn square(offset: f64) -> Position {
		Position::new(
			"polygon",
			vec![
				Point::new(offset, offset),
				Point::new(offset + 10.0, offset),
				Point::new(offset + 10.0, offset + 10.0),
			],
		)
	}

	#[test]
	fn page_annotations_ignore_name_and_position() {
		let a = annotation("Cambridge", "doc", "t1", 5).with_position(square(0.0));
		let b = annotation("Oxford", "doc", "t1", 5).with_position(square(3.0));

		assert_eq!(a, b);
		assert_ne!(a, annotation("Cambridge", "doc", "t2", 5));
		assert_ne!(a, annotation("Cambridge", "doc", "t1", 6));
	}

	#[test]
	fn region_annotations_compare_every_field() {
		let a = annotation("Cambridge", "region", "t1", 5).with_position(square(0.0));

		assert_eq!(a, annotation("Cambridge", "region", "t1", 5).with_position(square(0.0)));
		assert_ne!(a, annotation("Oxford", "region", "t1", 5).with_position(square(0.0)));
		assert_ne!(a, annotation("Cambridge", "region", "t1", 5).with_position(square(1.0)));
		assert_ne!(a, annotation("Cambridge", "region", "t1", 5));
	}

	#[test]
	fn mixed_targets_use_full_comparison() {
		let page = annotation("Cambridge", "doc", "t1", 5);
		let region = annotation("Cambridge", "region", "t1", 5);

		assert_ne!(page, region);
	}

	#[test]
	fn stamping_overrides_identity() {
		let first = Uuid::new_v4();
		let second = Uuid::new_v4();
		let now = OffsetDateTime::now_utc();
		let stamped = annotation("x", "doc", "t", 1).stamped(first, now).stamped(second, now);

		assert_eq!(stamped.uuid, Some(second));
		assert_eq!(stamped.date, Some(now));
	}
}
