//! Per-document collections of tags or annotations, stored and served as one JSON object.
//!
//! Wire shape: `{"oid": <owner, omitted for shared collections>, "docId": ..., <items>: [...],
//! "total": <item count>}` where `<items>` is `annotations` or `tags`. `total` is derived and
//! ignored when reading.

use std::{fmt, marker::PhantomData};

use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::{self, DeserializeOwned, IgnoredAny, MapAccess, Visitor},
	ser::SerializeStruct,
};

use crate::{Annotation, Tag, Term};

mod sealed {
	pub trait Sealed {}

	impl Sealed for crate::Tag {}
	impl Sealed for crate::Annotation {}
}

/// The closed set of term variants a document collection can hold.
pub trait TermVariant
where
	Self: sealed::Sealed + Clone + PartialEq + Serialize + DeserializeOwned,
{
	/// JSON key holding the items of a collection of this variant.
	const ITEMS_KEY: &'static str;

	fn term(&self) -> &Term;
}
impl TermVariant for Tag {
	const ITEMS_KEY: &'static str = "tags";

	fn term(&self) -> &Term {
		Tag::term(self)
	}
}
impl TermVariant for Annotation {
	const ITEMS_KEY: &'static str = "annotations";

	fn term(&self) -> &Term {
		Annotation::term(self)
	}
}

pub type DocumentAnnotations = DocumentTerms<Annotation>;
pub type DocumentTags = DocumentTerms<Tag>;

/// Items contributed to one document, by one owner or shared (`owner_id == None`).
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTerms<T> {
	pub owner_id: Option<String>,
	pub document_id: String,
	pub items: Vec<T>,
}
impl<T> DocumentTerms<T>
where
	T: TermVariant,
{
	pub fn new(owner_id: Option<String>, document_id: impl Into<String>, items: Vec<T>) -> Self {
		Self { owner_id, document_id: document_id.into(), items }
	}

	pub fn empty(owner_id: Option<&str>, document_id: &str) -> Self {
		Self::new(owner_id.map(str::to_string), document_id, Vec::new())
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn terms(&self) -> impl Iterator<Item = &Term> {
		self.items.iter().map(TermVariant::term)
	}

	/// Same owner and document, different items.
	pub fn with_items(&self, items: Vec<T>) -> Self {
		Self { owner_id: self.owner_id.clone(), document_id: self.document_id.clone(), items }
	}
}
impl<T> Serialize for DocumentTerms<T>
where
	T: TermVariant,
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut state = serializer.serialize_struct("DocumentTerms", 4)?;

		match &self.owner_id {
			Some(owner_id) => state.serialize_field("oid", owner_id)?,
			None => state.skip_field("oid")?,
		}

		state.serialize_field("docId", &self.document_id)?;
		state.serialize_field(T::ITEMS_KEY, &self.items)?;
		state.serialize_field("total", &self.items.len())?;

		state.end()
	}
}
impl<'de, T> Deserialize<'de> for DocumentTerms<T>
where
	T: TermVariant,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_map(DocumentTermsVisitor(PhantomData))
	}
}

struct DocumentTermsVisitor<T>(PhantomData<T>);
impl<'de, T> Visitor<'de> for DocumentTermsVisitor<T>
where
	T: TermVariant,
{
	type Value = DocumentTerms<T>;

	fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(formatter, "a document object with `docId` and a `{}` array", T::ITEMS_KEY)
	}

	fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
	where
		A: MapAccess<'de>,
	{
		let mut owner_id = None;
		let mut document_id = None;
		let mut items = None;

		while let Some(key) = map.next_key::<String>()? {
			match key.as_str() {
				"oid" => owner_id = map.next_value::<Option<String>>()?,
				"docId" => document_id = Some(map.next_value::<String>()?),
				key if key == T::ITEMS_KEY => items = Some(map.next_value::<Vec<T>>()?),
				_ => {
					map.next_value::<IgnoredAny>()?;
				},
			}
		}

		let document_id = document_id.ok_or_else(|| de::Error::missing_field("docId"))?;
		let items = items.ok_or_else(|| de::Error::missing_field(T::ITEMS_KEY))?;

		Ok(DocumentTerms { owner_id, document_id, items })
	}
}

/// Everything one owner has annotated, across documents.
#[derive(Debug, Clone, PartialEq)]
pub struct UserAnnotations {
	pub owner_id: String,
	pub documents: Vec<DocumentAnnotations>,
}
impl UserAnnotations {
	pub fn total(&self) -> usize {
		self.documents.iter().map(DocumentTerms::len).sum()
	}
}
impl Serialize for UserAnnotations {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut state = serializer.serialize_struct("UserAnnotations", 3)?;

		state.serialize_field("oid", &self.owner_id)?;
		state.serialize_field("total", &self.total())?;
		state.serialize_field("annotations", &self.documents)?;

		state.end()
	}
}
