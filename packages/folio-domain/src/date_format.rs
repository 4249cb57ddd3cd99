//! Annotation timestamps on the wire: `yyyy-MM-dd HH:mm:ss UTC`, always in UTC.

pub mod option;

use serde::{Deserialize, Deserializer, Serializer};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset, macros::format_description};

pub fn format(value: &OffsetDateTime) -> Result<String, time::error::Format> {
	value
		.to_offset(UtcOffset::UTC)
		.format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC"))
}

pub fn parse(raw: &str) -> Result<OffsetDateTime, time::error::Parse> {
	PrimitiveDateTime::parse(
		raw,
		format_description!("[year]-[month]-[day] [hour]:[minute]:[second] UTC"),
	)
	.map(PrimitiveDateTime::assume_utc)
}

pub fn serialize<S>(value: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	let formatted = format(value).map_err(serde::ser::Error::custom)?;

	serializer.serialize_str(&formatted)
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;

	parse(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	#[test]
	fn formats_in_utc() {
		let value = datetime!(2016-05-04 13:30:05 +01:00);

		assert_eq!(format(&value).expect("Format must succeed."), "2016-05-04 12:30:05 UTC");
	}

	#[test]
	fn parses_back_to_same_instant() {
		let parsed = parse("2016-05-04 12:30:05 UTC").expect("Parse must succeed.");

		assert_eq!(parsed, datetime!(2016-05-04 12:30:05 UTC));
	}

	#[test]
	fn rejects_other_layouts() {
		assert!(parse("2016-05-04T12:30:05Z").is_err());
	}
}
