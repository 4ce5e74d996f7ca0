//! Record model: raw records from the data source, display records for the
//! rendering layer, and the relationships that link them to accounts.

use crate::error::TableError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Field holding a record's identifier.
pub const ID_FIELD: &str = "Id";
/// Field holding a record's own display name.
pub const NAME_FIELD: &str = "Name";
/// Derived navigation path to the record itself.
pub const RECORD_LINK: &str = "recordLink";
/// Derived navigation path to the context-selected related account.
pub const RELATED_ACCOUNT_LINK: &str = "relatedAccountLink";
/// Derived display name of the context-selected related account.
pub const RELATED_ACCOUNT_NAME: &str = "relatedAccountName";

/// Builds the navigation path for a record identifier.
///
/// A missing or blank identifier yields `None` so callers can tell "no link"
/// apart from a link to the root path.
pub fn navigation_path(id: Option<&str>) -> Option<String> {
	match id.map(str::trim) {
		Some(id) if !id.is_empty() => Some(format!("/{}", id)),
		_ => None,
	}
}

fn non_blank_str(value: Option<&Value>) -> Option<&str> {
	value
		.and_then(Value::as_str)
		.filter(|s| !s.trim().is_empty())
}

/// A record exactly as returned by the data source.
///
/// Relationship fields are nested objects carrying at least `Id` and `Name`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(Map<String, Value>);

impl RawRecord {
	/// Creates an empty record
	pub fn new() -> Self {
		Self(Map::new())
	}

	/// Wraps an existing field map
	pub fn from_fields(fields: Map<String, Value>) -> Self {
		Self(fields)
	}

	/// Converts a JSON value into a record, returning `None` unless it is an object
	pub fn from_value(value: Value) -> Option<Self> {
		match value {
			Value::Object(fields) => Some(Self(fields)),
			_ => None,
		}
	}

	/// Sets a field, returning the record (builder style)
	pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(field.into(), value.into());
		self
	}

	/// Returns the record identifier when present and non-blank
	pub fn id(&self) -> Option<&str> {
		non_blank_str(self.0.get(ID_FIELD))
	}

	/// Returns a field value
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.0.get(field)
	}

	/// Returns a nested relationship object, if the field holds one
	pub fn relationship(&self, field: &str) -> Option<&Map<String, Value>> {
		self.0.get(field).and_then(Value::as_object)
	}

	/// Returns all fields
	pub fn fields(&self) -> &Map<String, Value> {
		&self.0
	}

	/// Consumes the record, returning its fields
	pub fn into_fields(self) -> Map<String, Value> {
		self.0
	}
}

/// A raw record plus the derived fields the rendering layer binds to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayRecord(Map<String, Value>);

impl DisplayRecord {
	pub(crate) fn from_fields(fields: Map<String, Value>) -> Self {
		Self(fields)
	}

	/// Returns the record identifier when present and non-blank
	pub fn id(&self) -> Option<&str> {
		non_blank_str(self.0.get(ID_FIELD))
	}

	/// Returns a field value, original or derived
	pub fn get(&self, field: &str) -> Option<&Value> {
		self.0.get(field)
	}

	/// Overwrites a field value
	pub fn set(&mut self, field: impl Into<String>, value: Value) {
		self.0.insert(field.into(), value);
	}

	/// Returns all fields
	pub fn fields(&self) -> &Map<String, Value> {
		&self.0
	}
}

/// A relationship from an opportunity to an account or user.
///
/// Each relationship has its own derived link/name keys so that several
/// relationship columns can appear in one table without colliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Relation {
	/// Broker account relationship
	Broker,
	/// Insured account relationship
	Insured,
	/// Record owner
	Owner,
}

impl Relation {
	/// All known relationships, in column-alias order
	pub const ALL: [Relation; 3] = [Relation::Broker, Relation::Insured, Relation::Owner];

	/// The column spec token selecting this relationship
	pub fn alias(&self) -> &'static str {
		match self {
			Self::Broker => "Broker",
			Self::Insured => "Insured",
			Self::Owner => "Owner",
		}
	}

	/// Column header for this relationship
	pub fn label(&self) -> &'static str {
		match self {
			Self::Broker => "Broker Account",
			Self::Insured => "Insured Account",
			Self::Owner => "Owner",
		}
	}

	/// Lookup field holding the related identifier
	pub fn id_field(&self) -> &'static str {
		match self {
			Self::Broker => "Broker__c",
			Self::Insured => "Insured__c",
			Self::Owner => "OwnerId",
		}
	}

	/// Field holding the nested related object
	pub fn relationship_field(&self) -> &'static str {
		match self {
			Self::Broker => "Broker__r",
			Self::Insured => "Insured__r",
			Self::Owner => "Owner",
		}
	}

	/// Derived key holding the navigation path
	pub fn link_key(&self) -> &'static str {
		match self {
			Self::Broker => "brokerLink",
			Self::Insured => "insuredLink",
			Self::Owner => "ownerLink",
		}
	}

	/// Derived key holding the display name
	pub fn name_key(&self) -> &'static str {
		match self {
			Self::Broker => "brokerName",
			Self::Insured => "insuredName",
			Self::Owner => "ownerName",
		}
	}

	/// Resolves a column token to a relationship alias (exact match)
	pub fn from_alias(token: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|r| r.alias() == token)
	}

	/// Reads the related identifier from a record.
	///
	/// The lookup field wins; the nested object's `Id` is the fallback.
	pub fn related_id<'a>(&self, record: &'a RawRecord) -> Option<&'a str> {
		non_blank_str(record.get(self.id_field())).or_else(|| {
			record
				.relationship(self.relationship_field())
				.and_then(|rel| non_blank_str(rel.get(ID_FIELD)))
		})
	}

	/// Reads the related display name from the nested object
	pub fn related_name<'a>(&self, record: &'a RawRecord) -> Option<&'a str> {
		record
			.relationship(self.relationship_field())
			.and_then(|rel| rel.get(NAME_FIELD))
			.and_then(Value::as_str)
	}
}

impl fmt::Display for Relation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.alias())
	}
}

/// Which related account the `RelatedAccount` column reflects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationContext {
	/// Surface the broker account
	#[default]
	#[serde(alias = "broker", alias = "BROKER")]
	Broker,
	/// Surface the insured account
	#[serde(alias = "insured", alias = "INSURED")]
	Insured,
}

impl RelationContext {
	/// The relationship this context selects
	pub fn relation(&self) -> Relation {
		match self {
			Self::Broker => Relation::Broker,
			Self::Insured => Relation::Insured,
		}
	}

	/// Header of the `RelatedAccount` column under this context
	pub fn related_account_label(&self) -> &'static str {
		self.relation().label()
	}

	/// Returns the string representation of the context
	pub fn as_str(&self) -> &'static str {
		self.relation().alias()
	}
}

impl FromStr for RelationContext {
	type Err = TableError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"broker" => Ok(Self::Broker),
			"insured" => Ok(Self::Insured),
			_ => Err(TableError::UnknownRelationContext(s.to_string())),
		}
	}
}

impl fmt::Display for RelationContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
