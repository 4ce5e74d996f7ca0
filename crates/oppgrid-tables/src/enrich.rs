//! Record enrichment
//!
//! Projects each [`RawRecord`] into a [`DisplayRecord`] carrying every original
//! field plus derived navigation links and relationship display names. Derived
//! fields win on key collision. Absent identifiers and relationship objects
//! produce explicit JSON `null`s, never empty strings or missing keys.

use crate::column::{ColumnDefinition, requested_relations};
use crate::record::{
	DisplayRecord, RECORD_LINK, RELATED_ACCOUNT_LINK, RELATED_ACCOUNT_NAME, RawRecord, Relation,
	RelationContext, navigation_path,
};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Derives display fields for raw records under a relation context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordEnricher {
	context: RelationContext,
	relations: BTreeSet<Relation>,
}

impl RecordEnricher {
	/// Creates an enricher deriving the record link and the context-selected
	/// related account
	pub fn new(context: RelationContext) -> Self {
		Self {
			context,
			relations: BTreeSet::new(),
		}
	}

	/// Creates an enricher that also derives every relationship the columns
	/// bind to
	pub fn for_columns(context: RelationContext, columns: &[ColumnDefinition]) -> Self {
		Self {
			context,
			relations: requested_relations(columns),
		}
	}

	/// Adds a relationship whose own link/name pair should be derived
	pub fn with_relation(mut self, relation: Relation) -> Self {
		self.relations.insert(relation);
		self
	}

	/// The relation context in use
	pub fn context(&self) -> RelationContext {
		self.context
	}

	/// Relationships derived in addition to the related account
	pub fn relations(&self) -> &BTreeSet<Relation> {
		&self.relations
	}

	/// Enriches one record
	pub fn enrich_one(&self, raw: &RawRecord) -> DisplayRecord {
		self.project(raw, raw.fields().clone())
	}

	/// Enriches a record set, preserving order one-to-one
	pub fn enrich(&self, raws: &[RawRecord]) -> Vec<DisplayRecord> {
		raws.iter().map(|raw| self.enrich_one(raw)).collect()
	}

	fn project(&self, raw: &RawRecord, mut fields: Map<String, Value>) -> DisplayRecord {
		fields.insert(RECORD_LINK.to_string(), link_value(raw.id()));

		let related = self.context.relation();
		fields.insert(
			RELATED_ACCOUNT_LINK.to_string(),
			link_value(related.related_id(raw)),
		);
		fields.insert(
			RELATED_ACCOUNT_NAME.to_string(),
			name_value(related.related_name(raw)),
		);

		for relation in &self.relations {
			fields.insert(
				relation.link_key().to_string(),
				link_value(relation.related_id(raw)),
			);
			fields.insert(
				relation.name_key().to_string(),
				name_value(relation.related_name(raw)),
			);
		}

		DisplayRecord::from_fields(fields)
	}
}

fn link_value(id: Option<&str>) -> Value {
	navigation_path(id).map_or(Value::Null, Value::String)
}

fn name_value(name: Option<&str>) -> Value {
	name.map_or(Value::Null, |n| Value::String(n.to_string()))
}
