//! Column definition type

use crate::record::Relation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How a column's cells are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderType {
	/// Plain text
	Text,
	/// Currency amount
	Currency,
	/// Calendar date
	Date,
	/// Navigation link; the visible text comes from `url_target_field`
	Url,
}

impl RenderType {
	/// Returns the string representation of the render type
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Currency => "currency",
			Self::Date => "date",
			Self::Url => "url",
		}
	}

	/// Infers a render type from a field name.
	///
	/// Case-insensitive substring match: `date` wins over `amount`/`premium`.
	pub fn infer(field_name: &str) -> Self {
		let lower = field_name.to_lowercase();
		if lower.contains("date") {
			Self::Date
		} else if lower.contains("amount") || lower.contains("premium") {
			Self::Currency
		} else {
			Self::Text
		}
	}
}

/// Render and edit metadata for one table column
///
/// Built by [`ColumnSpec`](super::ColumnSpec); immutable once built for a
/// given configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
	/// Column header
	pub label: String,
	/// Record field the cell value is read from
	pub data_key: String,
	/// How the cell is rendered
	pub render_type: RenderType,
	/// Whether the cell accepts inline edits
	pub editable: bool,
	/// For url columns, the field holding the link text
	#[serde(skip_serializing_if = "Option::is_none")]
	pub url_target_field: Option<String>,
}

impl ColumnDefinition {
	/// Creates a non-editable url column
	pub fn url(
		label: impl Into<String>,
		data_key: impl Into<String>,
		url_target_field: impl Into<String>,
	) -> Self {
		Self {
			label: label.into(),
			data_key: data_key.into(),
			render_type: RenderType::Url,
			editable: false,
			url_target_field: Some(url_target_field.into()),
		}
	}

	/// Creates an editable column bound directly to a record field
	pub fn field(
		label: impl Into<String>,
		data_key: impl Into<String>,
		render_type: RenderType,
	) -> Self {
		Self {
			label: label.into(),
			data_key: data_key.into(),
			render_type,
			editable: true,
			url_target_field: None,
		}
	}

	/// Sets whether the column is editable
	pub fn editable(mut self, editable: bool) -> Self {
		self.editable = editable;
		self
	}

	/// Returns true when the column is rendered as a link
	pub fn is_url(&self) -> bool {
		self.render_type == RenderType::Url
	}
}

/// Relationships whose derived link/name fields a column set binds to.
///
/// The enricher uses this to derive only what the columns need, in addition
/// to the context-selected related account it always derives.
pub fn requested_relations(columns: &[ColumnDefinition]) -> BTreeSet<Relation> {
	columns
		.iter()
		.filter(|c| c.is_url())
		.filter_map(|c| Relation::ALL.into_iter().find(|r| r.link_key() == c.data_key))
		.collect()
}
