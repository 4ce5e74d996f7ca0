//! Column spec interpreter
//!
//! A column spec is a comma-separated list of field tokens such as
//! `"Name, StageName, RelatedAccount, Amount, CloseDate"`. Each token is
//! resolved to a [`ColumnDefinition`] by a fixed precedence of rules, first
//! match wins:
//!
//! 1. `Name`: link to the record, text from the record's own name
//! 2. `RelatedAccount`: link to the broker or insured account, depending on
//!    the [`RelationContext`]
//! 3. `Broker`, `Insured`, `Owner`: link bound to that specific relationship
//! 4. `Amount`: editable currency column
//! 5. anything else: editable column bound to the literal field, with the
//!    render type inferred from the field name
//!
//! Parsing is pure: the same column spec and context always yield the same columns.

use super::definition::{ColumnDefinition, RenderType};
use crate::error::{Result, TableError};
use crate::record::{
	NAME_FIELD, RECORD_LINK, RELATED_ACCOUNT_LINK, RELATED_ACCOUNT_NAME, Relation, RelationContext,
};
use std::fmt;
use std::str::FromStr;

/// Token list substituted when the column string is missing, blank or malformed.
pub const DEFAULT_COLUMNS: &str = "Name, StageName, RelatedAccount, Amount, CloseDate";

const NAME_ALIAS: &str = "Name";
const RELATED_ACCOUNT_ALIAS: &str = "RelatedAccount";
const CURRENCY_ALIAS: &str = "Amount";
const CURRENCY_LABEL: &str = "Amount";
const NAME_LABEL: &str = "Opportunity Name";

/// An ordered list of column tokens.
///
/// Token order defines column order; duplicates are kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
	tokens: Vec<String>,
}

impl ColumnSpec {
	/// Parses a column string strictly.
	///
	/// # Errors
	///
	/// Returns [`TableError::ColumnSpec`] when the column string holds no tokens or any
	/// token is not a field identifier (letters, digits, `_` and `.`,
	/// starting with a letter).
	pub fn try_from_str(raw: &str) -> Result<Self> {
		let tokens: Vec<String> = raw
			.split(',')
			.map(str::trim)
			.filter(|t| !t.is_empty())
			.map(str::to_string)
			.collect();

		if tokens.is_empty() || !tokens.iter().all(|t| is_field_identifier(t)) {
			return Err(TableError::ColumnSpec(raw.to_string()));
		}

		Ok(Self { tokens })
	}

	/// Parses a column spec leniently, substituting [`DEFAULT_COLUMNS`] when the
	/// column spec is missing, blank or malformed.
	pub fn from_raw(raw: Option<&str>) -> Self {
		let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
			return Self::default();
		};

		match Self::try_from_str(raw) {
			Ok(spec) => spec,
			Err(e) => {
				tracing::warn!(error = %e, "Falling back to default column spec");
				Self::default()
			}
		}
	}

	/// Parses a column spec leniently and resolves it under a relation context
	///
	/// # Example
	///
	/// ```rust
	/// use oppgrid_tables::{ColumnSpec, RelationContext};
	///
	/// let columns = ColumnSpec::parse(None, RelationContext::Insured);
	/// assert_eq!(columns[2].label, "Insured Account");
	/// ```
	pub fn parse(raw: Option<&str>, context: RelationContext) -> Vec<ColumnDefinition> {
		Self::from_raw(raw).columns(context)
	}

	/// Parses a column spec strictly and resolves it under a relation context
	///
	/// # Errors
	///
	/// See [`ColumnSpec::try_from_str`].
	pub fn try_parse(raw: &str, context: RelationContext) -> Result<Vec<ColumnDefinition>> {
		Ok(Self::try_from_str(raw)?.columns(context))
	}

	/// Returns the tokens in order
	pub fn tokens(&self) -> &[String] {
		&self.tokens
	}

	/// Resolves every token to a column definition, preserving order
	pub fn columns(&self, context: RelationContext) -> Vec<ColumnDefinition> {
		self.tokens.iter().map(|t| resolve(t, context)).collect()
	}
}

impl Default for ColumnSpec {
	fn default() -> Self {
		Self {
			tokens: DEFAULT_COLUMNS
				.split(',')
				.map(|t| t.trim().to_string())
				.collect(),
		}
	}
}

impl FromStr for ColumnSpec {
	type Err = TableError;

	fn from_str(s: &str) -> Result<Self> {
		Self::try_from_str(s)
	}
}

impl fmt::Display for ColumnSpec {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.tokens.join(", "))
	}
}

/// Resolves a single token to its column definition.
pub fn resolve(token: &str, context: RelationContext) -> ColumnDefinition {
	if token == NAME_ALIAS {
		return ColumnDefinition::url(NAME_LABEL, RECORD_LINK, NAME_FIELD);
	}

	if token == RELATED_ACCOUNT_ALIAS {
		return ColumnDefinition::url(
			context.related_account_label(),
			RELATED_ACCOUNT_LINK,
			RELATED_ACCOUNT_NAME,
		);
	}

	if let Some(relation) = Relation::from_alias(token) {
		return ColumnDefinition::url(relation.label(), relation.link_key(), relation.name_key());
	}

	if token == CURRENCY_ALIAS {
		return ColumnDefinition::field(CURRENCY_LABEL, CURRENCY_ALIAS, RenderType::Currency);
	}

	ColumnDefinition::field(humanize(token), token, RenderType::infer(token))
}

fn is_field_identifier(token: &str) -> bool {
	let mut chars = token.chars();
	chars.next().is_some_and(|c| c.is_ascii_alphabetic())
		&& chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// Derives a column header from a field name.
///
/// Drops a trailing `__c`, turns `_` and `.` into spaces and splits
/// camel-case words: `StageName` becomes `Stage Name`.
pub fn humanize(field: &str) -> String {
	let base = field.strip_suffix("__c").unwrap_or(field);
	let chars: Vec<char> = base.chars().collect();
	let mut out = String::with_capacity(base.len() + 4);

	for (i, &c) in chars.iter().enumerate() {
		if c == '_' || c == '.' {
			if !out.is_empty() && !out.ends_with(' ') {
				out.push(' ');
			}
			continue;
		}

		if i > 0 && c.is_uppercase() && !out.is_empty() && !out.ends_with(' ') {
			let prev = chars[i - 1];
			let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
			if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
				out.push(' ');
			}
		}

		out.push(c);
	}

	let label = out.trim_end();
	if label.is_empty() {
		field.to_string()
	} else {
		label.to_string()
	}
}
