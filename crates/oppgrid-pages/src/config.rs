//! Host configuration and change detection
//!
//! [`TableConfig`] holds every parameter the host passes to a table. The
//! controller compares successive configurations with [`TableConfig::diff`]
//! to decide what to recompute:
//!
//! | Changed field                      | Effect            |
//! |------------------------------------|-------------------|
//! | `columns`, `accountContext`        | re-parse columns  |
//! | any field of [`RecordQuery`]       | refetch records   |
//! | `pageSize`                         | re-paginate       |
//!
//! ## Example
//!
//! ```rust
//! use oppgrid_pages::config::TableConfig;
//!
//! let config = TableConfig::from_toml_str(r#"
//!     recordId = "001000000000001"
//!     accountContext = "Insured"
//!     columns = "Name, RelatedAccount, Amount"
//!     pageSize = 25
//! "#).unwrap();
//!
//! assert_eq!(config.page_size, 25);
//! ```

use crate::error::{GridError, GridResult};
use crate::server_fn::{RecordQuery, SortDirection};
use oppgrid_tables::pagination::DEFAULT_PAGE_SIZE;
use oppgrid_tables::{ColumnDefinition, ColumnSpec, RelationContext};
use serde::{Deserialize, Serialize};

/// What happens after a successful save
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SavePolicy {
	/// Reload the record set from the data source
	#[default]
	Refetch,
	/// Discard all client state and rebuild the table from scratch
	ForceReset,
}

/// How responses from overlapping loads are applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadOrdering {
	/// Every response is applied as it resolves; a superseded load that
	/// resolves late overwrites newer data
	#[default]
	LastResolved,
	/// Responses older than the last applied one are dropped
	LastRequested,
}

/// Table parameters supplied by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
	/// Account whose opportunities are listed (required)
	pub record_id: String,
	/// Which related account the `RelatedAccount` column reflects
	pub account_context: RelationContext,
	/// Pipeline filter
	pub pipeline_type: Option<String>,
	/// New business / renewal filter
	pub new_renewal_type: Option<String>,
	/// Stage filter
	pub stage_name: Option<String>,
	/// Only list opportunities with an expiry date
	pub require_expiry_date: bool,
	/// Only list opportunities with an inception date
	pub require_inception_date: bool,
	/// Field to sort by
	pub sort_field: Option<String>,
	/// Sort direction
	pub sort_direction: SortDirection,
	/// Column spec; blank or missing selects the default columns
	pub columns: Option<String>,
	/// Records per page
	pub page_size: usize,
	/// What happens after a successful save
	pub save_policy: SavePolicy,
	/// How overlapping loads are applied
	pub load_ordering: LoadOrdering,
}

impl Default for TableConfig {
	fn default() -> Self {
		Self {
			record_id: String::new(),
			account_context: RelationContext::default(),
			pipeline_type: None,
			new_renewal_type: None,
			stage_name: None,
			require_expiry_date: false,
			require_inception_date: false,
			sort_field: None,
			sort_direction: SortDirection::default(),
			columns: None,
			page_size: DEFAULT_PAGE_SIZE,
			save_policy: SavePolicy::default(),
			load_ordering: LoadOrdering::default(),
		}
	}
}

impl TableConfig {
	/// Creates a configuration for an account with default settings
	pub fn new(record_id: impl Into<String>) -> Self {
		Self {
			record_id: record_id.into(),
			..Self::default()
		}
	}

	/// Parses and validates a TOML configuration
	///
	/// # Errors
	///
	/// Returns [`GridError::Toml`] on malformed TOML and
	/// [`GridError::Config`] when validation fails.
	pub fn from_toml_str(text: &str) -> GridResult<Self> {
		let config: Self = toml::from_str(text)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks the required fields
	///
	/// # Errors
	///
	/// Returns [`GridError::Config`] for a blank `recordId` or a zero
	/// `pageSize`.
	pub fn validate(&self) -> GridResult<()> {
		if self.record_id.trim().is_empty() {
			return Err(GridError::Config("recordId is required".to_string()));
		}
		if self.page_size == 0 {
			return Err(GridError::Config(
				"pageSize must be greater than zero".to_string(),
			));
		}
		Ok(())
	}

	/// Sets the relation context
	pub fn with_account_context(mut self, context: RelationContext) -> Self {
		self.account_context = context;
		self
	}

	/// Sets the pipeline filter
	pub fn with_pipeline_type(mut self, pipeline_type: impl Into<String>) -> Self {
		self.pipeline_type = Some(pipeline_type.into());
		self
	}

	/// Sets the new business / renewal filter
	pub fn with_new_renewal_type(mut self, new_renewal_type: impl Into<String>) -> Self {
		self.new_renewal_type = Some(new_renewal_type.into());
		self
	}

	/// Sets the stage filter
	pub fn with_stage_name(mut self, stage_name: impl Into<String>) -> Self {
		self.stage_name = Some(stage_name.into());
		self
	}

	/// Sets the date requirements
	pub fn with_required_dates(mut self, expiry: bool, inception: bool) -> Self {
		self.require_expiry_date = expiry;
		self.require_inception_date = inception;
		self
	}

	/// Sets the sort field and direction
	pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
		self.sort_field = Some(field.into());
		self.sort_direction = direction;
		self
	}

	/// Sets the column spec
	pub fn with_columns(mut self, columns: impl Into<String>) -> Self {
		self.columns = Some(columns.into());
		self
	}

	/// Sets the page size
	pub fn with_page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size;
		self
	}

	/// Sets the post-save policy
	pub fn with_save_policy(mut self, policy: SavePolicy) -> Self {
		self.save_policy = policy;
		self
	}

	/// Sets the load ordering
	pub fn with_load_ordering(mut self, ordering: LoadOrdering) -> Self {
		self.load_ordering = ordering;
		self
	}

	/// Resolves the column spec under the current relation context
	pub fn column_definitions(&self) -> Vec<ColumnDefinition> {
		ColumnSpec::parse(self.columns.as_deref(), self.account_context)
	}

	/// Projects the read collaborator input
	pub fn load_query(&self) -> RecordQuery {
		RecordQuery {
			source_id: self.record_id.clone(),
			relation_context: self.account_context,
			pipeline_type: self.pipeline_type.clone(),
			new_renewal_type: self.new_renewal_type.clone(),
			stage_name: self.stage_name.clone(),
			require_expiry_date: self.require_expiry_date,
			require_inception_date: self.require_inception_date,
			sort_field: self.sort_field.clone(),
			sort_direction: self.sort_direction,
		}
	}

	/// Computes what must be recomputed when moving from `self` to `next`
	pub fn diff(&self, next: &TableConfig) -> ConfigChanges {
		let reparse_columns =
			self.columns != next.columns || self.account_context != next.account_context;
		let refetch = self.load_query() != next.load_query();
		let repaginate = !refetch && self.page_size != next.page_size;

		ConfigChanges {
			reparse_columns,
			refetch,
			repaginate,
		}
	}
}

/// Recomputations required by a configuration change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigChanges {
	/// Column definitions must be rebuilt
	pub reparse_columns: bool,
	/// Records must be fetched again
	pub refetch: bool,
	/// The loaded records must be re-paginated with the new page size
	pub repaginate: bool,
}

impl ConfigChanges {
	/// True when nothing needs recomputing
	pub fn is_empty(&self) -> bool {
		!self.reparse_columns && !self.refetch && !self.repaginate
	}
}
