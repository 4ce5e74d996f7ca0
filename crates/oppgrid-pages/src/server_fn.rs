//! Remote collaborators
//!
//! The table never talks to a backend directly. It reads records through a
//! [`RecordSource`] and persists inline edits through a [`RecordSink`]. Both
//! report failures as a structured [`RemoteError`].
//!
//! ## Example
//!
//! ```ignore
//! use async_trait::async_trait;
//! use oppgrid_pages::server_fn::{RecordQuery, RecordSource};
//! use oppgrid_tables::{RawRecord, RemoteError};
//!
//! struct ApexSource { /* http client */ }
//!
//! #[async_trait]
//! impl RecordSource for ApexSource {
//!     async fn fetch(&self, query: &RecordQuery) -> Result<Vec<RawRecord>, RemoteError> {
//!         // POST the query, decode the records
//!         todo!()
//!     }
//! }
//! ```

use crate::drafts::DraftEdit;
use async_trait::async_trait;
use oppgrid_tables::{RawRecord, RelationContext, RemoteError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction requested from the data source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
	/// Ascending order
	#[default]
	#[serde(rename = "asc", alias = "ASC", alias = "ascending")]
	Ascending,
	/// Descending order
	#[serde(rename = "desc", alias = "DESC", alias = "descending")]
	Descending,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	/// Returns the wire representation
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Ascending => "asc",
			Self::Descending => "desc",
		}
	}
}

impl fmt::Display for SortDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Input of the read collaborator.
///
/// Every field is part of the load dependency set: a change to any of them
/// triggers a refetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordQuery {
	/// Account the opportunities hang off
	pub source_id: String,
	/// Which related account relationship to filter through
	pub relation_context: RelationContext,
	/// Pipeline filter
	pub pipeline_type: Option<String>,
	/// New business / renewal filter
	pub new_renewal_type: Option<String>,
	/// Stage filter
	pub stage_name: Option<String>,
	/// Only opportunities with an expiry date
	pub require_expiry_date: bool,
	/// Only opportunities with an inception date
	pub require_inception_date: bool,
	/// Field to sort by
	pub sort_field: Option<String>,
	/// Sort direction
	pub sort_direction: SortDirection,
}

/// Read collaborator: executes a query and returns raw records in order
#[async_trait]
pub trait RecordSource: Send + Sync {
	/// Fetches the records matching `query`
	async fn fetch(&self, query: &RecordQuery) -> Result<Vec<RawRecord>, RemoteError>;
}

/// Write collaborator: persists a batch of inline edits
#[async_trait]
pub trait RecordSink: Send + Sync {
	/// Saves every edit in one batch
	async fn save(&self, edits: &[DraftEdit]) -> Result<(), RemoteError>;
}
