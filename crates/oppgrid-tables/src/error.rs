//! Error types for the tables layer.

use thiserror::Error;

/// Errors raised while building table metadata or page state.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
	/// The column spec contained no usable tokens.
	#[error("Invalid column spec: {0:?}")]
	ColumnSpec(String),

	/// A page size of zero was requested.
	#[error("Invalid page size: {0} (must be greater than zero)")]
	InvalidPageSize(usize),

	/// The relation context name is not recognised.
	#[error("Unknown relation context: {0}")]
	UnknownRelationContext(String),
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
