//! Error types for the controller layer.

use oppgrid_tables::{RemoteError, TableError};
use thiserror::Error;

/// Errors surfaced by configuration handling and remote round trips.
///
/// Load and save failures never escape the controller as hard errors; they
/// degrade to an empty or retained state plus a notification.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GridError {
	/// The read collaborator failed.
	#[error("Load failed: {0}")]
	Load(RemoteError),

	/// The write collaborator failed.
	#[error("Save failed: {0}")]
	Save(RemoteError),

	/// The host configuration is unusable.
	#[error("Invalid configuration: {0}")]
	Config(String),

	/// The configuration file could not be parsed.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Column or page state could not be built.
	#[error(transparent)]
	Table(#[from] TableError),
}

/// Result type alias for controller operations.
pub type GridResult<T> = Result<T, GridError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_save_error_uses_reduced_message() {
		let error = GridError::Save(RemoteError::details(["A", "B"]));
		assert_eq!(error.to_string(), "Save failed: A, B");
	}

	#[rstest]
	fn test_table_error_is_transparent() {
		let error: GridError = TableError::InvalidPageSize(0).into();
		assert_eq!(
			error.to_string(),
			"Invalid page size: 0 (must be greater than zero)"
		);
	}
}
