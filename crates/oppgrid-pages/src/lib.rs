//! Controller layer for oppgrid tables
//!
//! This crate drives an opportunity table over the synchronous data layer in
//! `oppgrid-tables`. It loads records through a remote [`RecordSource`],
//! tracks inline edits as drafts, persists them through a [`RecordSink`], and
//! reports outcomes to the host as [`Notification`]s.
//!
//! # Features
//!
//! - **Configuration**: camelCase host parameters, loadable from TOML, with
//!   change detection deciding between re-parse, refetch and re-paginate
//! - **Draft Reconciliation**: one draft per cell, batch save, retry on failure
//! - **Loading Flag**: raised for a whole save including its reload
//! - **Load Ordering**: last-resolved (default) or last-requested responses
//! - **Save Policy**: refetch after save, or rebuild the table from scratch
//!
//! # Architecture
//!
//! ```text
//! TableConfig ──► TableController ──► RecordSource::fetch ──► RecordEnricher ──► PaginationState
//!                       │                                                            │
//!                       ├── EditReconciler ──► RecordSink::save                      │
//!                       │         └── Notifier                                       ▼
//!                       └──────────────────────────────────────────────────────► TableView
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod controller;
pub mod drafts;
pub mod error;
pub mod messages;
pub mod server_fn;

// Re-exports for convenience
pub use config::{ConfigChanges, LoadOrdering, SavePolicy, TableConfig};
pub use controller::{LoadOutcome, SaveOutcome, TableController, TableView};
pub use drafts::{DraftEdit, EditReconciler, LoadingFlag};
pub use error::{GridError, GridResult};
pub use messages::{Level, MemoryNotifier, Notification, Notifier};
pub use server_fn::{RecordQuery, RecordSink, RecordSource, SortDirection};

/// Commonly used types
pub mod prelude {
	pub use crate::config::{LoadOrdering, SavePolicy, TableConfig};
	pub use crate::controller::{LoadOutcome, SaveOutcome, TableController, TableView};
	pub use crate::drafts::DraftEdit;
	pub use crate::messages::{MemoryNotifier, Notification, Notifier};
	pub use crate::server_fn::{RecordQuery, RecordSink, RecordSource, SortDirection};
	pub use oppgrid_tables::{
		ColumnDefinition, DisplayRecord, RawRecord, RelationContext, RemoteError,
	};
}
