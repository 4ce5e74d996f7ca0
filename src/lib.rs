//! # oppgrid
//!
//! Column-spec driven, paginated and inline-editable opportunity tables.
//!
//! A host hands oppgrid a compact column spec such as
//! `"Name, StageName, RelatedAccount, Amount, CloseDate"`, a set of query
//! filters and two remote collaborators: one that fetches raw records and one
//! that persists inline edits. oppgrid resolves the columns, derives the
//! navigation links and relationship names each record needs, pages the
//! result, and reconciles pending edits with the write collaborator.
//!
//! ## Feature Flags
//!
//! - `pages` (default) - Async controller, draft reconciliation and
//!   collaborator traits
//!
//! Without `pages` only the synchronous data layer in [`tables`] is built.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use oppgrid::prelude::*;
//! use std::sync::Arc;
//!
//! let config = TableConfig::new("001000000000001")
//!     .with_account_context(RelationContext::Insured)
//!     .with_columns("Name, RelatedAccount, Amount");
//!
//! let controller = TableController::new(config, source, sink, Arc::new(MemoryNotifier::new()))?;
//! controller.load().await;
//!
//! let view = controller.view();
//! for record in &view.records {
//!     println!("{:?}", record.get("relatedAccountName"));
//! }
//! ```

pub mod tables;

#[cfg(feature = "pages")]
pub mod pages;

/// Commonly used types
pub mod prelude {
	pub use crate::tables::{
		ColumnDefinition, ColumnSpec, DisplayRecord, PaginationState, RawRecord, RecordEnricher,
		Relation, RelationContext, RemoteError, RenderType, reduce_error,
	};

	#[cfg(feature = "pages")]
	pub use crate::pages::{
		DraftEdit, GridError, LoadOrdering, LoadOutcome, MemoryNotifier, Notification, Notifier,
		RecordQuery, RecordSink, RecordSource, SaveOutcome, SavePolicy, SortDirection, TableConfig,
		TableController, TableView,
	};

	// External
	#[cfg(feature = "pages")]
	pub use async_trait::async_trait;
}
