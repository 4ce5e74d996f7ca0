//! Column spec parsing, record enrichment and pagination for oppgrid
//!
//! This crate is the synchronous data layer behind an opportunity table. It
//! turns a compact column spec string into typed column metadata, projects raw
//! records fetched from a remote source into display records, and keeps the
//! current page window over the full record set.
//!
//! # Features
//!
//! - **Column Spec**: `"Name, StageName, RelatedAccount, Amount, CloseDate"` style
//!   descriptors resolved into [`ColumnDefinition`]s
//! - **Relation Context**: broker-side or insured-side related account columns
//! - **Enrichment**: navigation links and relationship display names derived per record
//! - **Pagination**: page window, page count and boundary flags
//! - **Error Normalization**: structured remote errors reduced to one message
//!
//! # Architecture
//!
//! ```text
//! column spec ──► ColumnSpec::parse ──► ColumnDefinition[]
//!                                              │ requested relations
//! RawRecord[] ──► RecordEnricher::enrich ──► DisplayRecord[] ──► PaginationState
//! ```
//!
//! # Example
//!
//! ```rust
//! use oppgrid_tables::{ColumnSpec, PaginationState, RelationContext, RenderType};
//!
//! let columns = ColumnSpec::parse(Some("Name, Amount"), RelationContext::Broker);
//! assert_eq!(columns.len(), 2);
//! assert_eq!(columns[1].render_type, RenderType::Currency);
//!
//! let mut page = PaginationState::new(10).unwrap();
//! page.reset((0..25).collect::<Vec<i32>>(), 10).unwrap();
//! assert_eq!(page.total_pages(), 3);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod column;
pub mod enrich;
pub mod error;
pub mod pagination;
pub mod record;
pub mod reduce;

// Re-exports for convenience
pub use column::{ColumnDefinition, ColumnSpec, RenderType};
pub use enrich::RecordEnricher;
pub use error::{Result, TableError};
pub use pagination::PaginationState;
pub use record::{DisplayRecord, RawRecord, Relation, RelationContext};
pub use reduce::{ErrorBody, ErrorDetail, RemoteError, reduce_error};
