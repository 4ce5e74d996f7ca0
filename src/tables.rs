//! Column spec parsing, record enrichment and pagination
//!
//! This module re-exports `oppgrid-tables`, the synchronous data layer.
//!
//! ## Example
//!
//! ```rust
//! use oppgrid::tables::{ColumnSpec, RelationContext};
//!
//! let columns = ColumnSpec::parse(Some("Name, RelatedAccount"), RelationContext::Insured);
//! assert_eq!(columns[1].label, "Insured Account");
//! ```

pub use oppgrid_tables::*;
