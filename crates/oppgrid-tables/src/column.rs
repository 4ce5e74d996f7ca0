//! Column metadata and the column spec interpreter
//!
//! - [`ColumnDefinition`]: typed render/edit metadata for one table column
//! - [`ColumnSpec`]: parses a comma-separated token list into column definitions

pub mod definition;
pub mod spec;

// Re-exports
pub use definition::{ColumnDefinition, RenderType, requested_relations};
pub use spec::{ColumnSpec, DEFAULT_COLUMNS};
