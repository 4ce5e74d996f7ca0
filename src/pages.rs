//! Table controller and remote collaborators
//!
//! This module re-exports `oppgrid-pages`, which loads records through a
//! [`RecordSource`], keeps inline edits as drafts and saves them through a
//! [`RecordSink`].

pub use oppgrid_pages::*;
