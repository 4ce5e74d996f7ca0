//! Table controller
//!
//! [`TableController`] owns the state of one opportunity table: the host
//! configuration, the resolved columns, the loaded records with their page
//! window, and the pending drafts. It reacts to discrete events (configuration
//! change, page navigation, edit, save) and reports the result to the
//! rendering layer as a [`TableView`] snapshot.
//!
//! Clones share the same table state, so a clone can drive a reload while
//! another handle renders.
//!
//! ## Example
//!
//! ```ignore
//! use oppgrid_pages::prelude::*;
//! use std::sync::Arc;
//!
//! let config = TableConfig::new("001000000000001").with_columns("Name, Amount");
//! let controller = TableController::new(config, source, sink, Arc::new(MemoryNotifier::new()))?;
//!
//! controller.load().await;
//! controller.next_page();
//! let view = controller.view();
//! ```

use crate::config::{ConfigChanges, LoadOrdering, SavePolicy, TableConfig};
use crate::drafts::{DraftEdit, EditReconciler, LoadingFlag};
use crate::error::{GridError, GridResult};
use crate::messages::{Notification, Notifier};
use crate::server_fn::{RecordSink, RecordSource};
use oppgrid_tables::{
	ColumnDefinition, DisplayRecord, PaginationState, RawRecord, RecordEnricher, reduce_error,
};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

/// Notification title after a failed load
pub const LOAD_ERROR_TITLE: &str = "Error loading opportunities";

/// How a load request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
	/// The response replaced the record set
	Applied(usize),
	/// The read collaborator failed; the record set was cleared
	Failed,
	/// A newer request had been issued; the response was dropped
	Discarded,
}

/// How a save request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
	/// The drafts were persisted and the table reloaded
	Saved(usize),
	/// The write collaborator failed; the drafts were kept
	Failed,
	/// There were no drafts
	NothingToSave,
}

/// Everything the rendering layer needs to draw the table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
	/// Column metadata in display order
	pub columns: Vec<ColumnDefinition>,
	/// Records on the current page, with pending drafts overlaid
	pub records: Vec<DisplayRecord>,
	/// Current page counter
	pub page_number: i64,
	/// Number of pages (at least 1)
	pub total_pages: usize,
	/// Number of loaded records
	pub total_records: usize,
	/// Disables the "previous" control
	pub is_first_page: bool,
	/// Disables the "next" control
	pub is_last_page: bool,
	/// A save (and its reload) is running
	pub is_loading: bool,
	/// At least one load is in flight
	pub is_fetching: bool,
	/// Pending drafts in submission order
	pub drafts: Vec<DraftEdit>,
	/// Bumped whenever the table is rebuilt from scratch
	pub generation: u64,
}

#[derive(Debug)]
struct GridState {
	config: TableConfig,
	columns: Vec<ColumnDefinition>,
	enricher: RecordEnricher,
	raw: Vec<RawRecord>,
	pages: PaginationState<DisplayRecord>,
	in_flight: usize,
	requested_seq: u64,
	applied_seq: u64,
	generation: u64,
}

impl GridState {
	fn new(config: TableConfig) -> GridResult<Self> {
		let columns = config.column_definitions();
		let enricher = RecordEnricher::for_columns(config.account_context, &columns);
		let pages = PaginationState::new(config.page_size)?;

		Ok(Self {
			config,
			columns,
			enricher,
			raw: Vec::new(),
			pages,
			in_flight: 0,
			requested_seq: 0,
			applied_seq: 0,
			generation: 0,
		})
	}

	fn rebuild_columns(&mut self) {
		self.columns = self.config.column_definitions();
		self.enricher = RecordEnricher::for_columns(self.config.account_context, &self.columns);
	}

	fn apply_records(&mut self, raw: Vec<RawRecord>) {
		let records = self.enricher.enrich(&raw);
		self.raw = raw;
		self.pages.replace(records);
	}

	/// Re-derives display fields without treating it as a new record set.
	fn reenrich(&mut self) {
		let page = self.pages.page_number();
		self.pages.replace(self.enricher.enrich(&self.raw));
		self.pages.go_to(page);
	}

	fn clear_records(&mut self) {
		self.raw.clear();
		self.pages.clear();
	}
}

/// Orchestrates loading, pagination and draft reconciliation for one table
#[derive(Clone)]
pub struct TableController {
	state: Arc<RwLock<GridState>>,
	source: Arc<dyn RecordSource>,
	reconciler: EditReconciler,
	notifier: Arc<dyn Notifier>,
}

impl TableController {
	/// Creates a controller; no records are loaded until [`Self::load`]
	///
	/// # Errors
	///
	/// Returns [`GridError::Config`] when the configuration does not validate.
	pub fn new(
		config: TableConfig,
		source: Arc<dyn RecordSource>,
		sink: Arc<dyn RecordSink>,
		notifier: Arc<dyn Notifier>,
	) -> GridResult<Self> {
		config.validate()?;
		let state = GridState::new(config)?;

		Ok(Self {
			state: Arc::new(RwLock::new(state)),
			source,
			reconciler: EditReconciler::new(sink, Arc::clone(&notifier)),
			notifier,
		})
	}

	/// Fetches the record set for the current configuration.
	///
	/// The response replaces the record set wholesale and returns to page 1.
	/// Pending drafts are dropped whatever the outcome. A failure clears the
	/// record set and notifies the host.
	pub async fn load(&self) -> LoadOutcome {
		let (seq, query) = {
			let mut state = self.state.write();
			state.requested_seq += 1;
			state.in_flight += 1;
			(state.requested_seq, state.config.load_query())
		};
		tracing::debug!(seq, source_id = %query.source_id, "Loading opportunities");

		let result = self.source.fetch(&query).await;

		let mut state = self.state.write();
		state.in_flight = state.in_flight.saturating_sub(1);
		if state.config.load_ordering == LoadOrdering::LastRequested && seq < state.requested_seq {
			tracing::debug!(seq, latest = state.requested_seq, "Discarding stale load response");
			return LoadOutcome::Discarded;
		}
		state.applied_seq = seq;

		match result {
			Ok(raw) => {
				let count = raw.len();
				state.apply_records(raw);
				drop(state);
				self.reconciler.discard();
				tracing::debug!(seq, count, "Loaded opportunities");
				LoadOutcome::Applied(count)
			}
			Err(error) => {
				state.clear_records();
				drop(state);
				self.reconciler.discard();
				let message = reduce_error(&error);
				tracing::error!(seq, error = %message, "Loading opportunities failed");
				self.notifier
					.notify(Notification::error(LOAD_ERROR_TITLE, message));
				LoadOutcome::Failed
			}
		}
	}

	/// Reissues the load with the current configuration
	pub async fn refresh(&self) -> LoadOutcome {
		self.load().await
	}

	/// Applies a new host configuration and recomputes what it affects.
	///
	/// Column changes re-derive display fields in place, a page size change
	/// re-paginates from page 1, and any change to the query refetches.
	///
	/// # Errors
	///
	/// Returns [`GridError::Config`] when `next` does not validate; the
	/// current configuration is kept in that case.
	pub async fn update_config(&self, next: TableConfig) -> GridResult<ConfigChanges> {
		next.validate()?;

		let changes = {
			let mut state = self.state.write();
			let changes = state.config.diff(&next);
			let resize = state.config.page_size != next.page_size;
			state.config = next;

			if resize {
				let records = state.pages.records().to_vec();
				let page_size = state.config.page_size;
				state.pages.reset(records, page_size)?;
			}
			if changes.reparse_columns {
				state.rebuild_columns();
				state.reenrich();
			}
			changes
		};

		if changes.refetch {
			self.load().await;
		}
		Ok(changes)
	}

	/// Moves to the next page unless already on the last one
	pub fn next_page(&self) -> bool {
		let mut state = self.state.write();
		if state.pages.is_last_page() {
			return false;
		}
		state.pages.next();
		true
	}

	/// Moves to the previous page unless already on the first one
	pub fn prev_page(&self) -> bool {
		let mut state = self.state.write();
		if state.pages.is_first_page() {
			return false;
		}
		state.pages.prev();
		true
	}

	/// Jumps to page 1
	pub fn first_page(&self) {
		self.state.write().pages.first();
	}

	/// Jumps to the last page
	pub fn last_page(&self) {
		self.state.write().pages.last();
	}

	/// Sets the page counter directly; out-of-range pages show no records
	pub fn go_to_page(&self, page_number: i64) {
		self.state.write().pages.go_to(page_number);
	}

	/// Records one inline edit
	pub fn record_draft(&self, edit: DraftEdit) {
		self.reconciler.record_draft(edit);
	}

	/// Records the rendering layer's draft array
	pub fn record_draft_values(&self, rows: &[serde_json::Value]) -> usize {
		self.reconciler.record_draft_values(rows)
	}

	/// Drops every pending draft
	pub fn cancel_drafts(&self) {
		self.reconciler.discard();
	}

	/// Submits the pending drafts and reloads according to the save policy
	pub async fn save(&self) -> SaveOutcome {
		let policy = self.state.read().config.save_policy;
		let controller = self.clone();

		let result = self
			.reconciler
			.save(move || async move {
				match policy {
					SavePolicy::Refetch => {
						controller.load().await;
					}
					SavePolicy::ForceReset => {
						controller.reset_view().await;
					}
				}
			})
			.await;

		match result {
			Ok(0) => SaveOutcome::NothingToSave,
			Ok(count) => SaveOutcome::Saved(count),
			Err(GridError::Save(_)) => SaveOutcome::Failed,
			Err(error) => {
				tracing::error!(error = %error, "Unexpected save error");
				SaveOutcome::Failed
			}
		}
	}

	/// Discards all client state and rebuilds the table from scratch
	pub async fn reset_view(&self) -> LoadOutcome {
		let generation = {
			let mut state = self.state.write();
			state.rebuild_columns();
			state.clear_records();
			state.generation += 1;
			state.generation
		};
		self.reconciler.discard();
		tracing::info!(generation, "Rebuilding table from scratch");

		self.load().await
	}

	/// Snapshot for the rendering layer
	pub fn view(&self) -> TableView {
		let drafts = self.reconciler.drafts();
		let state = self.state.read();

		let records = state
			.pages
			.visible_records()
			.iter()
			.map(|record| overlay(record, &drafts))
			.collect();

		TableView {
			columns: state.columns.clone(),
			records,
			page_number: state.pages.page_number(),
			total_pages: state.pages.total_pages(),
			total_records: state.pages.len(),
			is_first_page: state.pages.is_first_page(),
			is_last_page: state.pages.is_last_page(),
			is_loading: self.reconciler.is_loading(),
			is_fetching: state.in_flight > 0,
			drafts,
			generation: state.generation,
		}
	}

	/// Column definitions in display order
	pub fn columns(&self) -> Vec<ColumnDefinition> {
		self.state.read().columns.clone()
	}

	/// Pending drafts in submission order
	pub fn drafts(&self) -> Vec<DraftEdit> {
		self.reconciler.drafts()
	}

	/// Current configuration
	pub fn config(&self) -> TableConfig {
		self.state.read().config.clone()
	}

	/// True while a save (and its reload) is running
	pub fn is_loading(&self) -> bool {
		self.reconciler.is_loading()
	}

	/// Handle to the save loading flag
	pub fn loading_flag(&self) -> LoadingFlag {
		self.reconciler.loading_flag()
	}

	/// True while at least one load is in flight
	pub fn is_fetching(&self) -> bool {
		self.state.read().in_flight > 0
	}

	/// Sequence number of the last applied load response
	pub fn applied_seq(&self) -> u64 {
		self.state.read().applied_seq
	}
}

impl std::fmt::Debug for TableController {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TableController")
			.field("state", &*self.state.read())
			.field("reconciler", &self.reconciler)
			.finish()
	}
}

fn overlay(record: &DisplayRecord, drafts: &[DraftEdit]) -> DisplayRecord {
	let mut record = record.clone();
	let Some(id) = record.id().map(str::to_string) else {
		return record;
	};
	for draft in drafts.iter().filter(|d| d.record_id == id) {
		record.set(draft.field_name.as_str(), draft.new_value.clone());
	}
	record
}
