//! Draft edits and their reconciliation with the write collaborator
//!
//! Inline edits accumulate as [`DraftEdit`]s, at most one per
//! `(record_id, field_name)` pair. [`EditReconciler::save`] submits the whole
//! batch and then either clears it (success) or keeps it for a retry
//! (failure). The shared [`LoadingFlag`] is raised for the full duration of a
//! save, including the reload that follows a success.

use crate::error::{GridError, GridResult};
use crate::messages::{Notification, Notifier};
use crate::server_fn::RecordSink;
use oppgrid_tables::record::ID_FIELD;
use oppgrid_tables::reduce_error;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Notification title after a successful save
pub const SAVE_SUCCESS_TITLE: &str = "Success";
/// Notification body after a successful save
pub const SAVE_SUCCESS_MESSAGE: &str = "Opportunities updated";
/// Notification title after a failed save
pub const SAVE_ERROR_TITLE: &str = "Error updating or reloading records";

/// A pending, unsaved change to one field of one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEdit {
	/// Identifier of the edited record
	pub record_id: String,
	/// Edited field
	pub field_name: String,
	/// Value entered by the user
	pub new_value: Value,
}

impl DraftEdit {
	/// Creates a draft edit
	pub fn new(
		record_id: impl Into<String>,
		field_name: impl Into<String>,
		new_value: impl Into<Value>,
	) -> Self {
		Self {
			record_id: record_id.into(),
			field_name: field_name.into(),
			new_value: new_value.into(),
		}
	}

	fn same_cell(&self, other: &DraftEdit) -> bool {
		self.record_id == other.record_id && self.field_name == other.field_name
	}
}

/// Shared "operation in progress" flag
///
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
	/// Creates a lowered flag
	pub fn new() -> Self {
		Self::default()
	}

	/// True while a save (and its follow-up reload) is running
	pub fn is_set(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}

	fn set(&self, value: bool) {
		self.0.store(value, Ordering::SeqCst);
	}
}

/// Holds draft edits and submits them through a [`RecordSink`]
#[derive(Clone)]
pub struct EditReconciler {
	drafts: Arc<RwLock<Vec<DraftEdit>>>,
	sink: Arc<dyn RecordSink>,
	notifier: Arc<dyn Notifier>,
	loading: LoadingFlag,
}

impl EditReconciler {
	/// Creates a reconciler with no drafts
	pub fn new(sink: Arc<dyn RecordSink>, notifier: Arc<dyn Notifier>) -> Self {
		Self {
			drafts: Arc::new(RwLock::new(Vec::new())),
			sink,
			notifier,
			loading: LoadingFlag::new(),
		}
	}

	/// Records one edit, replacing any earlier draft for the same cell
	///
	/// A replaced draft keeps its original position in the batch.
	pub fn record_draft(&self, edit: DraftEdit) {
		let mut drafts = self.drafts.write();
		match drafts.iter_mut().find(|d| d.same_cell(&edit)) {
			Some(existing) => existing.new_value = edit.new_value,
			None => drafts.push(edit),
		}
	}

	/// Records edits reported as `[{ "Id": ..., "<field>": <value>, ... }]`
	///
	/// Each non-`Id` field becomes one draft. Entries without a usable `Id`
	/// are ignored. Returns the number of drafts recorded.
	pub fn record_draft_values(&self, rows: &[Value]) -> usize {
		let mut recorded = 0;
		for row in rows {
			let Some(fields) = row.as_object() else {
				continue;
			};
			let Some(record_id) = fields
				.get(ID_FIELD)
				.and_then(Value::as_str)
				.filter(|id| !id.trim().is_empty())
			else {
				tracing::debug!(row = %row, "Ignoring draft row without an Id");
				continue;
			};

			for (field_name, value) in fields.iter().filter(|(k, _)| k.as_str() != ID_FIELD) {
				self.record_draft(DraftEdit::new(record_id, field_name.as_str(), value.clone()));
				recorded += 1;
			}
		}
		recorded
	}

	/// Drops every draft without saving
	pub fn discard(&self) {
		self.drafts.write().clear();
	}

	/// Snapshot of the pending drafts in submission order
	pub fn drafts(&self) -> Vec<DraftEdit> {
		self.drafts.read().clone()
	}

	/// Returns the pending draft for a cell
	pub fn draft_for(&self, record_id: &str, field_name: &str) -> Option<Value> {
		self.drafts
			.read()
			.iter()
			.find(|d| d.record_id == record_id && d.field_name == field_name)
			.map(|d| d.new_value.clone())
	}

	/// Number of pending drafts
	pub fn len(&self) -> usize {
		self.drafts.read().len()
	}

	/// True when there is nothing to save
	pub fn is_empty(&self) -> bool {
		self.drafts.read().is_empty()
	}

	/// True while a save is running
	pub fn is_loading(&self) -> bool {
		self.loading.is_set()
	}

	/// Handle to the loading flag
	pub fn loading_flag(&self) -> LoadingFlag {
		self.loading.clone()
	}

	/// Submits every draft as one batch.
	///
	/// On success the drafts are cleared, a success notification is sent and
	/// `after_success` runs (typically a reload) before the loading flag
	/// drops. On failure the drafts are kept and the reduced remote message is
	/// reported. Saving with no drafts is a no-op that returns `Ok(0)`.
	///
	/// # Errors
	///
	/// Returns [`GridError::Save`] when the write collaborator fails.
	pub async fn save<F, Fut>(&self, after_success: F) -> GridResult<usize>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = ()>,
	{
		let batch = self.drafts();
		if batch.is_empty() {
			tracing::debug!("No drafts to save");
			return Ok(0);
		}

		self.loading.set(true);
		let _loading = scopeguard::guard(self.loading.clone(), |flag| flag.set(false));

		tracing::info!(count = batch.len(), "Saving draft edits");
		match self.sink.save(&batch).await {
			Ok(()) => {
				self.drafts.write().clear();
				self.notifier
					.notify(Notification::success(SAVE_SUCCESS_TITLE, SAVE_SUCCESS_MESSAGE));
				after_success().await;
				Ok(batch.len())
			}
			Err(error) => {
				let message = reduce_error(&error);
				tracing::warn!(error = %message, count = batch.len(), "Saving draft edits failed");
				self.notifier
					.notify(Notification::error(SAVE_ERROR_TITLE, message));
				Err(GridError::Save(error))
			}
		}
	}
}

impl std::fmt::Debug for EditReconciler {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EditReconciler")
			.field("drafts", &self.drafts.read().len())
			.field("loading", &self.loading.is_set())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::messages::{Level, MemoryNotifier};
	use async_trait::async_trait;
	use oppgrid_tables::RemoteError;
	use parking_lot::Mutex;
	use rstest::*;
	use serde_json::json;

	#[derive(Default)]
	struct FakeSink {
		failure: Option<RemoteError>,
		batches: Mutex<Vec<Vec<DraftEdit>>>,
		loading_seen: Mutex<Option<LoadingFlag>>,
		observed: Mutex<Vec<bool>>,
	}

	#[async_trait]
	impl RecordSink for FakeSink {
		async fn save(&self, edits: &[DraftEdit]) -> Result<(), RemoteError> {
			self.batches.lock().push(edits.to_vec());
			if let Some(flag) = self.loading_seen.lock().as_ref() {
				self.observed.lock().push(flag.is_set());
			}
			match &self.failure {
				Some(error) => Err(error.clone()),
				None => Ok(()),
			}
		}
	}

	fn reconciler(sink: Arc<FakeSink>) -> (EditReconciler, MemoryNotifier) {
		let notifier = MemoryNotifier::new();
		let reconciler = EditReconciler::new(sink, Arc::new(notifier.clone()));
		(reconciler, notifier)
	}

	#[fixture]
	fn ok_sink() -> Arc<FakeSink> {
		Arc::new(FakeSink::default())
	}

	#[fixture]
	fn failing_sink() -> Arc<FakeSink> {
		Arc::new(FakeSink {
			failure: Some(RemoteError::details(["A", "B"])),
			..FakeSink::default()
		})
	}

	#[rstest]
	fn test_record_draft_upserts_in_place(ok_sink: Arc<FakeSink>) {
		let (reconciler, _) = reconciler(ok_sink);
		reconciler.record_draft(DraftEdit::new("006A", "Amount", 100));
		reconciler.record_draft(DraftEdit::new("006B", "Amount", 200));
		reconciler.record_draft(DraftEdit::new("006A", "Amount", 150));

		let drafts = reconciler.drafts();
		assert_eq!(drafts.len(), 2);
		assert_eq!(drafts[0], DraftEdit::new("006A", "Amount", 150));
		assert_eq!(drafts[1].record_id, "006B");
	}

	#[rstest]
	fn test_record_draft_values(ok_sink: Arc<FakeSink>) {
		let (reconciler, _) = reconciler(ok_sink);
		let recorded = reconciler.record_draft_values(&[
			json!({ "Id": "006A", "Amount": 5, "StageName": "Won" }),
			json!({ "Amount": 9 }),
			json!({ "Id": "", "Amount": 9 }),
			json!("not a row"),
		]);

		assert_eq!(recorded, 2);
		assert_eq!(reconciler.draft_for("006A", "Amount"), Some(json!(5)));
		assert_eq!(reconciler.draft_for("006A", "StageName"), Some(json!("Won")));
	}

	#[rstest]
	fn test_discard(ok_sink: Arc<FakeSink>) {
		let (reconciler, _) = reconciler(ok_sink);
		reconciler.record_draft(DraftEdit::new("006A", "Amount", 1));
		reconciler.discard();
		assert!(reconciler.is_empty());
	}

	#[rstest]
	fn test_save_success(ok_sink: Arc<FakeSink>) {
		let (reconciler, notifier) = reconciler(Arc::clone(&ok_sink));
		*ok_sink.loading_seen.lock() = Some(reconciler.loading_flag());
		reconciler.record_draft(DraftEdit::new("006A", "Amount", 1));
		reconciler.record_draft(DraftEdit::new("006B", "Amount", 2));

		let reloaded = Arc::new(AtomicBool::new(false));
		let during_reload = Arc::new(AtomicBool::new(false));
		let saved = tokio_test::block_on(reconciler.save(|| {
			let reloaded = Arc::clone(&reloaded);
			let during_reload = Arc::clone(&during_reload);
			let flag = reconciler.loading_flag();
			async move {
				during_reload.store(flag.is_set(), Ordering::SeqCst);
				reloaded.store(true, Ordering::SeqCst);
			}
		}))
		.unwrap();

		assert_eq!(saved, 2);
		assert!(reconciler.is_empty());
		assert!(reloaded.load(Ordering::SeqCst));
		assert!(during_reload.load(Ordering::SeqCst));
		assert!(!reconciler.is_loading());
		assert_eq!(*ok_sink.observed.lock(), vec![true]);
		assert_eq!(ok_sink.batches.lock()[0].len(), 2);

		let notes = notifier.drain();
		assert_eq!(notes.len(), 1);
		assert_eq!(notes[0].level, Level::Success);
		assert_eq!(notes[0].title, SAVE_SUCCESS_TITLE);
	}

	#[rstest]
	fn test_save_failure_keeps_drafts(failing_sink: Arc<FakeSink>) {
		let (reconciler, notifier) = reconciler(failing_sink);
		reconciler.record_draft(DraftEdit::new("006A", "Amount", 1));

		let reloaded = Arc::new(AtomicBool::new(false));
		let result = tokio_test::block_on(reconciler.save(|| {
			let reloaded = Arc::clone(&reloaded);
			async move { reloaded.store(true, Ordering::SeqCst) }
		}));

		assert!(matches!(result, Err(GridError::Save(_))));
		assert_eq!(reconciler.len(), 1);
		assert!(!reloaded.load(Ordering::SeqCst));
		assert!(!reconciler.is_loading());

		let notes = notifier.drain();
		assert_eq!(notes.len(), 1);
		assert_eq!(notes[0].level, Level::Error);
		assert_eq!(notes[0].title, SAVE_ERROR_TITLE);
		assert_eq!(notes[0].message, "A, B");
	}

	#[rstest]
	fn test_save_without_drafts_is_noop(ok_sink: Arc<FakeSink>) {
		let (reconciler, notifier) = reconciler(Arc::clone(&ok_sink));
		let saved = tokio_test::block_on(reconciler.save(|| async {})).unwrap();

		assert_eq!(saved, 0);
		assert!(ok_sink.batches.lock().is_empty());
		assert!(notifier.peek().is_empty());
	}

	#[rstest]
	fn test_draft_edit_wire_format() {
		let value = serde_json::to_value(DraftEdit::new("006A", "Amount", 10)).unwrap();
		assert_eq!(
			value,
			json!({ "recordId": "006A", "fieldName": "Amount", "newValue": 10 })
		);
	}
}
