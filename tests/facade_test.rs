//! End-to-end use of the facade prelude with closure-based collaborators

#![cfg(feature = "pages")]

use oppgrid::prelude::*;
use parking_lot::Mutex;
use rstest::*;
use serde_json::json;
use std::sync::Arc;

struct Accounts(Vec<RawRecord>);

#[async_trait]
impl RecordSource for Accounts {
	async fn fetch(&self, query: &RecordQuery) -> Result<Vec<RawRecord>, RemoteError> {
		if query.source_id == "denied" {
			return Err(RemoteError::message("Insufficient access"));
		}
		Ok(self.0.clone())
	}
}

#[derive(Default)]
struct Ledger(Mutex<Vec<DraftEdit>>);

#[async_trait]
impl RecordSink for Ledger {
	async fn save(&self, edits: &[DraftEdit]) -> Result<(), RemoteError> {
		self.0.lock().extend_from_slice(edits);
		Ok(())
	}
}

#[fixture]
fn records() -> Vec<RawRecord> {
	vec![
		RawRecord::new()
			.with("Id", "006A")
			.with("Name", "Fleet renewal")
			.with("Amount", 12000)
			.with("Insured__r", json!({ "Id": "001I", "Name": "Globex" })),
	]
}

#[rstest]
#[tokio::test]
async fn test_load_edit_and_save(records: Vec<RawRecord>) {
	let titles = Arc::new(Mutex::new(Vec::new()));
	let notifier = {
		let titles = Arc::clone(&titles);
		move |n: Notification| titles.lock().push(n.title)
	};
	let ledger = Arc::new(Ledger::default());

	let controller = TableController::new(
		TableConfig::new("001A")
			.with_account_context(RelationContext::Insured)
			.with_columns("Name, RelatedAccount, Amount"),
		Arc::new(Accounts(records)),
		Arc::clone(&ledger) as Arc<dyn RecordSink>,
		Arc::new(notifier),
	)
	.unwrap();

	assert_eq!(controller.load().await, LoadOutcome::Applied(1));
	let view = controller.view();
	assert_eq!(view.columns[1].label, "Insured Account");
	assert_eq!(view.records[0].get("relatedAccountLink"), Some(&json!("/001I")));

	controller.record_draft(DraftEdit::new("006A", "Amount", 15000));
	assert_eq!(controller.save().await, SaveOutcome::Saved(1));
	assert_eq!(ledger.0.lock().len(), 1);
	assert_eq!(*titles.lock(), vec!["Success".to_string()]);
}

#[rstest]
#[tokio::test]
async fn test_load_failure_notifies(records: Vec<RawRecord>) {
	let notifier = Arc::new(MemoryNotifier::new());
	let controller = TableController::new(
		TableConfig::new("denied"),
		Arc::new(Accounts(records)),
		Arc::new(Ledger::default()),
		Arc::clone(&notifier) as Arc<dyn Notifier>,
	)
	.unwrap();

	assert_eq!(controller.load().await, LoadOutcome::Failed);
	assert_eq!(notifier.drain()[0].message, "Insufficient access");
}
