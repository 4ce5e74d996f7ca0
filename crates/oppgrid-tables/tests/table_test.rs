
use fixtures::{opportunities, orphans};
use oppgrid_tables::column::DEFAULT_COLUMNS;
use oppgrid_tables::record::{RELATED_ACCOUNT_LINK, RELATED_ACCOUNT_NAME};
use oppgrid_tables::{
	ColumnSpec, PaginationState, RawRecord, RecordEnricher, RelationContext, RenderType,
};
use proptest::prelude::*;
use rstest::*;
use serde_json::{Value, json};

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("   "))]
#[case(Some(" , , "))]
#[case(Some("Name; Amount"))]
fn test_default_substitution(#[case] raw: Option<&str>) {
	let columns = ColumnSpec::parse(raw, RelationContext::Broker);
	let defaults = ColumnSpec::parse(Some(DEFAULT_COLUMNS), RelationContext::Broker);

	assert_eq!(columns, defaults);
	let labels: Vec<_> = columns.iter().map(|c| c.label.as_str()).collect();
	assert_eq!(
		labels,
		vec!["Opportunity Name", "Stage Name", "Broker Account", "Amount", "Close Date"]
	);
}

#[rstest]
fn test_duplicate_tokens_preserved() {
	let columns = ColumnSpec::parse(Some("Amount, Name, Amount"), RelationContext::Broker);
	let keys: Vec<_> = columns.iter().map(|c| c.data_key.as_str()).collect();
	assert_eq!(keys, vec!["Amount", "recordLink", "Amount"]);
}

#[rstest]
fn test_mixed_spec_resolution() {
	let columns = ColumnSpec::parse(
		Some("Name, RelatedAccount, Broker, Insured, Owner, Gross_Premium__c, Inception_Date__c, Type"),
		RelationContext::Insured,
	);

	let summary: Vec<_> = columns
		.iter()
		.map(|c| (c.label.as_str(), c.render_type, c.editable))
		.collect();
	assert_eq!(
		summary,
		vec![
			("Opportunity Name", RenderType::Url, false),
			("Insured Account", RenderType::Url, false),
			("Broker Account", RenderType::Url, false),
			("Insured Account", RenderType::Url, false),
			("Owner", RenderType::Url, false),
			("Gross Premium", RenderType::Currency, true),
			("Inception Date", RenderType::Date, true),
			("Type", RenderType::Text, true),
		]
	);
}

#[rstest]
fn test_enrich_for_columns_derives_alias_relations(opportunities: Vec<RawRecord>) {
	let columns = ColumnSpec::parse(Some("Name, RelatedAccount, Broker"), RelationContext::Insured);
	let enricher = RecordEnricher::for_columns(RelationContext::Insured, &columns);
	let display = enricher.enrich(&opportunities);

	assert_eq!(display.len(), opportunities.len());
	assert_eq!(display[0].get("brokerLink"), Some(&json!("/001B01")));
	assert_eq!(display[0].get("brokerName"), Some(&json!("Broker 1")));
	assert_eq!(display[0].get(RELATED_ACCOUNT_LINK), Some(&json!("/001I01")));
	assert_eq!(display[0].get(RELATED_ACCOUNT_NAME), Some(&json!("Insured 1")));
	assert!(display[0].get("insuredLink").is_none());
}

#[rstest]
fn test_enrichment_totality(orphans: Vec<RawRecord>) {
	let display = RecordEnricher::new(RelationContext::Broker)
		.with_relation(oppgrid_tables::Relation::Insured)
		.enrich(&orphans);

	for record in &display {
		for key in [RELATED_ACCOUNT_LINK, RELATED_ACCOUNT_NAME, "insuredLink", "insuredName"] {
			assert_eq!(record.get(key), Some(&Value::Null), "key {}", key);
		}
	}
	assert_eq!(display[2].get("recordLink"), Some(&Value::Null));
}

#[rstest]
fn test_paginate_enriched_records(opportunities: Vec<RawRecord>) {
	let display = RecordEnricher::new(RelationContext::Broker).enrich(&opportunities);
	let mut page = PaginationState::new(10).unwrap();
	page.reset(display, 10).unwrap();

	assert_eq!(page.total_pages(), 3);
	assert_eq!(page.visible_records().len(), 10);
	page.next();
	page.next();
	assert_eq!(page.visible_records().len(), 5);
	assert_eq!(page.visible_records()[0].id(), Some("006021"));
	page.next();
	assert!(page.visible_records().is_empty());
	assert!(page.is_last_page());
}

proptest! {
	/// Parsing the same column spec under the same context is deterministic.
	#[rstest]
	fn prop_parse_is_deterministic(
		tokens in prop::collection::vec("[A-Za-z][A-Za-z0-9_]{0,12}", 0..8),
		insured in any::<bool>(),
	) {
		let raw = tokens.join(", ");
		let context = if insured { RelationContext::Insured } else { RelationContext::Broker };
		prop_assert_eq!(
			ColumnSpec::parse(Some(raw.as_str()), context),
			ColumnSpec::parse(Some(raw.as_str()), context)
		);
	}

	/// Column order follows token order, duplicates included.
	#[rstest]
	fn prop_column_count_matches_tokens(
		tokens in prop::collection::vec("[A-Za-z][A-Za-z0-9_]{0,12}", 1..8),
	) {
		let raw = tokens.join(",");
		let columns = ColumnSpec::parse(Some(raw.as_str()), RelationContext::Broker);
		prop_assert_eq!(columns.len(), tokens.len());
	}

	/// Walking pages 1..=total_pages visits every record exactly once.
	#[rstest]
	fn prop_pages_partition_records(len in 0usize..200, page_size in 1usize..30) {
		let mut page = PaginationState::new(page_size).unwrap();
		page.reset((0..len).collect::<Vec<_>>(), page_size).unwrap();

		let mut seen = Vec::with_capacity(len);
		for _ in 0..page.total_pages() {
			seen.extend_from_slice(page.visible_records());
			page.next();
		}
		prop_assert_eq!(seen, (0..len).collect::<Vec<_>>());
	}
}
