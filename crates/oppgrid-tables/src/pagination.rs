//! Client-side pagination over a fully loaded record set
//!
//! The page counter is deliberately unclamped: [`PaginationState::next`] and
//! [`PaginationState::prev`] move it past either end, and an out-of-range page
//! simply shows no records. Callers guard navigation with
//! [`PaginationState::is_first_page`] and [`PaginationState::is_last_page`].

use crate::error::{Result, TableError};

/// Default number of records per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The full record set plus the current page window
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState<T> {
	records: Vec<T>,
	page_size: usize,
	page_number: i64,
}

impl<T> PaginationState<T> {
	/// Creates an empty state on page 1
	///
	/// # Errors
	///
	/// Returns [`TableError::InvalidPageSize`] when `page_size` is zero.
	pub fn new(page_size: usize) -> Result<Self> {
		Ok(Self {
			records: Vec::new(),
			page_size: validate_page_size(page_size)?,
			page_number: 1,
		})
	}

	/// Replaces the record set and page size and returns to page 1
	///
	/// # Errors
	///
	/// Returns [`TableError::InvalidPageSize`] when `page_size` is zero; the
	/// state is left untouched in that case.
	pub fn reset(&mut self, records: Vec<T>, page_size: usize) -> Result<()> {
		self.page_size = validate_page_size(page_size)?;
		self.replace(records);
		Ok(())
	}

	/// Replaces the record set, keeping the page size, and returns to page 1
	pub fn replace(&mut self, records: Vec<T>) {
		self.records = records;
		self.page_number = 1;
	}

	/// Drops every record and returns to page 1
	pub fn clear(&mut self) {
		self.replace(Vec::new());
	}

	/// Moves one page forward (no upper bound)
	pub fn next(&mut self) {
		self.page_number = self.page_number.saturating_add(1);
	}

	/// Moves one page back (no lower bound)
	pub fn prev(&mut self) {
		self.page_number = self.page_number.saturating_sub(1);
	}

	/// Jumps to a page (no bounds)
	pub fn go_to(&mut self, page_number: i64) {
		self.page_number = page_number;
	}

	/// Jumps to page 1
	pub fn first(&mut self) {
		self.page_number = 1;
	}

	/// Jumps to the last page
	pub fn last(&mut self) {
		self.page_number = self.total_pages() as i64;
	}

	/// Number of pages, never less than 1 so an empty set still has one page
	pub fn total_pages(&self) -> usize {
		self.records.len().div_ceil(self.page_size).max(1)
	}

	/// True when the counter is on or before page 1
	pub fn is_first_page(&self) -> bool {
		self.page_number <= 1
	}

	/// True when the counter is on or past the last page
	pub fn is_last_page(&self) -> bool {
		self.page_number >= self.total_pages() as i64
	}

	/// Records on the current page; empty when the counter is out of range
	pub fn visible_records(&self) -> &[T] {
		if self.page_number < 1 {
			return &[];
		}

		let start = usize::try_from(self.page_number - 1)
			.ok()
			.and_then(|p| p.checked_mul(self.page_size));

		match start {
			Some(start) if start < self.records.len() => {
				let end = (start + self.page_size).min(self.records.len());
				&self.records[start..end]
			}
			_ => &[],
		}
	}

	/// Current page counter (1-indexed, may be out of range)
	pub fn page_number(&self) -> i64 {
		self.page_number
	}

	/// Records per page
	pub fn page_size(&self) -> usize {
		self.page_size
	}

	/// The full record set
	pub fn records(&self) -> &[T] {
		&self.records
	}

	/// Total number of records
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// True when no records are loaded
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

impl<T> Default for PaginationState<T> {
	fn default() -> Self {
		Self {
			records: Vec::new(),
			page_size: DEFAULT_PAGE_SIZE,
			page_number: 1,
		}
	}
}

fn validate_page_size(page_size: usize) -> Result<usize> {
	if page_size == 0 {
		Err(TableError::InvalidPageSize(page_size))
	} else {
		Ok(page_size)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;

	#[fixture]
	fn twenty_five() -> PaginationState<i32> {
		let mut state = PaginationState::new(10).unwrap();
		state.reset((1..=25).collect(), 10).unwrap();
		state
	}

	#[rstest]
	fn test_zero_page_size_rejected() {
		assert_eq!(
			PaginationState::<i32>::new(0),
			Err(TableError::InvalidPageSize(0))
		);
	}

	#[rstest]
	fn test_reset_with_zero_page_size_keeps_state(mut twenty_five: PaginationState<i32>) {
		twenty_five.next();
		assert!(twenty_five.reset(vec![1], 0).is_err());
		assert_eq!(twenty_five.len(), 25);
		assert_eq!(twenty_five.page_number(), 2);
	}

	#[rstest]
	fn test_boundary_walk(mut twenty_five: PaginationState<i32>) {
		assert_eq!(twenty_five.total_pages(), 3);
		assert_eq!(twenty_five.visible_records().len(), 10);
		assert!(twenty_five.is_first_page());

		twenty_five.next();
		twenty_five.next();
		assert_eq!(twenty_five.visible_records(), &[21, 22, 23, 24, 25]);
		assert!(twenty_five.is_last_page());

		twenty_five.next();
		assert_eq!(twenty_five.page_number(), 4);
		assert!(twenty_five.visible_records().is_empty());
		assert!(twenty_five.is_last_page());
	}

	#[rstest]
	fn test_prev_below_first_page(mut twenty_five: PaginationState<i32>) {
		twenty_five.prev();
		assert_eq!(twenty_five.page_number(), 0);
		assert!(twenty_five.visible_records().is_empty());
		assert!(twenty_five.is_first_page());

		twenty_five.prev();
		assert_eq!(twenty_five.page_number(), -1);
		assert!(twenty_five.visible_records().is_empty());
	}

	#[rstest]
	fn test_empty_set_has_one_page() {
		let state = PaginationState::<i32>::new(10).unwrap();
		assert_eq!(state.total_pages(), 1);
		assert!(state.is_first_page());
		assert!(state.is_last_page());
		assert!(state.visible_records().is_empty());
	}

	#[rstest]
	fn test_replace_returns_to_first_page(mut twenty_five: PaginationState<i32>) {
		twenty_five.go_to(3);
		twenty_five.replace(vec![7, 8, 9]);
		assert_eq!(twenty_five.page_number(), 1);
		assert_eq!(twenty_five.visible_records(), &[7, 8, 9]);
	}

	#[rstest]
	fn test_last_and_first(mut twenty_five: PaginationState<i32>) {
		twenty_five.last();
		assert_eq!(twenty_five.page_number(), 3);
		twenty_five.first();
		assert_eq!(twenty_five.page_number(), 1);
	}

	#[rstest]
	fn test_huge_page_number_is_empty(mut twenty_five: PaginationState<i32>) {
		twenty_five.go_to(i64::MAX);
		assert!(twenty_five.visible_records().is_empty());
		twenty_five.next();
		assert_eq!(twenty_five.page_number(), i64::MAX);
	}
}
