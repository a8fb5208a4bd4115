//! The record store collaborator.
//!
//! The codec never performs I/O itself: a [`RecordStore`] loads the raw integers of a row, persists
//! the integers produced by [`Record::columns`], and evaluates [`Filter`]s. SQL backed stores can
//! render filters with [`Filter::sql_condition`](crate::query::Filter::sql_condition).

use std::sync::Arc;
use hashbrown::HashMap;

use crate::{global::error::*, query::Filter};

mod record;
pub use record::Record;

#[cfg(feature = "store")]
mod memory;
#[cfg(feature = "store")]
#[cfg_attr(docsrs, doc(cfg(feature = "store")))]
pub use memory::MemoryStore;

/// Column name and persisted value pairs, `None` is a `NULL` column
pub type Columns = Vec<(Arc<str>, Option<u64>)>;

/// A persisted row, as loaded from a [`RecordStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
	/// Identifier assigned by the store
	pub id: u64,
	columns: HashMap<Arc<str>, Option<u64>>,
}

impl Row {
	/// Build a row from its columns
	pub fn new(id: u64, columns: Columns) -> Row {
		Row {
			id,
			columns: columns.into_iter().collect(),
		}
	}

	/// The stored value of `column`, `None` when `NULL` or absent
	pub fn get(&self, column: &str) -> Option<u64> {
		self.columns.get(column).copied().flatten()
	}

	/// Whether `column` is present and `NULL`
	pub fn is_null(&self, column: &str) -> bool {
		matches!(self.columns.get(column), Some(None))
	}

	/// Overwrites the given columns, leaving others untouched
	pub fn apply(&mut self, columns: Columns) {
		self.columns.extend(columns);
	}

	/// Whether this row passes every predicate in `filter`
	pub fn matches(&self, filter: &Filter) -> bool {
		filter.matches_with(|column| self.get(column))
	}
}

/// Persistence and querying of bitmask columns
pub trait RecordStore {
	/// Persist a new row, returns its id
	fn insert(&self, columns: Columns) -> InternalResult<u64>;
	/// Overwrite columns of an existing row
	fn update(&self, id: u64, columns: Columns) -> InternalResult;
	/// Fetch a row by id
	fn find(&self, id: u64) -> Option<Row>;
	/// Every row passing `filter`, in insertion order
	fn filter(&self, filter: &Filter) -> Vec<Row>;
	/// Drop every row
	fn delete_all(&self);
}
