use std::sync::atomic::{AtomicU64, Ordering};
use parking_lot::RwLock;

use super::{Columns, RecordStore, Row};
use crate::{global::error::*, query::Filter};

/// A [`RecordStore`] holding rows in memory, safe to share between threads
#[derive(Debug, Default)]
pub struct MemoryStore {
	rows: RwLock<Vec<Row>>,
	last_id: AtomicU64,
}

impl MemoryStore {
	/// An empty store
	pub fn new() -> MemoryStore {
		MemoryStore::default()
	}

	/// Number of stored rows
	pub fn len(&self) -> usize {
		self.rows.read().len()
	}

	/// Whether the store holds no rows
	pub fn is_empty(&self) -> bool {
		self.rows.read().is_empty()
	}
}

impl RecordStore for MemoryStore {
	fn insert(&self, columns: Columns) -> InternalResult<u64> {
		let id = self.last_id.fetch_add(1, Ordering::Relaxed) + 1;

		log::trace!("Inserting row: {} with {} columns", id, columns.len());
		self.rows.write().push(Row::new(id, columns));

		Ok(id)
	}

	fn update(&self, id: u64, columns: Columns) -> InternalResult {
		let mut rows = self.rows.write();

		match rows.iter_mut().find(|row| row.id == id) {
			Some(row) => {
				log::trace!("Updating row: {} with {} columns", id, columns.len());
				row.apply(columns);
				Ok(())
			},
			None => Err(InternalError::MissingRecordError(id)),
		}
	}

	fn find(&self, id: u64) -> Option<Row> {
		self.rows.read().iter().find(|row| row.id == id).cloned()
	}

	fn filter(&self, filter: &Filter) -> Vec<Row> {
		log::trace!("Filtering rows by {}", filter);

		self.rows
			.read()
			.iter()
			.filter(|row| row.matches(filter))
			.cloned()
			.collect()
	}

	fn delete_all(&self) {
		self.rows.write().clear();
	}
}
