use std::{fmt, sync::Arc};

use super::{Columns, RecordStore, Row};
use crate::{
	global::error::*,
	schema::Schema,
	set::{BitmaskValueSet, Capability},
};

/// One record's value sets, one per attribute declared on its [`Schema`]
#[derive(Clone)]
pub struct Record {
	schema: Arc<Schema>,
	id: Option<u64>,
	sets: Vec<BitmaskValueSet>,
}

impl Record {
	/// A new, unsaved record with every attribute empty
	pub fn new(schema: Arc<Schema>) -> Record {
		let sets = schema.attributes().iter().map(|r| BitmaskValueSet::empty(r.clone())).collect();

		Record { schema, id: None, sets }
	}

	/// Decode a persisted row, missing and `NULL` columns read as empty
	pub fn load(schema: Arc<Schema>, row: &Row) -> Record {
		let sets = schema
			.attributes()
			.iter()
			.map(|r| BitmaskValueSet::from_stored(r.clone(), row.get(r.column())))
			.collect();

		Record {
			schema,
			id: Some(row.id),
			sets,
		}
	}

	/// The store id, `None` until saved
	#[inline(always)]
	pub fn id(&self) -> Option<u64> {
		self.id
	}

	/// The schema this record was built from
	#[inline(always)]
	pub fn schema(&self) -> &Arc<Schema> {
		&self.schema
	}

	/// The current values of `attribute`
	pub fn get(&self, attribute: &str) -> InternalResult<&BitmaskValueSet> {
		let index = self.schema.position(attribute)?;
		Ok(&self.sets[index])
	}

	/// Mutable access to the values of `attribute`
	pub fn get_mut(&mut self, attribute: &str) -> InternalResult<&mut BitmaskValueSet> {
		let index = self.schema.position(attribute)?;
		Ok(&mut self.sets[index])
	}

	/// A copy of the values of `attribute` carrying capability `C`, write it back with [`put`](Record::put)
	pub fn get_as<C: Capability>(&self, attribute: &str) -> InternalResult<BitmaskValueSet<C>> {
		self.get(attribute).map(|set| set.with_capability())
	}

	/// Stores `set` as the values of its attribute, whatever capability it carries.
	/// The set must have been built from this record's schema.
	pub fn put<C: Capability>(&mut self, set: BitmaskValueSet<C>) -> InternalResult {
		let index = self.schema.position(set.attribute())?;

		if !Arc::ptr_eq(&self.schema.attributes()[index], set.registry()) {
			return Err(InternalError::UnknownAttributeError {
				type_name: self.schema.type_name().to_string(),
				attribute: set.attribute().to_string(),
			});
		};

		self.sets[index] = set.into_capability();
		Ok(())
	}

	/// Replace the values of `attribute` wholesale
	pub fn assign<I, S>(&mut self, attribute: &str, values: I) -> InternalResult
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.get_mut(attribute)?.replace(values)
	}

	/// The column values to persist
	pub fn columns(&self) -> Columns {
		self.sets
			.iter()
			.map(|set| (set.registry().column_arc().clone(), set.to_stored()))
			.collect()
	}

	/// Insert or update this record in `store`, returns the record's id
	pub fn save<S: RecordStore + ?Sized>(&mut self, store: &S) -> InternalResult<u64> {
		match self.id {
			Some(id) => {
				store.update(id, self.columns())?;
				Ok(id)
			},
			None => {
				let id = store.insert(self.columns())?;
				self.id = Some(id);
				Ok(id)
			},
		}
	}
}

impl fmt::Debug for Record {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Record")
			.field("type_name", &self.schema.type_name())
			.field("id", &self.id)
			.field("sets", &self.sets)
			.finish()
	}
}
