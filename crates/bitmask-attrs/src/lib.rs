#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

/*!
Store an open-ended, named set of boolean flags in a single integer column.

Each attribute declares an ordered list of values, the `i`th value owns bit `1 << i`.
A record's values are kept in a [`BitmaskValueSet`](crate::set::BitmaskValueSet) which only
ever holds the packed integer, so what the caller sees and what gets persisted can't diverge.
Queries over the packed column are built as [`Predicate`](crate::query::Predicate)s and
evaluated by a [`RecordStore`](crate::store::RecordStore).

### 🔫 Cargo Features
- `store`: Enables the in-memory [`MemoryStore`](crate::store::MemoryStore), pulls `parking_lot`.
- `default`: Enables the `store` feature.
- `all`: Enables all the above features.

### 🀄 Show me some code _dang it!_

```
use std::sync::Arc;
use bitmask_attrs::prelude::*;
use bitmask_attrs::query;

let schema = Arc::new(
	Schema::builder("Campaign")
		.attribute("medium", ["web", "print", "email", "phone"])
		.build()
		.unwrap(),
);

let mut campaign = Record::new(schema.clone());
campaign.assign("medium", ["web", "print"]).unwrap();
campaign.get_mut("medium").unwrap().add("phone").unwrap();

let medium = campaign.get("medium").unwrap();
assert!(medium.contains_all(["web", "phone"]));
assert_eq!(medium.to_integer(), 0b1011);

// roundtrip through a store
let store = MemoryStore::new();
campaign.save(&store).unwrap();

let registry = schema.registry("medium").unwrap();
let filter = Filter::from(query::with(registry, ["web", "print"]).unwrap());
assert_eq!(store.filter(&filter).len(), 1);
```
*/

/// All tests are included in this module.
mod tests;

pub(crate) mod global;

/// Attribute declarations grouped per record type, [`Schema`](crate::schema::Schema) and [`Accessor`](crate::schema::Accessor)
pub mod schema;

/// The mutable view of a record's values, [`BitmaskValueSet`](crate::set::BitmaskValueSet)
pub mod set;

/// Predicates over packed columns, [`Predicate`](crate::query::Predicate), [`Rule`](crate::query::Rule) and [`Filter`](crate::query::Filter)
pub mod query;

/// The record store collaborator, [`RecordStore`](crate::store::RecordStore) and [`Record`](crate::store::Record)
pub mod store;

/// Default number of bits an attribute may use. Keeps every mask within a signed 64-bit column
pub const DEFAULT_BIT_WIDTH: u32 = 62;

/// Maximum number of bits an attribute may use, ie the width of a `u64`
pub const MAX_BIT_WIDTH: u32 = u64::BITS;

/// Consolidated crate imports.
pub mod prelude {
	pub use crate::global::{
		config::AttributeConfig, error::*, registry::BitmaskRegistry, symbol::Symbol,
	};
	pub use crate::schema::{Accessor, Schema, SchemaBuilder};
	pub use crate::set::{BitmaskValueSet, Capability, Plain};
	pub use crate::query::{Filter, Predicate, Rule};
	pub use crate::store::{Columns, Record, RecordStore, Row};

	#[cfg(feature = "store")]
	pub use crate::store::MemoryStore;
}
