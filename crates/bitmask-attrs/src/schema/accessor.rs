use std::{fmt, sync::Arc};

use crate::{
	global::{registry::BitmaskRegistry, symbol::Symbol},
	query::{self, Predicate},
};

/// A per-value check generated at declaration time, eg: `medium_for_web`
#[derive(Clone)]
pub struct Accessor {
	pub(crate) name: Arc<str>,
	pub(crate) registry: Arc<BitmaskRegistry>,
	pub(crate) symbol: Symbol,
	pub(crate) bit: u64,
}

impl Accessor {
	/// The generated name, `{attribute}_for_{value}`
	#[inline(always)]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The attribute the value belongs to
	#[inline(always)]
	pub fn attribute(&self) -> &str {
		self.registry.attribute()
	}

	/// The value this accessor checks
	#[inline(always)]
	pub fn symbol(&self) -> &Symbol {
		&self.symbol
	}

	/// The bit owned by the value
	#[inline(always)]
	pub fn bit(&self) -> u64 {
		self.bit
	}

	/// Whether the value is on in a stored integer, ie: `medium_for_web?`
	#[inline(always)]
	pub fn test(&self, stored: u64) -> bool {
		(stored & self.bit) != 0
	}

	/// A predicate selecting records with the value on, ie: the `medium_for_web` scope
	pub fn predicate(&self) -> Predicate {
		query::single(&self.registry, self.bit)
	}
}

impl fmt::Debug for Accessor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Accessor[{}] <{:#b}>", self.name, self.bit)
	}
}
