use std::{fmt, marker::PhantomData, sync::Arc};

use crate::global::{error::*, registry::BitmaskRegistry, symbol::Symbol};

/// Attribute-specific behaviour attached to a [`BitmaskValueSet`] type.
///
/// Methods only one attribute should have are written as a trait implemented for
/// `BitmaskValueSet<YourCapability>`, so they exist on that attribute's set and nowhere else.
///```
/// use std::sync::Arc;
/// use bitmask_attrs::prelude::*;
///
/// struct Worked;
/// impl Capability for Worked {
/// 	const NAME: &'static str = "worked";
/// }
///
/// trait WorkedExt {
/// 	fn worked(&self) -> bool;
/// }
///
/// impl WorkedExt for BitmaskValueSet<Worked> {
/// 	fn worked(&self) -> bool {
/// 		true
/// 	}
/// }
///
/// let misc = Arc::new(BitmaskRegistry::declare("misc", ["foo", "bar"]).unwrap());
/// let set = BitmaskValueSet::<Worked>::from_integer(misc, 0);
/// assert!(set.worked());
///```
pub trait Capability: 'static {
	/// Shown in the `Debug` output of sets carrying this capability
	const NAME: &'static str;
}

/// The default capability, adds nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Capability for Plain {
	const NAME: &'static str = "plain";
}

/// A record's current values for one bitmask attribute.
///
/// Behaves like a set of [`Symbol`]s while only ever storing the packed integer, so the
/// integer handed to the store and the values seen by the caller can't diverge.
/// Every mutation validates its input completely before touching the set.
pub struct BitmaskValueSet<C: Capability = Plain> {
	registry: Arc<BitmaskRegistry>,
	bits: u64,
	_capability: PhantomData<fn() -> C>,
}

impl<C: Capability> BitmaskValueSet<C> {
	/// A set with no values
	#[inline(always)]
	pub fn empty(registry: Arc<BitmaskRegistry>) -> Self {
		BitmaskValueSet::from_integer(registry, 0)
	}

	/// Wraps a persisted integer. Bits no value owns are kept and handed back by [`to_integer`](Self::to_integer).
	#[inline(always)]
	pub fn from_integer(registry: Arc<BitmaskRegistry>, bits: u64) -> Self {
		BitmaskValueSet {
			registry,
			bits,
			_capability: PhantomData,
		}
	}

	/// Wraps a possibly `NULL` column, read as `0`
	#[inline(always)]
	pub fn from_stored(registry: Arc<BitmaskRegistry>, stored: Option<u64>) -> Self {
		BitmaskValueSet::from_integer(registry, stored.unwrap_or(0))
	}

	/// Builds a set from a collection of values, duplicates collapse and blanks are skipped
	///```
	/// use std::sync::Arc;
	/// use bitmask_attrs::prelude::*;
	///
	/// let medium = Arc::new(BitmaskRegistry::declare("medium", ["web", "print", "email", "phone"]).unwrap());
	/// let set: BitmaskValueSet = BitmaskValueSet::from_values(medium, ["web", "print", "web", ""]).unwrap();
	///
	/// assert_eq!(set.len(), 2);
	/// assert_eq!(set.to_integer(), 0b11);
	///```
	pub fn from_values<I, S>(registry: Arc<BitmaskRegistry>, values: I) -> InternalResult<Self>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let bits = registry.mask_for(values)?;
		Ok(BitmaskValueSet::from_integer(registry, bits))
	}

	/// A copy of this set carrying capability `D`, same registry and bits
	///```
	/// use std::sync::Arc;
	/// use bitmask_attrs::prelude::*;
	///
	/// struct Audited;
	/// impl Capability for Audited {
	/// 	const NAME: &'static str = "audited";
	/// }
	///
	/// let misc = Arc::new(BitmaskRegistry::declare("misc", ["foo", "bar"]).unwrap());
	/// let plain: BitmaskValueSet = BitmaskValueSet::from_integer(misc, 0b10);
	///
	/// let audited = plain.with_capability::<Audited>();
	/// assert_eq!(audited.to_integer(), plain.to_integer());
	///```
	#[inline(always)]
	pub fn with_capability<D: Capability>(&self) -> BitmaskValueSet<D> {
		BitmaskValueSet::from_integer(self.registry.clone(), self.bits)
	}

	/// Same as [`with_capability`](Self::with_capability), consuming this set
	#[inline(always)]
	pub fn into_capability<D: Capability>(self) -> BitmaskValueSet<D> {
		BitmaskValueSet::from_integer(self.registry, self.bits)
	}

	/// The registry this set validates against
	#[inline(always)]
	pub fn registry(&self) -> &Arc<BitmaskRegistry> {
		&self.registry
	}

	/// The attribute this set belongs to
	#[inline(always)]
	pub fn attribute(&self) -> &str {
		self.registry.attribute()
	}

	/// Turns a value on, returns whether it was previously off. Blank input is ignored.
	pub fn add(&mut self, value: impl AsRef<str>) -> InternalResult<bool> {
		match self.registry.resolve(value)? {
			Some((_, bit)) => {
				let inserted = (self.bits & bit) == 0;
				self.bits |= bit;
				Ok(inserted)
			},
			None => Ok(false),
		}
	}

	/// Turns on every value in `values`, or none of them if any is unsupported
	pub fn add_all<I, S>(&mut self, values: I) -> InternalResult
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mask = self.registry.mask_for(values)?;
		self.bits |= mask;
		Ok(())
	}

	/// Turns a value off, returns whether it was previously on
	pub fn remove(&mut self, value: impl AsRef<str>) -> InternalResult<bool> {
		match self.registry.resolve(value)? {
			Some((_, bit)) => {
				let removed = (self.bits & bit) != 0;
				self.bits &= !bit;
				Ok(removed)
			},
			None => Ok(false),
		}
	}

	/// Discards every current value, including undeclared bits, and assigns `values` in their place.
	/// The set is left untouched when `values` holds an unsupported entry.
	pub fn replace<I, S>(&mut self, values: I) -> InternalResult
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.bits = self.registry.mask_for(values)?;
		Ok(())
	}

	/// Turns every value off
	#[inline(always)]
	pub fn clear(&mut self) {
		self.bits = 0;
	}

	/// Whether `value` is on. Undeclared and blank values are never on.
	pub fn contains(&self, value: impl AsRef<str>) -> bool {
		match self.registry.resolve(value) {
			Ok(Some((_, bit))) => (self.bits & bit) != 0,
			_ => false,
		}
	}

	/// Whether every one of `values` is on, blanks are skipped
	pub fn contains_all<I, S>(&self, values: I) -> bool
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		values.into_iter().all(|value| match self.registry.resolve(value) {
			Ok(Some((_, bit))) => (self.bits & bit) != 0,
			Ok(None) => true,
			Err(_) => false,
		})
	}

	/// Whether at least one declared value is on
	#[inline(always)]
	pub fn any_set(&self) -> bool {
		self.declared_bits() != 0
	}

	/// Number of declared values that are on
	#[inline(always)]
	pub fn len(&self) -> usize {
		self.declared_bits().count_ones() as usize
	}

	/// Whether no declared value is on
	#[inline(always)]
	pub fn is_empty(&self) -> bool {
		!self.any_set()
	}

	/// The values that are on, in declaration order
	pub fn iter(&self) -> impl Iterator<Item = &Symbol> + '_ {
		self.registry.decode(self.bits)
	}

	/// Collects the values that are on
	pub fn to_vec(&self) -> Vec<Symbol> {
		self.iter().cloned().collect()
	}

	/// The packed integer to persist
	#[inline(always)]
	pub fn to_integer(&self) -> u64 {
		self.bits
	}

	/// The column value to persist, `None` for an empty set on a nullable attribute
	pub fn to_stored(&self) -> Option<u64> {
		if self.bits == 0 && self.registry.is_nullable() {
			None
		} else {
			Some(self.bits)
		}
	}

	/// Bits that were loaded from storage but belong to no declared value
	#[inline(always)]
	pub fn undeclared_bits(&self) -> u64 {
		self.bits & !self.registry.declared_mask()
	}

	#[inline(always)]
	fn declared_bits(&self) -> u64 {
		self.bits & self.registry.declared_mask()
	}
}

impl<C: Capability> Clone for BitmaskValueSet<C> {
	fn clone(&self) -> Self {
		BitmaskValueSet::from_integer(self.registry.clone(), self.bits)
	}
}

impl<C: Capability> PartialEq for BitmaskValueSet<C> {
	fn eq(&self, other: &Self) -> bool {
		self.bits == other.bits
			&& (Arc::ptr_eq(&self.registry, &other.registry) || self.registry.attribute() == other.registry.attribute())
	}
}

impl<C: Capability> Eq for BitmaskValueSet<C> {}

impl<C: Capability> fmt::Display for BitmaskValueSet<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[")?;
		for (index, symbol) in self.iter().enumerate() {
			if index > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}", symbol)?;
		}
		f.write_str("]")
	}
}

impl<C: Capability> fmt::Debug for BitmaskValueSet<C> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"BitmaskValueSet<{}>[{}]: {:?} <{}u64 : {:#b}>",
			C::NAME,
			self.registry.attribute(),
			self.to_vec(),
			self.bits,
			self.bits
		)
	}
}
