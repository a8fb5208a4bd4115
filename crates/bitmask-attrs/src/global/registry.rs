use std::{fmt, sync::Arc};
use hashbrown::HashMap;

use super::{config::AttributeConfig, error::*, symbol::Symbol};

/// The immutable value ↔ bit mapping of one bitmask attribute.
///
/// The `i`th declared value owns bit `1 << i`. Assignment follows declaration order and
/// never changes after [`declare`](BitmaskRegistry::declare), so registries are safely shared
/// (usually behind an [`Arc`]) between every record carrying the attribute.
pub struct BitmaskRegistry {
	attribute: Arc<str>,
	column: Arc<str>,
	nullable: bool,
	width: u32,
	symbols: Vec<Symbol>,
	bits: HashMap<Symbol, u64>,
}

impl BitmaskRegistry {
	/// Declare an attribute using the default [`AttributeConfig`]
	///```
	/// use bitmask_attrs::prelude::*;
	///
	/// let medium = BitmaskRegistry::declare("medium", ["web", "print", "email", "phone"]).unwrap();
	/// assert_eq!(medium.bit_for("email").unwrap(), 4);
	///```
	pub fn declare<I, S>(attribute: &str, symbols: I) -> InternalResult<BitmaskRegistry>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		BitmaskRegistry::declare_with(attribute, symbols, &AttributeConfig::default())
	}

	/// Declare an attribute, validating the value list against `config`
	pub fn declare_with<I, S>(attribute: &str, symbols: I, config: &AttributeConfig) -> InternalResult<BitmaskRegistry>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		if config.bit_width == 0 || config.bit_width > crate::MAX_BIT_WIDTH {
			return Err(InternalError::InvalidBitWidthError(attribute.to_string(), config.bit_width));
		};

		let mut ordered: Vec<Symbol> = Vec::new();
		let mut bits: HashMap<Symbol, u64> = HashMap::new();

		for value in symbols {
			let value = match Symbol::normalize(value.as_ref()) {
				Some(value) => value,
				None => return Err(InternalError::BlankValueError(attribute.to_string())),
			};

			if bits.contains_key(value) {
				return Err(InternalError::DuplicateValueError {
					attribute: attribute.to_string(),
					value: value.to_string(),
				});
			};

			// Checked before shifting, the shift would overflow past 64 values
			if ordered.len() >= config.bit_width as usize {
				return Err(InternalError::BitWidthOverflowError {
					attribute: attribute.to_string(),
					count: ordered.len() + 1,
					width: config.bit_width,
				});
			};

			let symbol = Symbol::from(value);
			bits.insert(symbol.clone(), 1u64 << ordered.len());
			ordered.push(symbol);
		}

		if ordered.is_empty() {
			return Err(InternalError::EmptyDeclarationError(attribute.to_string()));
		};

		let column = config.column.as_deref().unwrap_or(attribute);
		log::debug!(
			"Declared bitmask attribute: {} (column: {}) with {} values",
			attribute,
			column,
			ordered.len()
		);

		Ok(BitmaskRegistry {
			attribute: Arc::from(attribute),
			column: Arc::from(column),
			nullable: config.nullable,
			width: config.bit_width,
			symbols: ordered,
			bits,
		})
	}

	/// The attribute name this registry was declared under
	#[inline(always)]
	pub fn attribute(&self) -> &str {
		&self.attribute
	}

	/// The storage column holding the packed integer
	#[inline(always)]
	pub fn column(&self) -> &str {
		&self.column
	}

	#[inline(always)]
	pub(crate) fn column_arc(&self) -> &Arc<str> {
		&self.column
	}

	/// Whether an empty set is persisted as `NULL`
	#[inline(always)]
	pub fn is_nullable(&self) -> bool {
		self.nullable
	}

	/// Number of bits this attribute may use
	#[inline(always)]
	pub fn bit_width(&self) -> u32 {
		self.width
	}

	/// The declared values, in declaration order
	#[inline(always)]
	pub fn symbols(&self) -> &[Symbol] {
		&self.symbols
	}

	/// Number of declared values
	#[inline(always)]
	pub fn len(&self) -> usize {
		self.symbols.len()
	}

	/// Always false, an attribute can't be declared without values
	#[inline(always)]
	pub fn is_empty(&self) -> bool {
		self.symbols.is_empty()
	}

	/// Iterates `(value, bit)` pairs in declaration order
	pub fn bits(&self) -> impl Iterator<Item = (&Symbol, u64)> + '_ {
		self.symbols.iter().enumerate().map(|(index, symbol)| (symbol, 1u64 << index))
	}

	/// OR of the bits of every declared value
	pub fn declared_mask(&self) -> u64 {
		match self.symbols.len() {
			64 => u64::MAX,
			len => (1u64 << len) - 1,
		}
	}

	/// Whether `value` names a declared value
	pub fn is_declared(&self, value: impl AsRef<str>) -> bool {
		self.bits.contains_key(value.as_ref())
	}

	/// Resolves `value` to its declared [`Symbol`] and bit, blank input yields `Ok(None)`
	pub fn resolve(&self, value: impl AsRef<str>) -> InternalResult<Option<(&Symbol, u64)>> {
		let value = match Symbol::normalize(value.as_ref()) {
			Some(value) => value,
			None => return Ok(None),
		};

		match self.bits.get_key_value(value) {
			Some((symbol, bit)) => Ok(Some((symbol, *bit))),
			None => Err(self.unsupported(value)),
		}
	}

	/// Fetch the bit owned by `value`
	pub fn bit_for(&self, value: impl AsRef<str>) -> InternalResult<u64> {
		let value = value.as_ref();

		match self.resolve(value)? {
			Some((_, bit)) => Ok(bit),
			None => Err(self.unsupported(value)),
		}
	}

	/// ORs together the bits of `values`. Blank entries are skipped, and the first unsupported entry fails the whole call.
	///```
	/// use bitmask_attrs::prelude::*;
	///
	/// let medium = BitmaskRegistry::declare("medium", ["web", "print", "email", "phone"]).unwrap();
	/// assert_eq!(medium.mask_for(["web", "print", ""]).unwrap(), 0b11);
	/// assert!(medium.mask_for(["web", "fax"]).is_err());
	///```
	pub fn mask_for<I, S>(&self, values: I) -> InternalResult<u64>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut mask = 0;

		for value in values {
			if let Some((_, bit)) = self.resolve(value)? {
				mask |= bit;
			}
		}

		Ok(mask)
	}

	/// Declared values whose bit is set in `bits`, in declaration order. Undeclared bits are ignored.
	pub fn decode(&self, bits: u64) -> impl Iterator<Item = &Symbol> + '_ {
		self.bits()
			.filter(move |(_, bit)| (bits & bit) != 0)
			.map(|(symbol, _)| symbol)
	}

	/// The name of the per-value accessor generated for `symbol`, eg: `medium_for_web`
	pub fn accessor_name(&self, symbol: &Symbol) -> String {
		format!("{}_for_{}", self.attribute, symbol)
	}

	pub(crate) fn unsupported(&self, value: &str) -> InternalError {
		InternalError::UnsupportedValueError {
			attribute: self.attribute.to_string(),
			value: value.to_string(),
		}
	}
}

impl fmt::Display for BitmaskRegistry {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"[BitmaskRegistry] attribute: {}, column: {}, values: {}, bit width: {}",
			self.attribute,
			self.column,
			self.symbols.len(),
			self.width
		)
	}
}

impl fmt::Debug for BitmaskRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BitmaskRegistry")
			.field("attribute", &self.attribute)
			.field("column", &self.column)
			.field("nullable", &self.nullable)
			.field("width", &self.width)
			.field("symbols", &self.symbols)
			.finish()
	}
}
