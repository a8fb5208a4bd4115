use std::{fmt, sync::Arc};

use crate::global::{error::*, registry::BitmaskRegistry};

/// How a stored integer is compared against a [`Predicate`]'s mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
	/// At least one flag is set, the mask is ignored
	Any,
	/// Every bit of the mask is set
	All,
	/// At least one bit of the mask is set
	HasAny,
	/// No bit of the mask is set, or no flag at all when the mask is empty
	None,
}

impl fmt::Display for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Rule::Any => "any",
			Rule::All => "all",
			Rule::HasAny => "has-any",
			Rule::None => "none",
		};

		f.write_str(name)
	}
}

/// A bitwise filter over one attribute's column, handed to a record store to evaluate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
	attribute: Arc<str>,
	column: Arc<str>,
	mask: u64,
	rule: Rule,
}

impl Predicate {
	/// The attribute this predicate filters on
	#[inline(always)]
	pub fn attribute(&self) -> &str {
		&self.attribute
	}

	/// The column the store should test
	#[inline(always)]
	pub fn column(&self) -> &str {
		&self.column
	}

	/// The requested bits
	#[inline(always)]
	pub fn mask(&self) -> u64 {
		self.mask
	}

	/// The matching rule
	#[inline(always)]
	pub fn rule(&self) -> Rule {
		self.rule
	}

	/// Tests a stored integer
	pub fn matches(&self, stored: u64) -> bool {
		match self.rule {
			Rule::Any => stored != 0,
			Rule::All => (stored & self.mask) == self.mask,
			Rule::HasAny => (stored & self.mask) != 0,
			Rule::None if self.mask == 0 => stored == 0,
			Rule::None => (stored & self.mask) == 0,
		}
	}

	/// Tests a possibly `NULL` column, `NULL` reads as `0`
	#[inline(always)]
	pub fn matches_stored(&self, stored: Option<u64>) -> bool {
		self.matches(stored.unwrap_or(0))
	}

	/// Renders this predicate as a SQL condition, `NULL` columns count as having no flags
	///```
	/// use bitmask_attrs::prelude::*;
	/// use bitmask_attrs::query::{no, predicate};
	///
	/// let medium = BitmaskRegistry::declare("medium", ["web", "print", "email", "phone"]).unwrap();
	///
	/// let any = predicate(&medium, Rule::HasAny, ["print", "email"]).unwrap();
	/// assert_eq!(any.sql_condition(), r#""medium" & 6 <> 0"#);
	///
	/// let none = no(&medium);
	/// assert_eq!(none.sql_condition(), r#"("medium" IS NULL OR "medium" = 0)"#);
	///```
	pub fn sql_condition(&self) -> String {
		let column = quote_identifier(&self.column);
		// Columns are signed 64-bit, bit 63 renders as a negative literal
		let mask = self.mask as i64;

		match self.rule {
			Rule::Any => format!("{} <> 0", column),
			Rule::All => format!("{} & {} = {}", column, mask, mask),
			Rule::HasAny => format!("{} & {} <> 0", column, mask),
			Rule::None if mask == 0 => format!("({} IS NULL OR {} = 0)", column, column),
			Rule::None => format!("({} IS NULL OR {} & {} = 0)", column, column, mask),
		}
	}
}

impl fmt::Display for Predicate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}({}) mask: {:#b}", self.rule, self.attribute, self.mask)
	}
}

fn quote_identifier(identifier: &str) -> String {
	format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// ORs together the bits of `values`, rejecting unsupported values exactly as assignment does
#[inline(always)]
pub fn mask_for<I, S>(registry: &BitmaskRegistry, values: I) -> InternalResult<u64>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	registry.mask_for(values)
}

/// Builds a predicate over `registry`'s column.
///
/// With no (non-blank) values, [`Rule::All`], [`Rule::HasAny`] and [`Rule::Any`] all mean "any flag is set"
/// and [`Rule::None`] means "no flag is set". [`Rule::Any`] with values is treated as [`Rule::HasAny`].
pub fn predicate<I, S>(registry: &BitmaskRegistry, rule: Rule, values: I) -> InternalResult<Predicate>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mask = registry.mask_for(values)?;

	let rule = match (rule, mask) {
		(Rule::None, _) => Rule::None,
		(_, 0) => Rule::Any,
		(Rule::Any, _) => Rule::HasAny,
		(rule, _) => rule,
	};

	Ok(Predicate {
		attribute: Arc::from(registry.attribute()),
		column: registry.column_arc().clone(),
		mask,
		rule,
	})
}

/// Records holding every one of `values`, or any value at all when `values` is empty
pub fn with<I, S>(registry: &BitmaskRegistry, values: I) -> InternalResult<Predicate>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	predicate(registry, Rule::All, values)
}

/// Records holding at least one of `values`
pub fn with_any<I, S>(registry: &BitmaskRegistry, values: I) -> InternalResult<Predicate>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	predicate(registry, Rule::HasAny, values)
}

/// Records holding none of `values`, or no value at all when `values` is empty
pub fn without<I, S>(registry: &BitmaskRegistry, values: I) -> InternalResult<Predicate>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	predicate(registry, Rule::None, values)
}

/// Records with no flag set
pub fn no(registry: &BitmaskRegistry) -> Predicate {
	Predicate {
		attribute: Arc::from(registry.attribute()),
		column: registry.column_arc().clone(),
		mask: 0,
		rule: Rule::None,
	}
}

/// Records with a single bit set, used by per-value accessors
pub(crate) fn single(registry: &BitmaskRegistry, bit: u64) -> Predicate {
	Predicate {
		attribute: Arc::from(registry.attribute()),
		column: registry.column_arc().clone(),
		mask: bit,
		rule: Rule::HasAny,
	}
}
