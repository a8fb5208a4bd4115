use std::fmt;

use super::predicate::Predicate;

/// A conjunction of [`Predicate`]s, possibly over different attributes.
/// A row matches only if it matches every predicate, an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
	predicates: Vec<Predicate>,
}

impl Filter {
	/// An empty filter
	#[inline(always)]
	pub fn new() -> Filter {
		Filter::default()
	}

	/// Chains another predicate onto this filter
	pub fn and(mut self, predicate: Predicate) -> Filter {
		self.predicates.push(predicate);
		self
	}

	/// Same as [`and`](Filter::and), in place
	pub fn push(&mut self, predicate: Predicate) {
		self.predicates.push(predicate);
	}

	/// The chained predicates, in the order they were added
	#[inline(always)]
	pub fn predicates(&self) -> &[Predicate] {
		&self.predicates
	}

	/// Whether no predicate was chained
	#[inline(always)]
	pub fn is_empty(&self) -> bool {
		self.predicates.is_empty()
	}

	/// Tests a row, `lookup` maps a column name to its stored value
	pub fn matches_with<F>(&self, lookup: F) -> bool
	where
		F: Fn(&str) -> Option<u64>,
	{
		self.predicates
			.iter()
			.all(|predicate| predicate.matches_stored(lookup(predicate.column())))
	}

	/// Renders the whole conjunction as a SQL condition
	pub fn sql_condition(&self) -> String {
		if self.predicates.is_empty() {
			return "1 = 1".to_string();
		};

		self.predicates
			.iter()
			.map(Predicate::sql_condition)
			.collect::<Vec<_>>()
			.join(" AND ")
	}
}

impl From<Predicate> for Filter {
	fn from(predicate: Predicate) -> Filter {
		Filter::new().and(predicate)
	}
}

impl fmt::Display for Filter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[Filter] {}", self.sql_condition())
	}
}
