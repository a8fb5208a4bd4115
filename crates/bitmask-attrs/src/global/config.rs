/// Settings for a single attribute declaration, see [`Schema::builder`](crate::schema::Schema::builder)
#[derive(Debug, Clone)]
pub struct AttributeConfig {
	/// The storage column holding the packed integer. Defaults to the attribute name.
	pub column: Option<String>,
	/// How many bits of the column may be assigned to values, defaults to [`crate::DEFAULT_BIT_WIDTH`]
	pub bit_width: u32,
	/// Whether an empty set is persisted as `NULL` rather than `0`
	pub nullable: bool,
}

// Helper functions
impl AttributeConfig {
	///```
	/// use bitmask_attrs::prelude::AttributeConfig;
	///
	/// let config = AttributeConfig::default().column("medium_flags");
	/// assert_eq!(config.column.as_deref(), Some("medium_flags"));
	///```
	pub fn column(mut self, column: impl Into<String>) -> Self {
		self.column = Some(column.into());
		self
	}

	/// Setter for the `bit_width` field. Past 63 bits the top value lands on the sign bit of a signed column,
	/// SQL conditions then render its mask as a negative literal
	pub fn bit_width(mut self, width: u32) -> Self {
		self.bit_width = width;
		self
	}

	/// Setter for the `nullable` field
	pub fn nullable(mut self, nullable: bool) -> Self {
		self.nullable = nullable;
		self
	}
}

impl Default for AttributeConfig {
	fn default() -> AttributeConfig {
		AttributeConfig {
			column: None,
			bit_width: crate::DEFAULT_BIT_WIDTH,
			nullable: false,
		}
	}
}
