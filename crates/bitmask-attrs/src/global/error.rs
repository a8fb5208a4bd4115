use thiserror::Error;

/// Internal `Result` type alias used by `bitmask-attrs`. Basically equal to: `Result<T, InternalError>`
pub type InternalResult<T = ()> = Result<T, InternalError>;

/// All errors manifestable within `bitmask-attrs` collected into a neat enum
#[derive(Debug, Error)]
pub enum InternalError {
	/// an attribute was declared without any values
	#[error("[BitmaskError::SchemaError] The attribute: {0} must declare at least one value")]
	EmptyDeclarationError(String),
	/// an attribute declared the same value twice, contains the attribute and the repeated value
	#[error("[BitmaskError::SchemaError] The attribute: {attribute} declares the value: {value} more than once")]
	DuplicateValueError {
		/// The offending attribute
		attribute: String,
		/// The repeated value
		value: String,
	},
	/// an attribute declared an empty or whitespace-only value
	#[error("[BitmaskError::SchemaError] The attribute: {0} declares a blank value")]
	BlankValueError(String),
	/// an attribute declared more values than there are bits available in its column
	#[error("[BitmaskError::SchemaError] The attribute: {attribute} declares {count} values, but only {width} bits are available")]
	BitWidthOverflowError {
		/// The offending attribute
		attribute: String,
		/// Number of declared values
		count: usize,
		/// Usable bits in the column
		width: u32,
	},
	/// the configured bit width is zero or wider than [`crate::MAX_BIT_WIDTH`]
	#[error("[BitmaskError::SchemaError] The attribute: {} requested a bit width of {}, valid widths are 1..={}", .0, .1, crate::MAX_BIT_WIDTH)]
	InvalidBitWidthError(String, u32),
	/// two attributes with the same name were declared on one schema
	#[error("[BitmaskError::SchemaError] The attribute: {attribute} is declared more than once on: {type_name}")]
	DuplicateAttributeError {
		/// The schema being declared
		type_name: String,
		/// The repeated attribute
		attribute: String,
	},
	/// two attributes produce the same `{attribute}_for_{value}` accessor name
	#[error("[BitmaskError::SchemaError] The accessor: {0} would be generated by more than one attribute")]
	DuplicateAccessorError(String),
	/// two attributes of one schema are stored in the same column
	#[error("[BitmaskError::SchemaError] The column: {column} is used by both: {first} and: {second}")]
	DuplicateColumnError {
		/// The shared column
		column: String,
		/// The attribute declared first
		first: String,
		/// The attribute reusing the column
		second: String,
	},
	/// the schema has no attribute with the given name
	#[error("[BitmaskError::UnknownAttributeError] {type_name} has no bitmask attribute named: {attribute}")]
	UnknownAttributeError {
		/// The schema that was searched
		type_name: String,
		/// The missing attribute
		attribute: String,
	},
	/// a value outside the declared set was used to read, assign, add, remove or query
	#[error("[BitmaskError::UnsupportedValueError] The value: {value} is not supported by the attribute: {attribute}")]
	UnsupportedValueError {
		/// The attribute the value was used on
		attribute: String,
		/// The rejected value
		value: String,
	},
	/// a record store was asked to update a row it doesn't hold
	#[error("[BitmaskError::MissingRecordError] No record with id: {0}")]
	MissingRecordError(u64),
}

impl InternalError {
	/// Whether this error was raised while declaring an attribute or a schema
	pub fn is_schema_error(&self) -> bool {
		matches!(
			self,
			InternalError::EmptyDeclarationError(_)
				| InternalError::DuplicateValueError { .. }
				| InternalError::BlankValueError(_)
				| InternalError::BitWidthOverflowError { .. }
				| InternalError::InvalidBitWidthError(..)
				| InternalError::DuplicateAttributeError { .. }
				| InternalError::DuplicateAccessorError(_)
				| InternalError::DuplicateColumnError { .. }
		)
	}

	/// Whether this error was raised by an undeclared value
	pub fn is_unsupported_value(&self) -> bool {
		matches!(self, InternalError::UnsupportedValueError { .. })
	}
}
