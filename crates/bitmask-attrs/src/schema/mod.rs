use std::{fmt, sync::Arc};
use hashbrown::HashMap;

use crate::global::{config::AttributeConfig, error::*, registry::BitmaskRegistry, symbol::Symbol};

mod accessor;
pub use accessor::Accessor;

/// Every bitmask attribute declared on one record type.
///
/// Owns the attribute → [`BitmaskRegistry`] mapping, and is passed explicitly wherever
/// value sets or queries are built. There is no process-wide lookup table.
pub struct Schema {
	type_name: Arc<str>,
	registries: Vec<Arc<BitmaskRegistry>>,
	positions: HashMap<Arc<str>, usize>,
	accessors: HashMap<Arc<str>, Accessor>,
}

impl Schema {
	/// Start declaring attributes for `type_name`
	///```
	/// use bitmask_attrs::prelude::*;
	///
	/// let campaign = Schema::builder("Campaign")
	/// 	.attribute("medium", ["web", "print", "email", "phone"])
	/// 	.attribute("misc", ["foo", "bar"])
	/// 	.build()
	/// 	.unwrap();
	///
	/// assert_eq!(campaign.bitmask_for("medium", ["web", "print"]).unwrap(), 0b11);
	/// assert_eq!(campaign.bitmask("misc", "foo").unwrap(), 0b1);
	///```
	pub fn builder(type_name: impl Into<String>) -> SchemaBuilder {
		SchemaBuilder {
			type_name: type_name.into(),
			declarations: Vec::new(),
		}
	}

	/// The record type this schema describes
	#[inline(always)]
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Declared registries, in declaration order
	#[inline(always)]
	pub fn attributes(&self) -> &[Arc<BitmaskRegistry>] {
		&self.registries
	}

	/// Fetch the registry of `attribute`
	pub fn registry(&self, attribute: &str) -> InternalResult<&Arc<BitmaskRegistry>> {
		self.position(attribute).map(|index| &self.registries[index])
	}

	pub(crate) fn position(&self, attribute: &str) -> InternalResult<usize> {
		match self.positions.get(attribute) {
			Some(index) => Ok(*index),
			None => Err(InternalError::UnknownAttributeError {
				type_name: self.type_name.to_string(),
				attribute: attribute.to_string(),
			}),
		}
	}

	/// The declared values of `attribute`, in declaration order
	pub fn values_for(&self, attribute: &str) -> InternalResult<&[Symbol]> {
		self.registry(attribute).map(|registry| registry.symbols())
	}

	/// The bit owned by `value` on `attribute`
	pub fn bitmask(&self, attribute: &str, value: impl AsRef<str>) -> InternalResult<u64> {
		self.registry(attribute)?.bit_for(value)
	}

	/// ORs together the bits of `values` on `attribute`
	pub fn bitmask_for<I, S>(&self, attribute: &str, values: I) -> InternalResult<u64>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.registry(attribute)?.mask_for(values)
	}

	/// Every attribute's value → bit table
	pub fn bitmasks(&self) -> HashMap<&str, HashMap<&str, u64>> {
		self.registries
			.iter()
			.map(|registry| {
				let bits = registry.bits().map(|(symbol, bit)| (symbol.as_str(), bit)).collect();
				(registry.attribute(), bits)
			})
			.collect()
	}

	/// Look up a generated per-value accessor, eg: `medium_for_web`
	pub fn accessor(&self, name: &str) -> Option<&Accessor> {
		self.accessors.get(name)
	}

	/// All generated accessors, in no particular order
	pub fn accessors(&self) -> impl Iterator<Item = &Accessor> {
		self.accessors.values()
	}
}

impl fmt::Display for Schema {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "[Schema] {}: ", self.type_name)?;
		for (index, registry) in self.registries.iter().enumerate() {
			if index > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{}({})", registry.attribute(), registry.len())?;
		}

		Ok(())
	}
}

impl fmt::Debug for Schema {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Schema")
			.field("type_name", &self.type_name)
			.field("registries", &self.registries)
			.finish()
	}
}

/// Collects attribute declarations for a [`Schema`], validation happens in [`build`](SchemaBuilder::build)
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
	type_name: String,
	declarations: Vec<(String, Vec<String>, AttributeConfig)>,
}

impl SchemaBuilder {
	/// Declare an attribute with the default [`AttributeConfig`]
	pub fn attribute<I, S>(self, name: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		self.attribute_with(name, values, AttributeConfig::default())
	}

	/// Declare an attribute with a custom column, bit width or nullability
	pub fn attribute_with<I, S>(mut self, name: impl Into<String>, values: I, config: AttributeConfig) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let values = values.into_iter().map(|v| v.as_ref().to_string()).collect();
		self.declarations.push((name.into(), values, config));
		self
	}

	/// Validates every declaration and builds the accessor table
	pub fn build(self) -> InternalResult<Schema> {
		let mut registries = Vec::with_capacity(self.declarations.len());
		let mut positions: HashMap<Arc<str>, usize> = HashMap::with_capacity(self.declarations.len());
		let mut accessors: HashMap<Arc<str>, Accessor> = HashMap::new();
		let mut columns: HashMap<Arc<str>, Arc<str>> = HashMap::with_capacity(self.declarations.len());

		for (name, values, config) in self.declarations {
			if positions.contains_key(name.as_str()) {
				return Err(InternalError::DuplicateAttributeError {
					type_name: self.type_name,
					attribute: name,
				});
			};

			let registry = Arc::new(BitmaskRegistry::declare_with(&name, &values, &config)?);

			// Each attribute owns its column
			if let Some(first) = columns.get(registry.column()) {
				return Err(InternalError::DuplicateColumnError {
					column: registry.column().to_string(),
					first: first.to_string(),
					second: name,
				});
			};
			columns.insert(registry.column_arc().clone(), Arc::from(name.as_str()));

			for (symbol, bit) in registry.bits() {
				let accessor_name: Arc<str> = Arc::from(registry.accessor_name(symbol));
				if accessors.contains_key(&accessor_name) {
					return Err(InternalError::DuplicateAccessorError(accessor_name.to_string()));
				};

				let accessor = Accessor {
					name: accessor_name.clone(),
					registry: registry.clone(),
					symbol: symbol.clone(),
					bit,
				};

				accessors.insert(accessor_name, accessor);
			}

			positions.insert(Arc::from(name.as_str()), registries.len());
			registries.push(registry);
		}

		log::debug!(
			"Built schema: {} with {} bitmask attributes and {} accessors",
			self.type_name,
			registries.len(),
			accessors.len()
		);

		Ok(Schema {
			type_name: Arc::from(self.type_name),
			registries,
			positions,
			accessors,
		})
	}
}
