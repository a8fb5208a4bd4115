use clap::Arg;
use std::collections::HashMap;

pub mod key_names {
	pub(crate) const DECLARE: &str = "DECLARE";
	pub(crate) const ATTRIBUTE: &str = "ATTRIBUTE";
	pub(crate) const COLUMN: &str = "COLUMN";
	pub(crate) const BIT_WIDTH: &str = "BIT_WIDTH";

	pub(crate) const RULE: &str = "RULE";
	pub(crate) const STORED: &str = "STORED";

	pub(crate) const VALUES: &str = "VALUES";
	pub(crate) const INTEGER: &str = "INTEGER";
}

pub fn build_keys<'a>() -> HashMap<&'static str, Arg<'a>> {
	/* please only use this function once during the lifecycle of the program */
	let mut map = HashMap::with_capacity(8);

	// Attribute declarations, can be repeated
	map.insert(
		key_names::DECLARE,
		Arg::new(key_names::DECLARE)
			.short('d')
			.long("declare")
			.value_name("NAME=VALUES")
			.help("Declare a bitmask attribute and its comma separated values, eg: medium=web,print,email,phone")
			.required(true)
			.takes_value(true)
			.multiple_occurrences(true)
			.validator(|declaration| match declaration.split_once('=') {
				Some((name, values)) if !name.trim().is_empty() && !values.trim().is_empty() => Ok(()),
				_ => Err(format!(
					"Please provide a declaration in the form NAME=VALUE,VALUE,... Not: {}",
					declaration
				)),
			}),
	);

	// The attribute to operate on
	map.insert(
		key_names::ATTRIBUTE,
		Arg::new(key_names::ATTRIBUTE)
			.short('a')
			.long("attribute")
			.value_name(key_names::ATTRIBUTE)
			.help("The declared attribute to operate on")
			.required(true)
			.takes_value(true)
			.number_of_values(1),
	);

	// Storage column of the selected attribute
	map.insert(
		key_names::COLUMN,
		Arg::new(key_names::COLUMN)
			.short('c')
			.long("column")
			.value_name(key_names::COLUMN)
			.help("The storage column of the selected attribute, defaults to the attribute's name")
			.required(false)
			.takes_value(true)
			.number_of_values(1),
	);

	// Bits available to each attribute
	map.insert(
		key_names::BIT_WIDTH,
		Arg::new(key_names::BIT_WIDTH)
			.short('w')
			.long("bit-width")
			.value_name(key_names::BIT_WIDTH)
			.help("How many bits each declared attribute may use, defaults to 62")
			.required(false)
			.takes_value(true)
			.number_of_values(1)
			.validator(|width| match width.parse::<u32>() {
				Ok(w) if w > 0 && w <= bitmask_attrs::MAX_BIT_WIDTH => Ok(()),
				_ => Err(format!(
					"Please provide a bit width between 1 and {}. Not: {}",
					bitmask_attrs::MAX_BIT_WIDTH,
					width
				)),
			}),
	);

	// The matching rule of a filter
	map.insert(
		key_names::RULE,
		Arg::new(key_names::RULE)
			.short('r')
			.long("rule")
			.value_name(key_names::RULE)
			.help("The matching rule, can be 'any', 'all', 'has-any' or 'none' (case insensitive). Defaults to 'all'")
			.required(false)
			.takes_value(true)
			.number_of_values(1)
			.validator(|rule| {
				let rule = rule.to_ascii_lowercase();
				if rule != "any" && rule != "all" && rule != "has-any" && rule != "none" {
					return Err(format!(
						"Please provide a valid rule, either 'any', 'all', 'has-any' or 'none' (case insensitive). Not: {}",
						rule
					));
				};

				Ok(())
			}),
	);

	// Stored integers to test a filter against
	map.insert(
		key_names::STORED,
		Arg::new(key_names::STORED)
			.short('s')
			.long("stored")
			.value_name(key_names::STORED)
			.help("Comma separated stored integers to test the filter against, 'null' is read as 0")
			.required(false)
			.takes_value(true)
			.multiple_occurrences(true)
			.use_value_delimiter(true),
	);

	// Values to encode or query
	map.insert(
		key_names::VALUES,
		Arg::new(key_names::VALUES)
			.value_name(key_names::VALUES)
			.help("Declared values of the selected attribute")
			.required(false)
			.index(1)
			.takes_value(true)
			.multiple_values(true),
	);

	// An integer to decode
	map.insert(
		key_names::INTEGER,
		Arg::new(key_names::INTEGER)
			.value_name(key_names::INTEGER)
			.help("A stored integer, decimal or 0b/0x prefixed")
			.required(true)
			.index(1)
			.takes_value(true),
	);

	map
}
