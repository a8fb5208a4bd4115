use std::collections::HashMap;

use anyhow::{bail, Result};
use clap::ArgMatches;
use bitmask_attrs::prelude::*;

use crate::keys::key_names;

// Trait that must be implemented by all subcommands
pub trait CommandTrait: Sync {
	fn evaluate(&self, args: &ArgMatches) -> Result<()>;
}

// All sub-commands are defined in the below modules
pub mod decode;
pub mod encode;
pub mod filter;
pub mod symbols;

pub fn build_commands() -> HashMap<&'static str, Box<dyn CommandTrait>> {
	let mut map: HashMap<&'static str, Box<dyn CommandTrait>> = HashMap::new();

	map.insert("symbols", Box::new(symbols::Evaluator));
	map.insert("encode", Box::new(encode::Evaluator));
	map.insert("decode", Box::new(decode::Evaluator));
	map.insert("filter", Box::new(filter::Evaluator));

	map
}

/// Builds a schema from every `--declare`, returns it with the name selected by `--attribute`.
/// `column` overrides the storage column of the selected attribute.
pub(crate) fn read_schema(args: &ArgMatches, column: Option<&str>) -> Result<(Schema, String)> {
	let attribute = match args.value_of(key_names::ATTRIBUTE) {
		Some(attribute) => attribute.to_string(),
		None => bail!("Please provide an attribute using the -a or --attribute keys!"),
	};

	let declarations = match args.values_of(key_names::DECLARE) {
		Some(declarations) => declarations,
		None => bail!("Please declare at least one attribute using the -d or --declare keys!"),
	};

	let mut config = AttributeConfig::default();
	if let Some(width) = args.value_of(key_names::BIT_WIDTH) {
		config = config.bit_width(width.parse()?);
	};

	let mut builder = Schema::builder("cli");
	for declaration in declarations {
		let (name, values) = match declaration.split_once('=') {
			Some(pair) => pair,
			None => bail!("Invalid declaration: {}, expected NAME=VALUE,VALUE,...", declaration),
		};

		let name = name.trim();
		let mut config = config.clone();

		if let (true, Some(column)) = (name == attribute, column) {
			config = config.column(column);
		};

		builder = builder.attribute_with(name, values.split(',').map(str::trim), config);
	}

	let schema = builder.build()?;
	log::debug!("{}", schema);

	// Fail early on a missing attribute
	schema.registry(&attribute)?;

	Ok((schema, attribute))
}

/// Parses a decimal, `0b` or `0x` prefixed integer
pub(crate) fn parse_integer(input: &str) -> Result<u64> {
	let input = input.trim().replace('_', "");

	let parsed = if let Some(binary) = input.strip_prefix("0b") {
		u64::from_str_radix(binary, 2)
	} else if let Some(hex) = input.strip_prefix("0x") {
		u64::from_str_radix(hex, 16)
	} else {
		input.parse::<u64>()
	};

	match parsed {
		Ok(value) => Ok(value),
		Err(err) => bail!("Unable to parse: {} as an integer. {}", input, err),
	}
}
