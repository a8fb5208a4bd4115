use std::collections::HashMap;
use clap::{Command, Arg};

use crate::keys::key_names;
use crate::commands;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn build_app<'a>(key_map: HashMap<&'static str, Arg<'a>>) -> Command<'a> {
	Command::new("bitmask")
		.about("A command-line interface for encoding, decoding and querying bitmask attributes")
		.version(self::VERSION)
		.subcommand_required(true)
		.arg_required_else_help(true)
		.subcommand(
			Command::new("symbols")
				.version(commands::symbols::VERSION)
				.about("Lists the values of an attribute, their bits and generated accessors")
				.arg(key_map.get(key_names::DECLARE).unwrap())
				.arg(key_map.get(key_names::ATTRIBUTE).unwrap())
				.arg(key_map.get(key_names::BIT_WIDTH).unwrap()),
		)
		.subcommand(
			Command::new("encode")
				.version(commands::encode::VERSION)
				.about("Packs values into the integer to persist")
				.arg(key_map.get(key_names::DECLARE).unwrap())
				.arg(key_map.get(key_names::ATTRIBUTE).unwrap())
				.arg(key_map.get(key_names::BIT_WIDTH).unwrap())
				.arg(key_map.get(key_names::VALUES).unwrap()),
		)
		.subcommand(
			Command::new("decode")
				.version(commands::decode::VERSION)
				.about("Unpacks a stored integer into values")
				.arg(key_map.get(key_names::DECLARE).unwrap())
				.arg(key_map.get(key_names::ATTRIBUTE).unwrap())
				.arg(key_map.get(key_names::BIT_WIDTH).unwrap())
				.arg(key_map.get(key_names::INTEGER).unwrap()),
		)
		.subcommand(
			Command::new("filter")
				.version(commands::filter::VERSION)
				.about("Builds a query predicate, prints its SQL condition and tests stored integers against it")
				.arg(key_map.get(key_names::DECLARE).unwrap())
				.arg(key_map.get(key_names::ATTRIBUTE).unwrap())
				.arg(key_map.get(key_names::BIT_WIDTH).unwrap())
				.arg(key_map.get(key_names::COLUMN).unwrap())
				.arg(key_map.get(key_names::RULE).unwrap())
				.arg(key_map.get(key_names::STORED).unwrap())
				.arg(key_map.get(key_names::VALUES).unwrap()),
		)
}
