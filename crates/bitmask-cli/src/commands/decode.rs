use bitmask_attrs::prelude::BitmaskValueSet;

use super::CommandTrait;
use crate::keys::key_names;

pub const VERSION: &str = "0.1";

/// This command unpacks a stored integer into the values it holds
pub struct Evaluator;

impl CommandTrait for Evaluator {
	fn evaluate(&self, args: &clap::ArgMatches) -> anyhow::Result<()> {
		let (schema, attribute) = super::read_schema(args, None)?;

		let integer = match args.value_of(key_names::INTEGER) {
			Some(integer) => super::parse_integer(integer)?,
			None => anyhow::bail!("Please provide an integer to decode"),
		};

		let set: BitmaskValueSet = BitmaskValueSet::from_integer(schema.registry(&attribute)?.clone(), integer);

		for value in set.iter() {
			println!("{}", value);
		}

		let undeclared = set.undeclared_bits();
		if undeclared != 0 {
			log::warn!(
				"The integer: {} holds bits no value of: {} owns: {:#b}",
				integer,
				attribute,
				undeclared
			);
		};

		Ok(())
	}
}
