use super::CommandTrait;
use crate::keys::key_names;

pub const VERSION: &str = "0.1";

/// This command packs values into the integer a store would persist
pub struct Evaluator;

impl CommandTrait for Evaluator {
	fn evaluate(&self, args: &clap::ArgMatches) -> anyhow::Result<()> {
		let (schema, attribute) = super::read_schema(args, None)?;
		let values: Vec<&str> = args.values_of(key_names::VALUES).map(|v| v.collect()).unwrap_or_default();

		if values.is_empty() {
			log::warn!("No values provided, the encoded set is empty");
		};

		let mask = schema.bitmask_for(&attribute, &values)?;
		log::info!("Encoded {} value(s) of: {}", values.len(), attribute);

		println!("{}", mask);

		Ok(())
	}
}
