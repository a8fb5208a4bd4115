use bitmask_attrs::{prelude::Rule, query};

use super::CommandTrait;
use crate::keys::key_names;

pub const VERSION: &str = "0.1";

/// This command builds a predicate and tests stored integers against it
pub struct Evaluator;

impl CommandTrait for Evaluator {
	fn evaluate(&self, args: &clap::ArgMatches) -> anyhow::Result<()> {
		let (schema, attribute) = super::read_schema(args, args.value_of(key_names::COLUMN))?;
		let registry = schema.registry(&attribute)?;

		let rule = match args.value_of(key_names::RULE).map(|r| r.to_ascii_lowercase()).as_deref() {
			Some("any") => Rule::Any,
			Some("all") | None => Rule::All,
			Some("has-any") => Rule::HasAny,
			Some("none") => Rule::None,
			Some(rule) => anyhow::bail!("Unknown rule provided: {}. Valid rules are: 'any' 'all' 'has-any' 'none'", rule),
		};

		let values: Vec<&str> = args.values_of(key_names::VALUES).map(|v| v.collect()).unwrap_or_default();
		let predicate = query::predicate(registry, rule, &values)?;

		log::info!("{}", predicate);
		println!("{}", predicate.sql_condition());

		if let Some(stored) = args.values_of(key_names::STORED) {
			for entry in stored {
				let entry = entry.trim();

				let value = if entry.eq_ignore_ascii_case("null") {
					None
				} else {
					Some(super::parse_integer(entry)?)
				};

				let verdict = if predicate.matches_stored(value) { "match" } else { "-" };
				println!("{}\t{}", entry, verdict);
			}
		};

		Ok(())
	}
}
