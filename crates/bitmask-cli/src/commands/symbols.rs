use tabled::{
	Table, Tabled,
	settings::{*, object::Columns},
};

use super::CommandTrait;

pub const VERSION: &str = "0.1";

/// This command lists the values of an attribute in tabulated form
pub struct Evaluator;

impl CommandTrait for Evaluator {
	fn evaluate(&self, args: &clap::ArgMatches) -> anyhow::Result<()> {
		let (schema, attribute) = super::read_schema(args, None)?;
		let registry = schema.registry(&attribute)?;

		// log basic metadata
		println!("{}", registry);

		let entries: Vec<SymbolTableEntry> = registry
			.bits()
			.map(|(symbol, bit)| SymbolTableEntry {
				value: symbol.as_str(),
				bit,
				binary: format!("{:#b}", bit),
				accessor: registry.accessor_name(symbol),
			})
			.collect();

		let mut table = Table::new(entries);
		table
			.with(Style::rounded())
			.with(Modify::list(Columns::new(..1), Alignment::left()));

		println!("{}", table);

		Ok(())
	}
}

#[derive(Tabled)]
struct SymbolTableEntry<'a> {
	value: &'a str,
	bit: u64,
	binary: String,
	accessor: String,
}
