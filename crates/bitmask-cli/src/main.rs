mod app;
mod commands;
mod keys;

use std::{env, process};
use log::error;

fn main() {
	if env::var("RUST_LOG").is_err() {
		// log level not explicitly set by the user
		env::set_var("RUST_LOG", "info");
	}
	pretty_env_logger::init();

	// Build CLI
	let keys = keys::build_keys();
	let app = app::build_app(keys);
	let commands = commands::build_commands();

	// Start CLI
	let matches = app.get_matches();

	let res = match matches.subcommand() {
		Some((key, mtx)) => match commands.get(key) {
			Some(command) => command.evaluate(mtx),
			None => {
				error!("Unknown command: {}", key);
				process::exit(1)
			},
		},
		None => {
			error!("No action specified!");
			process::exit(1)
		},
	};

	if let Err(err) = res {
		error!("An error occurred while executing the command: {}", err);
		process::exit(1)
	};
}
