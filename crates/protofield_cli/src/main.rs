#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "protofield", about = "Typed protobuf field container tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Schema(cmd::schema::Args),
	Export(cmd::export::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> protofield::field::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Schema(args) => cmd::schema::run(args),
		Commands::Export(args) => cmd::export::run(args),
	}
}
