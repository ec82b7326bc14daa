use std::path::PathBuf;

use protofield::field::{ExportMode, ExportOptions, Exported, Result, Schema};

use crate::cmd::print::{PrintOptions, print_value};
use crate::cmd::util::{emit_json, load_message};

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	pub input: PathBuf,
	#[arg(long)]
	pub message: String,
	#[arg(long)]
	pub json: bool,
	#[arg(long)]
	pub proto3: bool,
}

/// Build a message from a JSON document and print its plain or JSON-safe projection.
pub fn run(args: Args) -> Result<()> {
	let Args {
		schema: schema_path,
		input,
		message,
		json,
		proto3,
	} = args;

	let schema = Schema::open(&schema_path)?;
	let record = load_message(&schema, &message, &input)?;
	let options = if proto3 { ExportOptions::proto3_json() } else { ExportOptions::default() };
	let mode = if json { ExportMode::JsonSafe } else { ExportMode::Plain };

	match record.export(mode, &options) {
		Exported::Json(value) => emit_json(&value)?,
		Exported::Plain(value) => {
			println!("path: {}", input.display());
			println!("message: {}", record.type_name());
			print_value(&value, PrintOptions::default());
		}
	}

	Ok(())
}
