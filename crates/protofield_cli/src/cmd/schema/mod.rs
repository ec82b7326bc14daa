use std::path::PathBuf;

use protofield::field::{FieldError, Result, Schema};

use crate::cmd::util::render_shape;

#[derive(clap::Args)]
pub struct Args {
	pub schema: PathBuf,
	#[arg(long)]
	pub message: Option<String>,
}

/// Print schema counts and, optionally, one message's field table.
pub fn run(args: Args) -> Result<()> {
	let Args { schema: path, message } = args;
	let schema = Schema::open(&path)?;

	println!("path: {}", path.display());
	println!("enums: {}", schema.enums.len());
	println!("messages: {}", schema.messages.len());

	if let Some(name) = message {
		let desc = schema.message_by_name(&name).ok_or(FieldError::MessageNotFound { name })?;
		println!("message: {}", desc.name);
		println!("field_count: {}", desc.fields.len());
		for field in &desc.fields {
			println!("  {} {} {}", field.number, render_shape(&schema, field.shape), field.name);
		}
	}

	Ok(())
}
