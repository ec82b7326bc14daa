use std::path::Path;

use protofield::field::{FieldShape, Input, Message, Result, Schema};

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize + ?Sized>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Render a field shape as `type`, `repeated type`, or `map<key, value>`.
pub(crate) fn render_shape(schema: &Schema, shape: FieldShape) -> String {
	match shape {
		FieldShape::Singular(ty) => schema.type_name(ty).to_owned(),
		FieldShape::Repeated(ty) => format!("repeated {}", schema.type_name(ty)),
		FieldShape::Map { key, value } => format!("map<{}, {}>", schema.type_name(key), schema.type_name(value)),
	}
}

/// Read a JSON document and build a message of the named type from it.
///
/// A top-level object is a field-name mapping; `null` builds an empty message.
pub(crate) fn load_message<'s>(schema: &'s Schema, message: &str, input: &Path) -> Result<Message<'s>> {
	let text = std::fs::read_to_string(input)?;
	let document: serde_json::Value = serde_json::from_str(&text)?;
	match Input::from_json(document) {
		Input::Fields(entries) => schema.build_message(message, entries),
		Input::Null => schema.new_message(message),
		other => Err(protofield::field::FieldError::Type {
			value: other.describe(),
			expected: format!("message {message}"),
		}),
	}
}
