use std::fmt;

use protofield::field::{PlainEnum, PlainValue};

/// Output truncation and formatting limits for exported values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single struct.
	pub max_fields_per_struct: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for arrays and maps.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested containers and structs.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_struct: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Indented text rendering of one exported value tree.
pub struct ValueTree<'a> {
	value: &'a PlainValue,
	options: PrintOptions,
}

impl<'a> ValueTree<'a> {
	/// Wrap a value tree with its print limits.
	pub fn new(value: &'a PlainValue, options: PrintOptions) -> Self {
		Self { value, options }
	}
}

impl fmt::Display for ValueTree<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_value(f, self.value, 0, 0, self.options)
	}
}

/// Print one exported value tree on stdout.
pub fn print_value(value: &PlainValue, options: PrintOptions) {
	print!("{}", ValueTree::new(value, options));
}

/// Render one exported value tree as indented text.
pub fn render_value(value: &PlainValue, options: PrintOptions) -> String {
	ValueTree::new(value, options).to_string()
}

fn write_value(out: &mut fmt::Formatter<'_>, value: &PlainValue, indent: usize, depth: u32, options: PrintOptions) -> fmt::Result {
	let pad = " ".repeat(indent);
	match value {
		PlainValue::Array(items) => {
			if depth >= options.max_print_depth {
				return writeln!(out, "{pad}[... {} items]", items.len());
			}
			if items.is_empty() {
				return writeln!(out, "{pad}[]");
			}
			writeln!(out, "{pad}[")?;
			for item in items.iter().take(options.max_array_items) {
				write_value(out, item, indent + 2, depth + 1, options)?;
			}
			if items.len() > options.max_array_items {
				writeln!(out, "{pad}  ... {} more", items.len() - options.max_array_items)?;
			}
			writeln!(out, "{pad}]")
		}
		PlainValue::Map(entries) => {
			if depth >= options.max_print_depth {
				return writeln!(out, "{pad}{{... {} entries}}", entries.len());
			}
			if entries.is_empty() {
				return writeln!(out, "{pad}{{}}");
			}
			writeln!(out, "{pad}{{")?;
			for (key, value) in entries.iter().take(options.max_array_items) {
				write!(out, "{pad}  {} => ", scalar_text(key, options))?;
				write_member(out, value, indent + 4, depth + 1, options)?;
			}
			if entries.len() > options.max_array_items {
				writeln!(out, "{pad}  ... {} more", entries.len() - options.max_array_items)?;
			}
			writeln!(out, "{pad}}}")
		}
		PlainValue::Struct(item) => {
			if depth >= options.max_print_depth {
				return writeln!(out, "{pad}{} {{ ... }}", item.type_name);
			}
			writeln!(out, "{pad}{} {{", item.type_name)?;
			for field in item.fields.iter().take(options.max_fields_per_struct) {
				write!(out, "{pad}  {} = ", field.name)?;
				write_member(out, &field.value, indent + 4, depth + 1, options)?;
			}
			if item.fields.len() > options.max_fields_per_struct {
				writeln!(out, "{pad}  ... {} more fields", item.fields.len() - options.max_fields_per_struct)?;
			}
			writeln!(out, "{pad}}}")
		}
		scalar => writeln!(out, "{pad}{}", scalar_text(scalar, options)),
	}
}

/// Write a struct field or map value that follows an inline label.
fn write_member(out: &mut fmt::Formatter<'_>, value: &PlainValue, indent: usize, depth: u32, options: PrintOptions) -> fmt::Result {
	if is_nested(value) {
		writeln!(out)?;
		write_value(out, value, indent, depth, options)
	} else {
		write_value(out, value, 0, depth, options)
	}
}

fn is_nested(value: &PlainValue) -> bool {
	match value {
		PlainValue::Array(items) => !items.is_empty(),
		PlainValue::Map(entries) => !entries.is_empty(),
		PlainValue::Struct(_) => true,
		_ => false,
	}
}

fn scalar_text(value: &PlainValue, options: PrintOptions) -> String {
	match value {
		PlainValue::Bool(v) => v.to_string(),
		PlainValue::I64(v) => v.to_string(),
		PlainValue::U64(v) => v.to_string(),
		PlainValue::F32(v) => v.to_string(),
		PlainValue::F64(v) => v.to_string(),
		PlainValue::Bytes(v) => format!("bytes[{}]", v.len()),
		PlainValue::String(v) => format!("\"{}\"", truncate(v, options.max_string_len)),
		PlainValue::Enum(PlainEnum { code, name: Some(name) }) => format!("{name} ({code})"),
		PlainValue::Enum(PlainEnum { code, name: None }) => code.to_string(),
		PlainValue::Array(items) => format!("[{} items]", items.len()),
		PlainValue::Map(entries) => format!("{{{} entries}}", entries.len()),
		PlainValue::Struct(item) => format!("{} {{ ... }}", item.type_name),
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}
