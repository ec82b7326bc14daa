use crate::field::{Message, Value};

/// Write-shape value accepted by field setters.
///
/// Wider than [`Value`]: the normalizer dispatches on the target descriptor's kind and
/// either converts the input into one canonical value or rejects it.
#[derive(Debug, Clone, PartialEq)]
pub enum Input<'s> {
	/// Absent value. Clears singular fields, rejected as a sequence or map element.
	Null,
	/// Boolean literal.
	Bool(bool),
	/// Signed integer literal.
	Int(i64),
	/// Unsigned integer literal too large for `i64`, or explicitly unsigned.
	UInt(u64),
	/// Floating point literal.
	Float(f64),
	/// Text.
	Str(String),
	/// Symbolic enum name.
	Symbol(String),
	/// Raw bytes.
	Bytes(Vec<u8>),
	/// Sequence of inputs, assigned to repeated fields.
	List(Vec<Input<'s>>),
	/// Key/value input pairs, assigned to map fields.
	Map(Vec<(Input<'s>, Input<'s>)>),
	/// Field-name mapping used to build a message, or string-keyed map entries.
	Fields(Vec<(String, Input<'s>)>),
	/// Already-canonical value, including existing message instances.
	Value(Value<'s>),
}

impl<'s> Input<'s> {
	/// Symbolic enum name input.
	pub fn symbol(name: &str) -> Self {
		Self::Symbol(name.to_owned())
	}

	/// Field-name mapping input.
	pub fn fields<K: Into<String>>(entries: impl IntoIterator<Item = (K, Input<'s>)>) -> Self {
		Self::Fields(entries.into_iter().map(|(key, value)| (key.into(), value)).collect())
	}

	/// Sequence input.
	pub fn list<T: Into<Input<'s>>>(items: impl IntoIterator<Item = T>) -> Self {
		Self::List(items.into_iter().map(Into::into).collect())
	}

	/// Map entry input.
	pub fn map<K: Into<Input<'s>>, V: Into<Input<'s>>>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
		Self::Map(entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
	}

	/// Convert a parsed JSON document. Objects become [`Input::Fields`], arrays [`Input::List`].
	pub fn from_json(value: serde_json::Value) -> Self {
		use serde_json::Value as JsonValue;

		match value {
			JsonValue::Null => Self::Null,
			JsonValue::Bool(v) => Self::Bool(v),
			JsonValue::Number(n) => {
				if let Some(v) = n.as_i64() {
					Self::Int(v)
				} else if let Some(v) = n.as_u64() {
					Self::UInt(v)
				} else {
					Self::Float(n.as_f64().unwrap_or(f64::NAN))
				}
			}
			JsonValue::String(v) => Self::Str(v),
			JsonValue::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
			JsonValue::Object(entries) => Self::Fields(entries.into_iter().map(|(key, value)| (key, Self::from_json(value))).collect()),
		}
	}

	/// Short rendering used in error messages.
	pub fn describe(&self) -> String {
		match self {
			Self::Null => "null".to_owned(),
			Self::Bool(v) => v.to_string(),
			Self::Int(v) => v.to_string(),
			Self::UInt(v) => v.to_string(),
			Self::Float(v) => v.to_string(),
			Self::Str(v) => format!("{v:?}"),
			Self::Symbol(v) => format!(":{v}"),
			Self::Bytes(v) => format!("bytes[{}]", v.len()),
			Self::List(v) => format!("list[{}]", v.len()),
			Self::Map(v) => format!("map[{}]", v.len()),
			Self::Fields(v) => format!("fields[{}]", v.len()),
			Self::Value(v) => v.describe(),
		}
	}
}

impl From<bool> for Input<'_> {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i32> for Input<'_> {
	fn from(value: i32) -> Self {
		Self::Int(i64::from(value))
	}
}

impl From<i64> for Input<'_> {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<u32> for Input<'_> {
	fn from(value: u32) -> Self {
		Self::UInt(u64::from(value))
	}
}

impl From<u64> for Input<'_> {
	fn from(value: u64) -> Self {
		Self::UInt(value)
	}
}

impl From<f32> for Input<'_> {
	fn from(value: f32) -> Self {
		Self::Float(f64::from(value))
	}
}

impl From<f64> for Input<'_> {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Input<'_> {
	fn from(value: &str) -> Self {
		Self::Str(value.to_owned())
	}
}

impl From<String> for Input<'_> {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

impl From<Vec<u8>> for Input<'_> {
	fn from(value: Vec<u8>) -> Self {
		Self::Bytes(value)
	}
}

impl<'s> From<Value<'s>> for Input<'s> {
	fn from(value: Value<'s>) -> Self {
		Self::Value(value)
	}
}

impl<'s> From<Message<'s>> for Input<'s> {
	fn from(value: Message<'s>) -> Self {
		Self::Value(Value::Message(Box::new(value)))
	}
}

impl From<serde_json::Value> for Input<'_> {
	fn from(value: serde_json::Value) -> Self {
		Self::from_json(value)
	}
}
