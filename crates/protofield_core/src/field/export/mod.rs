//! Recursive projection of stored values into plain and JSON-safe shapes.
//!
//! The walk recurses once per nested message level, so its depth is the nesting depth of
//! the data, which the schema's message graph and the caller's inputs bound. It does not
//! guard against adversarially deep inputs.

use base64::Engine;
use serde_json::{Map, Number, Value as JsonValue};

use crate::field::message::Slot;
use crate::field::{MapKey, Message, Value};

mod plain;

pub use plain::{PlainEnum, PlainField, PlainStruct, PlainValue};

/// Export shape selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
	/// Full-fidelity [`PlainValue`] tree.
	Plain,
	/// `serde_json::Value` restricted to JSON primitives.
	JsonSafe,
}

/// Export behavior switches.
#[derive(Debug, Clone)]
pub struct ExportOptions {
	/// Emit unset singular scalar and enum fields with their default value.
	pub emit_defaults: bool,
	/// Render 64-bit integers as decimal text in JSON-safe output.
	pub int64_as_string: bool,
}

impl Default for ExportOptions {
	fn default() -> Self {
		Self {
			emit_defaults: true,
			int64_as_string: false,
		}
	}
}

impl ExportOptions {
	/// Preset following the proto3 JSON mapping: defaults omitted, 64-bit integers as text.
	pub fn proto3_json() -> Self {
		Self {
			emit_defaults: false,
			int64_as_string: true,
		}
	}
}

/// Projection output.
#[derive(Debug, Clone, PartialEq)]
pub enum Exported {
	/// Plain projection.
	Plain(PlainValue),
	/// JSON-safe projection.
	Json(JsonValue),
}

impl Exported {
	/// Borrow a plain projection.
	pub fn as_plain(&self) -> Option<&PlainValue> {
		match self {
			Self::Plain(value) => Some(value),
			Self::Json(_) => None,
		}
	}

	/// Borrow a JSON-safe projection.
	pub fn as_json(&self) -> Option<&JsonValue> {
		match self {
			Self::Json(value) => Some(value),
			Self::Plain(_) => None,
		}
	}
}

/// Project one stored value into the plain shape.
pub fn plain_value(value: &Value<'_>, options: &ExportOptions) -> PlainValue {
	match value {
		Value::Bool(v) => PlainValue::Bool(*v),
		Value::I32(v) => PlainValue::I64(i64::from(*v)),
		Value::I64(v) => PlainValue::I64(*v),
		Value::U32(v) => PlainValue::U64(u64::from(*v)),
		Value::U64(v) => PlainValue::U64(*v),
		Value::F32(v) => PlainValue::F32(*v),
		Value::F64(v) => PlainValue::F64(*v),
		Value::String(v) => PlainValue::String(v.clone()),
		Value::Bytes(v) => PlainValue::Bytes(v.clone()),
		Value::Enum(v) => PlainValue::Enum(PlainEnum {
			code: v.code(),
			name: v.name().map(Box::from),
		}),
		Value::Message(message) => plain_message(message, options),
	}
}

/// Project one stored value into the JSON-safe shape.
pub fn json_value(value: &Value<'_>, options: &ExportOptions) -> JsonValue {
	match value {
		Value::Bool(v) => JsonValue::Bool(*v),
		Value::I32(v) => JsonValue::from(*v),
		Value::U32(v) => JsonValue::from(*v),
		Value::I64(v) if options.int64_as_string => JsonValue::String(v.to_string()),
		Value::I64(v) => JsonValue::from(*v),
		Value::U64(v) if options.int64_as_string => JsonValue::String(v.to_string()),
		Value::U64(v) => JsonValue::from(*v),
		Value::F32(v) => json_float(v.to_string().parse().unwrap_or(f64::from(*v))),
		Value::F64(v) => json_float(*v),
		Value::String(v) => JsonValue::String(v.to_string()),
		Value::Bytes(v) => JsonValue::String(base64::engine::general_purpose::STANDARD.encode(v)),
		Value::Enum(v) => match v.name() {
			Some(name) => JsonValue::String(name.to_owned()),
			None => JsonValue::from(v.code()),
		},
		Value::Message(message) => json_message(message, options),
	}
}

/// Project a map key into the plain shape. Enum keys become their name, or code when unnamed.
pub fn plain_key(key: &MapKey<'_>) -> PlainValue {
	match key {
		MapKey::Bool(v) => PlainValue::Bool(*v),
		MapKey::I32(v) => PlainValue::I64(i64::from(*v)),
		MapKey::I64(v) => PlainValue::I64(*v),
		MapKey::U32(v) => PlainValue::U64(u64::from(*v)),
		MapKey::U64(v) => PlainValue::U64(*v),
		MapKey::String(v) => PlainValue::String(v.clone()),
		MapKey::Enum(v) => match v.name() {
			Some(name) => PlainValue::String(name.into()),
			None => PlainValue::I64(i64::from(v.code())),
		},
	}
}

/// Project a map key into JSON object-key text.
pub fn json_key(key: &MapKey<'_>) -> String {
	match key {
		MapKey::Bool(v) => v.to_string(),
		MapKey::I32(v) => v.to_string(),
		MapKey::I64(v) => v.to_string(),
		MapKey::U32(v) => v.to_string(),
		MapKey::U64(v) => v.to_string(),
		MapKey::String(v) => v.to_string(),
		MapKey::Enum(v) => v.to_string(),
	}
}

/// Project a message into a [`PlainValue::Struct`].
pub fn plain_message(message: &Message<'_>, options: &ExportOptions) -> PlainValue {
	let mut fields = Vec::with_capacity(message.descriptor().fields.len());
	for (field, slot) in message.slots() {
		let value = match slot {
			Slot::Singular { value: Some(value), .. } => plain_value(value, options),
			Slot::Singular { desc, value: None } => match desc.default_value() {
				Some(default) if options.emit_defaults => plain_value(&default, options),
				_ => continue,
			},
			Slot::Repeated(items) => items.plain_with(options),
			Slot::Map(entries) => entries.plain_with(options),
		};
		fields.push(PlainField {
			name: field.name.clone(),
			value,
		});
	}

	PlainValue::Struct(PlainStruct {
		type_name: message.type_name().into(),
		fields,
	})
}

/// Project a message into a JSON object keyed by field name.
pub fn json_message(message: &Message<'_>, options: &ExportOptions) -> JsonValue {
	let mut out = Map::new();
	for (field, slot) in message.slots() {
		let value = match slot {
			Slot::Singular { value: Some(value), .. } => json_value(value, options),
			Slot::Singular { desc, value: None } => match desc.default_value() {
				Some(default) if options.emit_defaults => json_value(&default, options),
				_ => continue,
			},
			Slot::Repeated(items) => items.json_with(options),
			Slot::Map(entries) => entries.json_with(options),
		};
		out.insert(field.name.to_string(), value);
	}
	JsonValue::Object(out)
}

fn json_float(v: f64) -> JsonValue {
	match Number::from_f64(v) {
		Some(number) => JsonValue::Number(number),
		None if v.is_nan() => JsonValue::String("NaN".to_owned()),
		None if v > 0.0 => JsonValue::String("Infinity".to_owned()),
		None => JsonValue::String("-Infinity".to_owned()),
	}
}
