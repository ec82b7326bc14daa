use crate::field::{ElementDescriptor, EnumDescriptor, EnumValue, FieldError, FieldType, Input, Message, MessageDescriptor, Result, ScalarType, Schema, Storage, Value};

/// Normalize a write-shape candidate against an element descriptor.
///
/// Canonical inputs of the exact declared type come back unchanged. Nested message candidates
/// given as field-name mappings are built into fresh instances; if that fails the partial
/// instance is dropped.
pub fn normalize<'s>(desc: ElementDescriptor<'s>, candidate: Input<'s>) -> Result<Value<'s>> {
	let schema = desc.schema();
	match desc.field_type() {
		FieldType::Scalar(scalar) => normalize_scalar(scalar, candidate),
		FieldType::Enum(id) => normalize_enum(schema.enum_type(id), candidate),
		FieldType::Message(id) => normalize_message(schema, schema.message(id), candidate),
	}
}

pub(crate) fn type_error(candidate: &Input<'_>, expected: impl Into<String>) -> FieldError {
	FieldError::Type {
		value: candidate.describe(),
		expected: expected.into(),
	}
}

fn normalize_scalar<'s>(scalar: ScalarType, candidate: Input<'s>) -> Result<Value<'s>> {
	let converted = match scalar.storage() {
		Storage::I32 => integral(&candidate).and_then(|v| i32::try_from(v).ok()).map(Value::I32),
		Storage::I64 => integral(&candidate).and_then(|v| i64::try_from(v).ok()).map(Value::I64),
		Storage::U32 => integral(&candidate).and_then(|v| u32::try_from(v).ok()).map(Value::U32),
		Storage::U64 => integral(&candidate).and_then(|v| u64::try_from(v).ok()).map(Value::U64),
		Storage::F32 => floating(&candidate).and_then(narrow_f32).map(Value::F32),
		Storage::F64 => floating(&candidate).map(Value::F64),
		Storage::Bool => boolean(&candidate).map(Value::Bool),
		Storage::String => return into_text(candidate).map(Value::String).map_err(|rejected| type_error(&rejected, scalar.as_str())),
		Storage::Bytes => return into_bytes(candidate).map(Value::Bytes).map_err(|rejected| type_error(&rejected, scalar.as_str())),
	};
	converted.ok_or_else(|| type_error(&candidate, scalar.as_str()))
}

/// Integer view of a candidate: integral numbers, integral floats, and decimal text.
fn integral(candidate: &Input<'_>) -> Option<i128> {
	match candidate {
		Input::Int(v) => Some(i128::from(*v)),
		Input::UInt(v) => Some(i128::from(*v)),
		Input::Float(v) => integral_float(*v),
		Input::Str(v) => v.trim().parse::<i128>().ok(),
		Input::Value(value) => match value {
			Value::I32(v) => Some(i128::from(*v)),
			Value::I64(v) => Some(i128::from(*v)),
			Value::U32(v) => Some(i128::from(*v)),
			Value::U64(v) => Some(i128::from(*v)),
			Value::F32(v) => integral_float(f64::from(*v)),
			Value::F64(v) => integral_float(*v),
			Value::String(v) => v.trim().parse::<i128>().ok(),
			_ => None,
		},
		_ => None,
	}
}

/// Boolean view of a candidate: booleans, and the exact text `true` or `false`.
fn boolean(candidate: &Input<'_>) -> Option<bool> {
	match candidate {
		Input::Bool(v) | Input::Value(Value::Bool(v)) => Some(*v),
		Input::Str(v) => bool_text(v),
		Input::Value(Value::String(v)) => bool_text(v),
		_ => None,
	}
}

fn bool_text(text: &str) -> Option<bool> {
	match text {
		"true" => Some(true),
		"false" => Some(false),
		_ => None,
	}
}

fn integral_float(v: f64) -> Option<i128> {
	(v.is_finite() && v.fract() == 0.0 && v.abs() < 1e38).then_some(v as i128)
}

/// Float view of a candidate: any number, or numeric text.
fn floating(candidate: &Input<'_>) -> Option<f64> {
	match candidate {
		Input::Int(v) => Some(*v as f64),
		Input::UInt(v) => Some(*v as f64),
		Input::Float(v) => Some(*v),
		Input::Str(v) => v.trim().parse::<f64>().ok(),
		Input::Value(value) => match value {
			Value::I32(v) => Some(f64::from(*v)),
			Value::I64(v) => Some(*v as f64),
			Value::U32(v) => Some(f64::from(*v)),
			Value::U64(v) => Some(*v as f64),
			Value::F32(v) => Some(f64::from(*v)),
			Value::F64(v) => Some(*v),
			Value::String(v) => v.trim().parse::<f64>().ok(),
			_ => None,
		},
		_ => None,
	}
}

fn narrow_f32(v: f64) -> Option<f32> {
	let narrowed = v as f32;
	if v.is_finite() && narrowed.is_infinite() {
		return None;
	}
	Some(narrowed)
}

/// Text view of a candidate. Numbers render to text; bytes must be valid UTF-8.
fn into_text(candidate: Input<'_>) -> std::result::Result<Box<str>, Input<'_>> {
	match candidate {
		Input::Str(v) => Ok(v.into_boxed_str()),
		Input::Value(Value::String(v)) => Ok(v),
		Input::Bytes(v) => String::from_utf8(v).map(String::into_boxed_str).map_err(|err| Input::Bytes(err.into_bytes())),
		Input::Value(Value::Bytes(v)) => String::from_utf8(v)
			.map(String::into_boxed_str)
			.map_err(|err| Input::Value(Value::Bytes(err.into_bytes()))),
		Input::Int(v) => Ok(v.to_string().into_boxed_str()),
		Input::UInt(v) => Ok(v.to_string().into_boxed_str()),
		Input::Float(v) => Ok(v.to_string().into_boxed_str()),
		Input::Value(value @ (Value::I32(_) | Value::I64(_) | Value::U32(_) | Value::U64(_) | Value::F32(_) | Value::F64(_))) => {
			Ok(value.describe().into_boxed_str())
		}
		other => Err(other),
	}
}

/// Byte view of a candidate. Text contributes its UTF-8 encoding.
fn into_bytes(candidate: Input<'_>) -> std::result::Result<Vec<u8>, Input<'_>> {
	match candidate {
		Input::Bytes(v) | Input::Value(Value::Bytes(v)) => Ok(v),
		Input::Str(v) => Ok(v.into_bytes()),
		Input::Value(Value::String(v)) => Ok(v.into_boxed_bytes().into_vec()),
		other => Err(other),
	}
}

fn normalize_enum<'s>(desc: &'s EnumDescriptor, candidate: Input<'s>) -> Result<Value<'s>> {
	let code = match &candidate {
		Input::Str(name) | Input::Symbol(name) => desc.code_for_name(name),
		Input::Int(v) => i32::try_from(*v).ok(),
		Input::UInt(v) => i32::try_from(*v).ok(),
		Input::Value(Value::Enum(v)) => std::ptr::eq(v.enum_type(), desc).then(|| v.code()),
		Input::Value(Value::String(name)) => desc.code_for_name(name),
		Input::Value(value) => value.as_i64().and_then(|v| i32::try_from(v).ok()),
		_ => None,
	};

	match code {
		Some(code) => Ok(Value::Enum(EnumValue::new(desc, code))),
		None => Err(type_error(&candidate, format!("enum {}", desc.name))),
	}
}

fn normalize_message<'s>(schema: &'s Schema, desc: &'s MessageDescriptor, candidate: Input<'s>) -> Result<Value<'s>> {
	match candidate {
		Input::Value(Value::Message(message)) if std::ptr::eq(message.descriptor(), desc) => Ok(Value::Message(message)),
		Input::Fields(entries) => Message::from_fields(schema, desc, entries).map(|message| Value::Message(Box::new(message))),
		other => Err(type_error(&other, format!("message {}", desc.name))),
	}
}
