use std::fmt;
use std::hash::{Hash, Hasher};

use crate::field::{EnumDescriptor, Message};

/// Canonical stored value of one field element.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'s> {
	/// `bool` storage.
	Bool(bool),
	/// `int32`, `sint32`, `sfixed32` storage.
	I32(i32),
	/// `int64`, `sint64`, `sfixed64` storage.
	I64(i64),
	/// `uint32`, `fixed32` storage.
	U32(u32),
	/// `uint64`, `fixed64` storage.
	U64(u64),
	/// `float` storage.
	F32(f32),
	/// `double` storage.
	F64(f64),
	/// `string` storage.
	String(Box<str>),
	/// `bytes` storage.
	Bytes(Vec<u8>),
	/// Enum code bound to its enum type.
	Enum(EnumValue<'s>),
	/// Nested message instance, owned by the container.
	Message(Box<Message<'s>>),
}

impl<'s> Value<'s> {
	/// Short rendering used in error messages.
	pub fn describe(&self) -> String {
		match self {
			Self::Bool(v) => v.to_string(),
			Self::I32(v) => v.to_string(),
			Self::I64(v) => v.to_string(),
			Self::U32(v) => v.to_string(),
			Self::U64(v) => v.to_string(),
			Self::F32(v) => v.to_string(),
			Self::F64(v) => v.to_string(),
			Self::String(v) => format!("{v:?}"),
			Self::Bytes(v) => format!("bytes[{}]", v.len()),
			Self::Enum(v) => v.to_string(),
			Self::Message(v) => format!("message {}", v.type_name()),
		}
	}

	/// Borrow the text of a `string` value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(v) => Some(&**v),
			_ => None,
		}
	}

	/// Widen any signed or unsigned integer value that fits in `i64`.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::I32(v) => Some(i64::from(*v)),
			Self::I64(v) => Some(*v),
			Self::U32(v) => Some(i64::from(*v)),
			Self::U64(v) => i64::try_from(*v).ok(),
			_ => None,
		}
	}

	/// Borrow the enum wrapper.
	pub fn as_enum(&self) -> Option<EnumValue<'s>> {
		match self {
			Self::Enum(v) => Some(*v),
			_ => None,
		}
	}

	/// Borrow a nested message.
	pub fn as_message(&self) -> Option<&Message<'s>> {
		match self {
			Self::Message(v) => Some(&**v),
			_ => None,
		}
	}
}

/// Enum code paired with the enum type that interprets it.
///
/// Codes without a declared name are kept as-is so unknown values round-trip.
#[derive(Clone, Copy)]
pub struct EnumValue<'s> {
	desc: &'s EnumDescriptor,
	code: i32,
}

impl<'s> EnumValue<'s> {
	/// Bind a code to its enum type.
	pub fn new(desc: &'s EnumDescriptor, code: i32) -> Self {
		Self { desc, code }
	}

	/// Integer code.
	pub fn code(&self) -> i32 {
		self.code
	}

	/// Symbolic name when the code is declared.
	pub fn name(&self) -> Option<&'s str> {
		self.desc.name_for_code(self.code)
	}

	/// Enum type descriptor.
	pub fn enum_type(&self) -> &'s EnumDescriptor {
		self.desc
	}
}

impl PartialEq for EnumValue<'_> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.desc, other.desc) && self.code == other.code
	}
}

impl Eq for EnumValue<'_> {}

impl Hash for EnumValue<'_> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.desc.id.hash(state);
		self.code.hash(state);
	}
}

impl fmt::Debug for EnumValue<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}::{self}", self.desc.name)
	}
}

impl fmt::Display for EnumValue<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.name() {
			Some(name) => f.write_str(name),
			None => write!(f, "{}", self.code),
		}
	}
}

/// Canonical map key. Only hashable storage classes are valid keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapKey<'s> {
	/// `bool` key.
	Bool(bool),
	/// 32-bit signed key.
	I32(i32),
	/// 64-bit signed key.
	I64(i64),
	/// 32-bit unsigned key.
	U32(u32),
	/// 64-bit unsigned key.
	U64(u64),
	/// Text key.
	String(Box<str>),
	/// Enum key.
	Enum(EnumValue<'s>),
}

impl<'s> MapKey<'s> {
	/// Convert a canonical value into a key, if its storage class is hashable.
	pub fn from_value(value: Value<'s>) -> Result<Self, Value<'s>> {
		match value {
			Value::Bool(v) => Ok(Self::Bool(v)),
			Value::I32(v) => Ok(Self::I32(v)),
			Value::I64(v) => Ok(Self::I64(v)),
			Value::U32(v) => Ok(Self::U32(v)),
			Value::U64(v) => Ok(Self::U64(v)),
			Value::String(v) => Ok(Self::String(v)),
			Value::Enum(v) => Ok(Self::Enum(v)),
			other => Err(other),
		}
	}

	/// Borrow the text of a string key.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(v) => Some(&**v),
			_ => None,
		}
	}
}

impl<'s> From<MapKey<'s>> for Value<'s> {
	fn from(key: MapKey<'s>) -> Self {
		match key {
			MapKey::Bool(v) => Self::Bool(v),
			MapKey::I32(v) => Self::I32(v),
			MapKey::I64(v) => Self::I64(v),
			MapKey::U32(v) => Self::U32(v),
			MapKey::U64(v) => Self::U64(v),
			MapKey::String(v) => Self::String(v),
			MapKey::Enum(v) => Self::Enum(v),
		}
	}
}
