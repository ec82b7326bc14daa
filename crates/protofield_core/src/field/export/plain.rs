/// Full-fidelity structural export of stored field values.
#[derive(Debug, Clone, PartialEq)]
pub enum PlainValue {
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar, widened to 64 bits.
	I64(i64),
	/// Unsigned integer scalar, widened to 64 bits.
	U64(u64),
	/// 32-bit float scalar.
	F32(f32),
	/// 64-bit float scalar.
	F64(f64),
	/// Opaque byte payload.
	Bytes(Vec<u8>),
	/// UTF-8 string.
	String(Box<str>),
	/// Enum code with its symbolic name, when declared.
	Enum(PlainEnum),
	/// Repeated field contents.
	Array(Vec<PlainValue>),
	/// Map field contents in insertion order.
	Map(Vec<(PlainValue, PlainValue)>),
	/// Message with field names preserved.
	Struct(PlainStruct),
}

/// Enum code and name pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainEnum {
	/// Integer code.
	pub code: i32,
	/// Declared name for the code.
	pub name: Option<Box<str>>,
}

/// Exported message with field names preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainStruct {
	/// Message type name.
	pub type_name: Box<str>,
	/// Exported fields in declaration order.
	pub fields: Vec<PlainField>,
}

/// Named exported field.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainField {
	/// Field name.
	pub name: Box<str>,
	/// Exported field payload.
	pub value: PlainValue,
}

impl PlainStruct {
	/// Look up an exported field by name.
	pub fn field(&self, name: &str) -> Option<&PlainValue> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}
}

impl PlainValue {
	/// Borrow string payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(v) => Some(&**v),
			_ => None,
		}
	}

	/// Borrow array items.
	pub fn as_array(&self) -> Option<&[PlainValue]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Borrow struct payload.
	pub fn as_struct(&self) -> Option<&PlainStruct> {
		match self {
			Self::Struct(item) => Some(item),
			_ => None,
		}
	}

	/// Look up a map entry by exported key.
	pub fn map_get(&self, key: &PlainValue) -> Option<&PlainValue> {
		match self {
			Self::Map(entries) => entries.iter().find(|(item, _)| item == key).map(|(_, value)| value),
			_ => None,
		}
	}
}
