use std::collections::HashMap;

use crate::field::{ElementDescriptor, FieldError, Input, Message, Result};

mod doc;

pub use doc::{EnumDef, EnumValueDef, FieldDef, MapDef, MessageDef, SchemaBuilder, SchemaDef};

/// Highest field number protobuf allows.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Index of a message type inside its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub(crate) u32);

/// Index of an enum type inside its [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumId(pub(crate) u32);

/// Protobuf scalar field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
	/// 64-bit float.
	Double,
	/// 32-bit float.
	Float,
	/// Signed 32-bit varint.
	Int32,
	/// Signed 64-bit varint.
	Int64,
	/// Unsigned 32-bit varint.
	Uint32,
	/// Unsigned 64-bit varint.
	Uint64,
	/// Zigzag-encoded signed 32-bit.
	Sint32,
	/// Zigzag-encoded signed 64-bit.
	Sint64,
	/// Fixed-width unsigned 32-bit.
	Fixed32,
	/// Fixed-width unsigned 64-bit.
	Fixed64,
	/// Fixed-width signed 32-bit.
	Sfixed32,
	/// Fixed-width signed 64-bit.
	Sfixed64,
	/// Boolean.
	Bool,
	/// UTF-8 text.
	String,
	/// Arbitrary bytes.
	Bytes,
}

/// In-memory storage class shared by several scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
	/// `i32` storage.
	I32,
	/// `i64` storage.
	I64,
	/// `u32` storage.
	U32,
	/// `u64` storage.
	U64,
	/// `f32` storage.
	F32,
	/// `f64` storage.
	F64,
	/// `bool` storage.
	Bool,
	/// Text storage.
	String,
	/// Byte storage.
	Bytes,
}

impl ScalarType {
	/// Every scalar type in declaration order.
	pub const ALL: [Self; 15] = [
		Self::Double,
		Self::Float,
		Self::Int32,
		Self::Int64,
		Self::Uint32,
		Self::Uint64,
		Self::Sint32,
		Self::Sint64,
		Self::Fixed32,
		Self::Fixed64,
		Self::Sfixed32,
		Self::Sfixed64,
		Self::Bool,
		Self::String,
		Self::Bytes,
	];

	/// Parse a `.proto` scalar keyword.
	pub fn from_keyword(keyword: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|item| item.as_str() == keyword)
	}

	/// Stable `.proto` keyword.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Double => "double",
			Self::Float => "float",
			Self::Int32 => "int32",
			Self::Int64 => "int64",
			Self::Uint32 => "uint32",
			Self::Uint64 => "uint64",
			Self::Sint32 => "sint32",
			Self::Sint64 => "sint64",
			Self::Fixed32 => "fixed32",
			Self::Fixed64 => "fixed64",
			Self::Sfixed32 => "sfixed32",
			Self::Sfixed64 => "sfixed64",
			Self::Bool => "bool",
			Self::String => "string",
			Self::Bytes => "bytes",
		}
	}

	/// Storage class for canonical values of this type.
	pub fn storage(self) -> Storage {
		match self {
			Self::Int32 | Self::Sint32 | Self::Sfixed32 => Storage::I32,
			Self::Int64 | Self::Sint64 | Self::Sfixed64 => Storage::I64,
			Self::Uint32 | Self::Fixed32 => Storage::U32,
			Self::Uint64 | Self::Fixed64 => Storage::U64,
			Self::Float => Storage::F32,
			Self::Double => Storage::F64,
			Self::Bool => Storage::Bool,
			Self::String => Storage::String,
			Self::Bytes => Storage::Bytes,
		}
	}

	/// Whether map fields may use this type as key.
	pub fn is_map_key(self) -> bool {
		!matches!(self.storage(), Storage::F32 | Storage::F64 | Storage::Bytes)
	}
}

/// Element type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
	/// Scalar element.
	Scalar(ScalarType),
	/// Enum element.
	Enum(EnumId),
	/// Nested message element.
	Message(MessageId),
}

/// Cardinality and element typing of one message field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
	/// At most one value.
	Singular(FieldType),
	/// Ordered sequence of values.
	Repeated(FieldType),
	/// Key to value mapping.
	Map {
		/// Key element type.
		key: FieldType,
		/// Value element type.
		value: FieldType,
	},
}

/// One declared message field.
#[derive(Debug)]
pub struct FieldDescriptor {
	/// Field name.
	pub name: Box<str>,
	/// Field number.
	pub number: u32,
	/// Cardinality and element typing.
	pub shape: FieldShape,
}

/// One declared message type.
#[derive(Debug)]
pub struct MessageDescriptor {
	/// Index of this message inside its schema.
	pub id: MessageId,
	/// Message type name.
	pub name: Box<str>,
	/// Fields in declaration order.
	pub fields: Vec<FieldDescriptor>,
	field_by_name: HashMap<Box<str>, usize>,
}

impl MessageDescriptor {
	/// Look up a field slot index by name.
	pub fn field_index(&self, name: &str) -> Option<usize> {
		self.field_by_name.get(name).copied()
	}

	/// Look up a field by name.
	pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
		self.field_index(name).map(|idx| &self.fields[idx])
	}
}

/// One declared enum type with its bidirectional name/code table.
#[derive(Debug)]
pub struct EnumDescriptor {
	/// Index of this enum inside its schema.
	pub id: EnumId,
	/// Enum type name.
	pub name: Box<str>,
	/// Values in declaration order.
	pub values: Vec<(Box<str>, i32)>,
	code_by_name: HashMap<Box<str>, i32>,
	name_by_code: HashMap<i32, usize>,
}

impl EnumDescriptor {
	/// Symbolic name for a code. Aliased codes yield the first declared name.
	pub fn name_for_code(&self, code: i32) -> Option<&str> {
		self.name_by_code.get(&code).map(|idx| self.values[*idx].0.as_ref())
	}

	/// Code for a symbolic name.
	pub fn code_for_name(&self, name: &str) -> Option<i32> {
		self.code_by_name.get(name).copied()
	}

	/// Code of the first declared value, or 0 for an empty enum.
	pub fn default_code(&self) -> i32 {
		self.values.first().map_or(0, |(_, code)| *code)
	}
}

#[derive(Debug, Clone, Copy)]
enum NamedType {
	Enum(EnumId),
	Message(MessageId),
}

/// Immutable pool of enum and message descriptors.
///
/// Containers and messages borrow the schema for their whole lifetime; it is never copied.
#[derive(Debug)]
pub struct Schema {
	/// Enum types in declaration order.
	pub enums: Vec<EnumDescriptor>,
	/// Message types in declaration order.
	pub messages: Vec<MessageDescriptor>,
	types_by_name: HashMap<Box<str>, NamedType>,
}

impl Schema {
	/// Parse and validate a JSON schema document.
	pub fn from_json(text: &str) -> Result<Self> {
		let def: SchemaDef = serde_json::from_str(text)?;
		def.build()
	}

	/// Read, parse, and validate a JSON schema document from disk.
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
		let text = std::fs::read_to_string(path)?;
		Self::from_json(&text)
	}

	/// Message descriptor by id.
	pub fn message(&self, id: MessageId) -> &MessageDescriptor {
		&self.messages[id.0 as usize]
	}

	/// Enum descriptor by id.
	pub fn enum_type(&self, id: EnumId) -> &EnumDescriptor {
		&self.enums[id.0 as usize]
	}

	/// Look up a message type by name.
	pub fn message_by_name(&self, name: &str) -> Option<&MessageDescriptor> {
		match self.types_by_name.get(name)? {
			NamedType::Message(id) => Some(self.message(*id)),
			NamedType::Enum(_) => None,
		}
	}

	/// Look up an enum type by name.
	pub fn enum_by_name(&self, name: &str) -> Option<&EnumDescriptor> {
		match self.types_by_name.get(name)? {
			NamedType::Enum(id) => Some(self.enum_type(*id)),
			NamedType::Message(_) => None,
		}
	}

	/// Resolve a type name: scalar keyword first, then declared enums and messages.
	pub fn resolve_type(&self, name: &str) -> Option<FieldType> {
		resolve_type_name(&self.types_by_name, name)
	}

	/// Display name of an element type.
	pub fn type_name(&self, ty: FieldType) -> &str {
		match ty {
			FieldType::Scalar(scalar) => scalar.as_str(),
			FieldType::Enum(id) => &self.enum_type(id).name,
			FieldType::Message(id) => &self.message(id).name,
		}
	}

	/// Element descriptor handle for a field type.
	pub fn element(&self, ty: FieldType) -> ElementDescriptor<'_> {
		ElementDescriptor::new(self, ty)
	}

	/// Construct an empty message of the named type.
	pub fn new_message(&self, name: &str) -> Result<Message<'_>> {
		let desc = self.message_by_name(name).ok_or_else(|| FieldError::MessageNotFound { name: name.to_owned() })?;
		Ok(Message::new(self, desc))
	}

	/// Construct a message of the named type from a field-name mapping.
	pub fn build_message<'s, K>(&'s self, name: &str, entries: impl IntoIterator<Item = (K, Input<'s>)>) -> Result<Message<'s>>
	where
		K: AsRef<str>,
	{
		let desc = self.message_by_name(name).ok_or_else(|| FieldError::MessageNotFound { name: name.to_owned() })?;
		Message::from_fields(self, desc, entries)
	}
}

fn resolve_type_name(types: &HashMap<Box<str>, NamedType>, name: &str) -> Option<FieldType> {
	if let Some(scalar) = ScalarType::from_keyword(name) {
		return Some(FieldType::Scalar(scalar));
	}
	types.get(name).map(|named| match named {
		NamedType::Enum(id) => FieldType::Enum(*id),
		NamedType::Message(id) => FieldType::Message(*id),
	})
}

#[cfg(test)]
mod tests;
