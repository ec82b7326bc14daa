use std::fmt;

use crate::field::normalize::normalize;
use crate::field::{EnumDescriptor, EnumValue, FieldType, Input, MessageDescriptor, Result, ScalarType, Schema, Storage, Value};

/// Kind of element a descriptor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
	/// Scalar element.
	Scalar,
	/// Enum element.
	Enum,
	/// Nested message element.
	Message,
}

impl Kind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Scalar => "scalar",
			Self::Enum => "enum",
			Self::Message => "message",
		}
	}
}

/// Element type handle bound to its schema.
///
/// This is what containers hold: a borrowed view into schema metadata, cheap to copy.
#[derive(Clone, Copy)]
pub struct ElementDescriptor<'s> {
	schema: &'s Schema,
	ty: FieldType,
}

impl<'s> ElementDescriptor<'s> {
	pub(crate) fn new(schema: &'s Schema, ty: FieldType) -> Self {
		Self { schema, ty }
	}

	/// Owning schema.
	pub fn schema(&self) -> &'s Schema {
		self.schema
	}

	/// Raw element type.
	pub fn field_type(&self) -> FieldType {
		self.ty
	}

	/// Element kind.
	pub fn kind(&self) -> Kind {
		match self.ty {
			FieldType::Scalar(_) => Kind::Scalar,
			FieldType::Enum(_) => Kind::Enum,
			FieldType::Message(_) => Kind::Message,
		}
	}

	/// Declared element type name (`int32`, `Status`, `Item`, ...).
	pub fn element_type(&self) -> &'s str {
		self.schema.type_name(self.ty)
	}

	/// Scalar type, for scalar descriptors.
	pub fn scalar(&self) -> Option<ScalarType> {
		match self.ty {
			FieldType::Scalar(scalar) => Some(scalar),
			_ => None,
		}
	}

	/// Enum type, for enum descriptors.
	pub fn enum_type(&self) -> Option<&'s EnumDescriptor> {
		match self.ty {
			FieldType::Enum(id) => Some(self.schema.enum_type(id)),
			_ => None,
		}
	}

	/// Message type, for message descriptors.
	pub fn message_type(&self) -> Option<&'s MessageDescriptor> {
		match self.ty {
			FieldType::Message(id) => Some(self.schema.message(id)),
			_ => None,
		}
	}

	/// Symbolic name for an enum code. Always `None` for non-enum descriptors.
	pub fn name_for_code(&self, code: i32) -> Option<&'s str> {
		self.enum_type().and_then(|desc| desc.name_for_code(code))
	}

	/// Enum code for a symbolic name. Always `None` for non-enum descriptors.
	pub fn code_for_name(&self, name: &str) -> Option<i32> {
		self.enum_type().and_then(|desc| desc.code_for_name(name))
	}

	/// Expected-kind label carried by type errors.
	pub fn expected(&self) -> String {
		match self.kind() {
			Kind::Scalar => self.element_type().to_owned(),
			kind => format!("{} {}", kind.as_str(), self.element_type()),
		}
	}

	/// Default value of an unset singular field. Messages have none.
	pub fn default_value(&self) -> Option<Value<'s>> {
		match self.ty {
			FieldType::Scalar(scalar) => Some(match scalar.storage() {
				Storage::I32 => Value::I32(0),
				Storage::I64 => Value::I64(0),
				Storage::U32 => Value::U32(0),
				Storage::U64 => Value::U64(0),
				Storage::F32 => Value::F32(0.0),
				Storage::F64 => Value::F64(0.0),
				Storage::Bool => Value::Bool(false),
				Storage::String => Value::String("".into()),
				Storage::Bytes => Value::Bytes(Vec::new()),
			}),
			FieldType::Enum(id) => {
				let desc = self.schema.enum_type(id);
				Some(Value::Enum(EnumValue::new(desc, desc.default_code())))
			}
			FieldType::Message(_) => None,
		}
	}

	/// Normalize a write-shape candidate into this descriptor's canonical value.
	pub fn normalize(&self, candidate: Input<'s>) -> Result<Value<'s>> {
		normalize(*self, candidate)
	}
}

impl PartialEq for ElementDescriptor<'_> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.schema, other.schema) && self.ty == other.ty
	}
}

impl fmt::Debug for ElementDescriptor<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ElementDescriptor({})", self.expected())
	}
}
