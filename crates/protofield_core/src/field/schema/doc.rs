use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{EnumDescriptor, EnumId, FieldDescriptor, FieldShape, FieldType, MAX_FIELD_NUMBER, MessageDescriptor, MessageId, NamedType, ScalarType, Schema, resolve_type_name};
use crate::field::{FieldError, Result};

/// Serializable schema document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDef {
	/// Enum declarations.
	#[serde(default)]
	pub enums: Vec<EnumDef>,
	/// Message declarations.
	#[serde(default)]
	pub messages: Vec<MessageDef>,
}

/// Enum declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
	/// Enum type name.
	pub name: String,
	/// Declared values in order.
	#[serde(default)]
	pub values: Vec<EnumValueDef>,
}

/// One enum value declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValueDef {
	/// Symbolic name.
	pub name: String,
	/// Integer code.
	pub number: i32,
}

/// Message declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDef {
	/// Message type name.
	pub name: String,
	/// Declared fields in order.
	#[serde(default)]
	pub fields: Vec<FieldDef>,
}

/// Field declaration. `map` takes precedence over `type`/`repeated`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
	/// Field name.
	pub name: String,
	/// Field number.
	pub number: u32,
	/// Element type name for singular and repeated fields.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub type_name: Option<String>,
	/// Whether the field holds a sequence.
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub repeated: bool,
	/// Key and value types for map fields.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub map: Option<MapDef>,
}

/// Map field key and value type names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDef {
	/// Key type name.
	pub key: String,
	/// Value type name.
	pub value: String,
}

impl FieldDef {
	/// Singular field of the named type.
	pub fn singular(name: &str, number: u32, type_name: &str) -> Self {
		Self {
			name: name.to_owned(),
			number,
			type_name: Some(type_name.to_owned()),
			repeated: false,
			map: None,
		}
	}

	/// Repeated field of the named element type.
	pub fn repeated(name: &str, number: u32, type_name: &str) -> Self {
		Self {
			repeated: true,
			..Self::singular(name, number, type_name)
		}
	}

	/// Map field with named key and value types.
	pub fn map(name: &str, number: u32, key: &str, value: &str) -> Self {
		Self {
			name: name.to_owned(),
			number,
			type_name: None,
			repeated: false,
			map: Some(MapDef {
				key: key.to_owned(),
				value: value.to_owned(),
			}),
		}
	}
}

/// Incremental schema assembly.
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
	def: SchemaDef,
}

impl SchemaBuilder {
	/// Create an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Declare an enum type.
	pub fn enum_type<'a>(&mut self, name: &str, values: impl IntoIterator<Item = (&'a str, i32)>) -> &mut Self {
		self.def.enums.push(EnumDef {
			name: name.to_owned(),
			values: values
				.into_iter()
				.map(|(value, number)| EnumValueDef {
					name: value.to_owned(),
					number,
				})
				.collect(),
		});
		self
	}

	/// Declare a message type.
	pub fn message(&mut self, name: &str, fields: impl IntoIterator<Item = FieldDef>) -> &mut Self {
		self.def.messages.push(MessageDef {
			name: name.to_owned(),
			fields: fields.into_iter().collect(),
		});
		self
	}

	/// Validate declarations and build the schema.
	pub fn build(&self) -> Result<Schema> {
		self.def.clone().build()
	}
}

impl SchemaDef {
	/// Validate declarations and build the schema.
	pub fn build(self) -> Result<Schema> {
		let mut types_by_name = HashMap::new();
		for (idx, item) in self.enums.iter().enumerate() {
			register(&mut types_by_name, &item.name, NamedType::Enum(EnumId(idx as u32)))?;
		}
		for (idx, item) in self.messages.iter().enumerate() {
			register(&mut types_by_name, &item.name, NamedType::Message(MessageId(idx as u32)))?;
		}

		let mut enums = Vec::with_capacity(self.enums.len());
		for (idx, item) in self.enums.into_iter().enumerate() {
			enums.push(build_enum(EnumId(idx as u32), item)?);
		}

		let mut messages = Vec::with_capacity(self.messages.len());
		for (idx, item) in self.messages.into_iter().enumerate() {
			messages.push(build_message(MessageId(idx as u32), item, &types_by_name)?);
		}

		Ok(Schema {
			enums,
			messages,
			types_by_name,
		})
	}
}

fn register(types: &mut HashMap<Box<str>, NamedType>, name: &str, named: NamedType) -> Result<()> {
	if ScalarType::from_keyword(name).is_some() || types.contains_key(name) {
		return Err(FieldError::DuplicateType { name: name.to_owned() });
	}
	types.insert(name.into(), named);
	Ok(())
}

fn build_enum(id: EnumId, def: EnumDef) -> Result<EnumDescriptor> {
	let mut values = Vec::with_capacity(def.values.len());
	let mut code_by_name: HashMap<Box<str>, i32> = HashMap::with_capacity(def.values.len());
	let mut name_by_code = HashMap::with_capacity(def.values.len());

	for (idx, value) in def.values.into_iter().enumerate() {
		if code_by_name.contains_key(value.name.as_str()) {
			return Err(FieldError::DuplicateEnumValue {
				enum_name: def.name,
				value: value.name,
			});
		}
		code_by_name.insert(value.name.clone().into_boxed_str(), value.number);
		name_by_code.entry(value.number).or_insert(idx);
		values.push((value.name.into_boxed_str(), value.number));
	}

	Ok(EnumDescriptor {
		id,
		name: def.name.into_boxed_str(),
		values,
		code_by_name,
		name_by_code,
	})
}

fn build_message(id: MessageId, def: MessageDef, types: &HashMap<Box<str>, NamedType>) -> Result<MessageDescriptor> {
	let mut fields = Vec::with_capacity(def.fields.len());
	let mut field_by_name: HashMap<Box<str>, usize> = HashMap::with_capacity(def.fields.len());
	let mut numbers = HashSet::with_capacity(def.fields.len());

	for (idx, field) in def.fields.into_iter().enumerate() {
		if field.number == 0 || field.number > MAX_FIELD_NUMBER {
			return Err(FieldError::InvalidFieldNumber {
				message: def.name,
				field: field.name,
				number: field.number,
			});
		}
		if !numbers.insert(field.number) {
			return Err(FieldError::DuplicateFieldNumber {
				message: def.name,
				number: field.number,
			});
		}
		if field_by_name.contains_key(field.name.as_str()) {
			return Err(FieldError::DuplicateField {
				message: def.name,
				field: field.name,
			});
		}

		let shape = resolve_shape(&def.name, &field, types)?;
		field_by_name.insert(field.name.clone().into_boxed_str(), idx);
		fields.push(FieldDescriptor {
			name: field.name.into_boxed_str(),
			number: field.number,
			shape,
		});
	}

	Ok(MessageDescriptor {
		id,
		name: def.name.into_boxed_str(),
		fields,
		field_by_name,
	})
}

fn resolve_shape(message: &str, field: &FieldDef, types: &HashMap<Box<str>, NamedType>) -> Result<FieldShape> {
	let resolve = |type_name: &str| {
		resolve_type_name(types, type_name).ok_or_else(|| FieldError::UnknownType {
			message: message.to_owned(),
			field: field.name.clone(),
			type_name: type_name.to_owned(),
		})
	};

	if let Some(map) = &field.map {
		let key = resolve(&map.key)?;
		let key_ok = match key {
			FieldType::Scalar(scalar) => scalar.is_map_key(),
			FieldType::Enum(_) => true,
			FieldType::Message(_) => false,
		};
		if !key_ok {
			return Err(FieldError::InvalidMapKey {
				message: message.to_owned(),
				field: field.name.clone(),
				type_name: map.key.clone(),
			});
		}
		let value = resolve(&map.value)?;
		return Ok(FieldShape::Map { key, value });
	}

	let type_name = field.type_name.as_deref().ok_or_else(|| FieldError::MissingType {
		message: message.to_owned(),
		field: field.name.clone(),
	})?;
	let ty = resolve(type_name)?;
	if field.repeated {
		Ok(FieldShape::Repeated(ty))
	} else {
		Ok(FieldShape::Singular(ty))
	}
}
