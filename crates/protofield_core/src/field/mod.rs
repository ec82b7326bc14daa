mod descriptor;
mod error;
mod export;
mod input;
mod map;
mod message;
mod normalize;
mod repeated;
mod schema;
mod value;

#[cfg(test)]
mod test_support;

/// Element descriptor handle and kind.
pub use descriptor::{ElementDescriptor, Kind};
/// Error and result aliases.
pub use error::{FieldError, Result};
/// Export projection types and entry points.
pub use export::{ExportMode, ExportOptions, Exported, PlainEnum, PlainField, PlainStruct, PlainValue, json_key, json_message, json_value, plain_key, plain_message, plain_value};
/// Write-shape input.
pub use input::Input;
/// Map field container.
pub use map::MapField;
/// Message record.
pub use message::Message;
/// Normalizer entry point.
pub use normalize::normalize;
/// Repeated field container.
pub use repeated::RepeatedField;
/// Schema tables, ids, and document/builder types.
pub use schema::{
	EnumDef, EnumDescriptor, EnumId, EnumValueDef, FieldDef, FieldDescriptor, FieldShape, FieldType, MAX_FIELD_NUMBER, MapDef, MessageDef, MessageDescriptor, MessageId,
	ScalarType, Schema, SchemaBuilder, SchemaDef, Storage,
};
/// Canonical stored value types.
pub use value::{EnumValue, MapKey, Value};
