use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, FieldError>;

/// Errors produced while building schemas and writing field containers.
///
/// Container operations only produce [`FieldError::Type`], [`FieldError::Index`], and
/// [`FieldError::UnknownField`]. Every one of them leaves the target container unchanged.
#[derive(Debug, Error)]
pub enum FieldError {
	/// Candidate value could not be normalized against a descriptor.
	#[error("type error: cannot store {value} as {expected}")]
	Type {
		/// Rendered description of the rejected candidate.
		value: String,
		/// Expected kind, for example `int32`, `enum Status`, or `message Item`.
		expected: String,
	},
	/// Positional access outside sequence bounds.
	#[error("index {index} out of range for sequence of length {len}")]
	Index {
		/// Requested position.
		index: usize,
		/// Sequence length at the time of the call.
		len: usize,
	},
	/// Field-name mapping referenced a field the message does not declare.
	#[error("unknown field {field} on message {message}")]
	UnknownField {
		/// Message type name.
		message: String,
		/// Offending field name.
		field: String,
	},
	/// Filesystem read failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Schema or input document was not valid JSON for its expected shape.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Two enum or message types share a name.
	#[error("schema declares type {name} more than once")]
	DuplicateType {
		/// Repeated type name.
		name: String,
	},
	/// Two fields in one message share a name.
	#[error("message {message} declares field {field} more than once")]
	DuplicateField {
		/// Message type name.
		message: String,
		/// Repeated field name.
		field: String,
	},
	/// Two fields in one message share a field number.
	#[error("message {message} uses field number {number} more than once")]
	DuplicateFieldNumber {
		/// Message type name.
		message: String,
		/// Repeated field number.
		number: u32,
	},
	/// Two values in one enum share a name.
	#[error("enum {enum_name} declares value {value} more than once")]
	DuplicateEnumValue {
		/// Enum type name.
		enum_name: String,
		/// Repeated value name.
		value: String,
	},
	/// Field number outside the valid protobuf range.
	#[error("message {message} field {field} has invalid number {number}")]
	InvalidFieldNumber {
		/// Message type name.
		message: String,
		/// Field name.
		field: String,
		/// Offending number.
		number: u32,
	},
	/// Field type name did not resolve to a scalar, enum, or message.
	#[error("message {message} field {field} references unknown type {type_name}")]
	UnknownType {
		/// Message type name.
		message: String,
		/// Field name.
		field: String,
		/// Unresolved type name.
		type_name: String,
	},
	/// Field declaration names neither a type nor a map entry.
	#[error("message {message} field {field} has no type")]
	MissingType {
		/// Message type name.
		message: String,
		/// Field name.
		field: String,
	},
	/// Map key type is not an integral, bool, string, or enum type.
	#[error("message {message} map field {field} cannot use {type_name} as key")]
	InvalidMapKey {
		/// Message type name.
		message: String,
		/// Field name.
		field: String,
		/// Rejected key type name.
		type_name: String,
	},
	/// Requested message type name was not found in the schema.
	#[error("message type not found: {name}")]
	MessageNotFound {
		/// Requested type name.
		name: String,
	},
}

impl FieldError {
	/// Whether this error is a normalization type error.
	pub fn is_type(&self) -> bool {
		matches!(self, Self::Type { .. })
	}

	/// Whether this error is a positional index error.
	pub fn is_index(&self) -> bool {
		matches!(self, Self::Index { .. })
	}
}
