use std::fmt;

use crate::field::export::{self, ExportMode, ExportOptions, Exported, PlainValue};
use crate::field::normalize::type_error;
use crate::field::{ElementDescriptor, FieldDescriptor, FieldError, FieldShape, Input, MapField, MessageDescriptor, RepeatedField, Result, Schema, Value};

/// Storage for one declared field, created with its owning message.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Slot<'s> {
	/// Singular field; `None` when unset.
	Singular {
		/// Element descriptor.
		desc: ElementDescriptor<'s>,
		/// Stored value.
		value: Option<Value<'s>>,
	},
	/// Repeated field container.
	Repeated(RepeatedField<'s>),
	/// Map field container.
	Map(MapField<'s>),
}

/// Message instance owning one slot per declared field.
#[derive(Clone)]
pub struct Message<'s> {
	schema: &'s Schema,
	desc: &'s MessageDescriptor,
	slots: Vec<Slot<'s>>,
}

impl<'s> Message<'s> {
	/// Create a message with every field unset or empty.
	pub fn new(schema: &'s Schema, desc: &'s MessageDescriptor) -> Self {
		let slots = desc
			.fields
			.iter()
			.map(|field| match field.shape {
				FieldShape::Singular(ty) => Slot::Singular {
					desc: schema.element(ty),
					value: None,
				},
				FieldShape::Repeated(ty) => Slot::Repeated(RepeatedField::new(schema.element(ty))),
				FieldShape::Map { key, value } => Slot::Map(MapField::new(schema.element(key), schema.element(value))),
			})
			.collect();

		Self { schema, desc, slots }
	}

	/// Build a message by assigning each field-name entry in order.
	///
	/// The first failing entry aborts construction and its error is returned.
	pub fn from_fields<K>(schema: &'s Schema, desc: &'s MessageDescriptor, entries: impl IntoIterator<Item = (K, Input<'s>)>) -> Result<Self>
	where
		K: AsRef<str>,
	{
		let mut message = Self::new(schema, desc);
		for (name, value) in entries {
			message.set(name.as_ref(), value)?;
		}
		Ok(message)
	}

	/// Owning schema.
	pub fn schema(&self) -> &'s Schema {
		self.schema
	}

	/// Message type descriptor.
	pub fn descriptor(&self) -> &'s MessageDescriptor {
		self.desc
	}

	/// Message type name.
	pub fn type_name(&self) -> &'s str {
		&self.desc.name
	}

	/// Assign a field.
	///
	/// Singular fields normalize the input, with [`Input::Null`] clearing them. Repeated fields
	/// take [`Input::List`]; map fields take [`Input::Map`] or [`Input::Fields`]. Both replace
	/// their contents atomically. On failure the field keeps its previous contents.
	pub fn set(&mut self, name: &str, input: impl Into<Input<'s>>) -> Result<()> {
		let idx = self.field_index(name)?;
		let input = input.into();

		match &mut self.slots[idx] {
			Slot::Singular { desc, value } => {
				*value = match input {
					Input::Null => None,
					other => Some(desc.normalize(other)?),
				};
				Ok(())
			}
			Slot::Repeated(field) => match input {
				Input::Null => {
					field.clear();
					Ok(())
				}
				Input::List(items) => field.replace_all(items),
				other => Err(type_error(&other, format!("list of {}", field.descriptor().expected()))),
			},
			Slot::Map(field) => match input {
				Input::Null => {
					field.clear();
					Ok(())
				}
				Input::Map(entries) => field.replace_all(entries),
				Input::Fields(entries) => field.replace_all(entries.into_iter().map(|(key, value)| (Input::Str(key), value))),
				other => Err(type_error(
					&other,
					format!("map of {} to {}", field.key_descriptor().expected(), field.value_descriptor().expected()),
				)),
			},
		}
	}

	/// Reset a field to unset or empty.
	pub fn clear(&mut self, name: &str) -> Result<()> {
		self.set(name, Input::Null)
	}

	/// Whether a singular field is set or a container field is non-empty.
	pub fn has(&self, name: &str) -> bool {
		match self.slot(name) {
			Some(Slot::Singular { value, .. }) => value.is_some(),
			Some(Slot::Repeated(field)) => !field.is_empty(),
			Some(Slot::Map(field)) => !field.is_empty(),
			None => false,
		}
	}

	/// Value of a set singular field.
	pub fn get(&self, name: &str) -> Option<&Value<'s>> {
		match self.slot(name)? {
			Slot::Singular { value, .. } => value.as_ref(),
			_ => None,
		}
	}

	/// Value of a singular field, falling back to its default when unset.
	pub fn get_or_default(&self, name: &str) -> Option<Value<'s>> {
		match self.slot(name)? {
			Slot::Singular { desc, value } => value.clone().or_else(|| desc.default_value()),
			_ => None,
		}
	}

	/// Mutable access to a set singular message field.
	pub fn message_mut(&mut self, name: &str) -> Option<&mut Message<'s>> {
		let idx = self.desc.field_index(name)?;
		match &mut self.slots[idx] {
			Slot::Singular {
				value: Some(Value::Message(message)),
				..
			} => Some(&mut **message),
			_ => None,
		}
	}

	/// Repeated field container.
	pub fn repeated(&self, name: &str) -> Option<&RepeatedField<'s>> {
		match self.slot(name)? {
			Slot::Repeated(field) => Some(field),
			_ => None,
		}
	}

	/// Mutable repeated field container.
	pub fn repeated_mut(&mut self, name: &str) -> Option<&mut RepeatedField<'s>> {
		let idx = self.desc.field_index(name)?;
		match &mut self.slots[idx] {
			Slot::Repeated(field) => Some(field),
			_ => None,
		}
	}

	/// Map field container.
	pub fn map(&self, name: &str) -> Option<&MapField<'s>> {
		match self.slot(name)? {
			Slot::Map(field) => Some(field),
			_ => None,
		}
	}

	/// Mutable map field container.
	pub fn map_mut(&mut self, name: &str) -> Option<&mut MapField<'s>> {
		let idx = self.desc.field_index(name)?;
		match &mut self.slots[idx] {
			Slot::Map(field) => Some(field),
			_ => None,
		}
	}

	/// Project into the requested export shape.
	pub fn export(&self, mode: ExportMode, options: &ExportOptions) -> Exported {
		match mode {
			ExportMode::Plain => Exported::Plain(export::plain_message(self, options)),
			ExportMode::JsonSafe => Exported::Json(export::json_message(self, options)),
		}
	}

	/// Plain projection with default options.
	pub fn to_plain(&self) -> PlainValue {
		export::plain_message(self, &ExportOptions::default())
	}

	/// JSON-safe projection with default options.
	pub fn to_json_safe(&self) -> serde_json::Value {
		export::json_message(self, &ExportOptions::default())
	}

	pub(crate) fn slots(&self) -> impl Iterator<Item = (&'s FieldDescriptor, &Slot<'s>)> + '_ {
		self.desc.fields.iter().zip(self.slots.iter())
	}

	fn slot(&self, name: &str) -> Option<&Slot<'s>> {
		self.desc.field_index(name).map(|idx| &self.slots[idx])
	}

	fn field_index(&self, name: &str) -> Result<usize> {
		self.desc.field_index(name).ok_or_else(|| FieldError::UnknownField {
			message: self.desc.name.to_string(),
			field: name.to_owned(),
		})
	}
}

impl PartialEq for Message<'_> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.desc, other.desc) && self.slots == other.slots
	}
}

impl fmt::Debug for Message<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut out = f.debug_struct(&self.desc.name);
		for (field, slot) in self.slots() {
			match slot {
				Slot::Singular { value: Some(value), .. } => out.field(&field.name, value),
				Slot::Singular { value: None, .. } => continue,
				Slot::Repeated(items) => out.field(&field.name, &items.as_slice()),
				Slot::Map(entries) => out.field(&field.name, &entries.iter().collect::<Vec<_>>()),
			};
		}
		out.finish()
	}
}

#[cfg(test)]
mod tests;
