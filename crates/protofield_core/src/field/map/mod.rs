use std::collections::HashMap;

use crate::field::export::{self, ExportMode, ExportOptions, Exported, PlainValue};
use crate::field::{ElementDescriptor, FieldError, Input, MapKey, Message, Result, Value};

/// Insertion-ordered container backing a map field.
///
/// Keys and values are normalized independently, key first. An entry is committed only after
/// both succeed.
#[derive(Debug, Clone, PartialEq)]
pub struct MapField<'s> {
	key_desc: ElementDescriptor<'s>,
	value_desc: ElementDescriptor<'s>,
	entries: Vec<(MapKey<'s>, Value<'s>)>,
	index: HashMap<MapKey<'s>, usize>,
}

impl<'s> MapField<'s> {
	/// Create an empty mapping bound to key and value descriptors.
	pub fn new(key_desc: ElementDescriptor<'s>, value_desc: ElementDescriptor<'s>) -> Self {
		Self {
			key_desc,
			value_desc,
			entries: Vec::new(),
			index: HashMap::new(),
		}
	}

	/// Key descriptor.
	pub fn key_descriptor(&self) -> ElementDescriptor<'s> {
		self.key_desc
	}

	/// Value descriptor.
	pub fn value_descriptor(&self) -> ElementDescriptor<'s> {
		self.value_desc
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the mapping is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterate entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&MapKey<'s>, &Value<'s>)> + '_ {
		self.entries.iter().map(|(key, value)| (key, value))
	}

	/// Iterate keys in insertion order.
	pub fn keys(&self) -> impl Iterator<Item = &MapKey<'s>> + '_ {
		self.entries.iter().map(|(key, _)| key)
	}

	/// Iterate values in insertion order.
	pub fn values(&self) -> impl Iterator<Item = &Value<'s>> + '_ {
		self.entries.iter().map(|(_, value)| value)
	}

	/// Look up the value for a key candidate. The key is normalized first.
	pub fn get(&self, key: impl Into<Input<'s>>) -> Result<Option<&Value<'s>>> {
		let key = self.normalize_key(key.into())?;
		Ok(self.index.get(&key).map(|idx| &self.entries[*idx].1))
	}

	/// Whether a key candidate is present.
	pub fn contains_key(&self, key: impl Into<Input<'s>>) -> Result<bool> {
		let key = self.normalize_key(key.into())?;
		Ok(self.index.contains_key(&key))
	}

	/// Mutable access to a nested message value. Writes into it go through its own setters.
	pub fn message_mut(&mut self, key: impl Into<Input<'s>>) -> Result<Option<&mut Message<'s>>> {
		let key = self.normalize_key(key.into())?;
		let Some(idx) = self.index.get(&key).copied() else {
			return Ok(None);
		};
		match &mut self.entries[idx].1 {
			Value::Message(message) => Ok(Some(&mut **message)),
			_ => Ok(None),
		}
	}

	/// Normalize key then value, and associate them. Either failure leaves the mapping unchanged.
	pub fn set(&mut self, key: impl Into<Input<'s>>, value: impl Into<Input<'s>>) -> Result<()> {
		let (key, value) = self.normalize_entry(key.into(), value.into())?;
		self.commit(key, value);
		Ok(())
	}

	/// Apply [`MapField::set`] for each entry in order.
	///
	/// Not transactional across entries: entries before a failing one stay committed, the
	/// failing entry and everything after it are not applied.
	pub fn merge<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> Result<()>
	where
		K: Into<Input<'s>>,
		V: Into<Input<'s>>,
	{
		for (key, value) in entries {
			self.set(key, value)?;
		}
		Ok(())
	}

	/// Normalize every entry, then replace the contents. Any failure keeps the old contents.
	///
	/// Repeated keys keep their first position and their last value.
	pub fn replace_all<K, V>(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> Result<()>
	where
		K: Into<Input<'s>>,
		V: Into<Input<'s>>,
	{
		let mut staged = Self::new(self.key_desc, self.value_desc);
		for (key, value) in entries {
			let (key, value) = self.normalize_entry(key.into(), value.into())?;
			staged.commit(key, value);
		}
		*self = staged;
		Ok(())
	}

	/// Remove a key, returning its value. Remaining entries keep their order.
	pub fn remove(&mut self, key: impl Into<Input<'s>>) -> Result<Option<Value<'s>>> {
		let key = self.normalize_key(key.into())?;
		let Some(idx) = self.index.remove(&key) else {
			return Ok(None);
		};
		let (_, value) = self.entries.remove(idx);
		for slot in self.index.values_mut() {
			if *slot > idx {
				*slot -= 1;
			}
		}
		Ok(Some(value))
	}

	/// Remove every entry.
	pub fn clear(&mut self) {
		self.entries.clear();
		self.index.clear();
	}

	/// Project into the requested export shape.
	pub fn export(&self, mode: ExportMode, options: &ExportOptions) -> Exported {
		match mode {
			ExportMode::Plain => Exported::Plain(self.plain_with(options)),
			ExportMode::JsonSafe => Exported::Json(self.json_with(options)),
		}
	}

	/// Plain projection.
	pub fn plain_with(&self, options: &ExportOptions) -> PlainValue {
		PlainValue::Map(
			self.entries
				.iter()
				.map(|(key, value)| (export::plain_key(key), export::plain_value(value, options)))
				.collect(),
		)
	}

	/// JSON-safe projection. Keys are forced to text.
	pub fn json_with(&self, options: &ExportOptions) -> serde_json::Value {
		serde_json::Value::Object(
			self.entries
				.iter()
				.map(|(key, value)| (export::json_key(key), export::json_value(value, options)))
				.collect(),
		)
	}

	/// Plain projection with default options.
	pub fn to_plain(&self) -> PlainValue {
		self.plain_with(&ExportOptions::default())
	}

	/// JSON-safe projection with default options.
	pub fn to_json_safe(&self) -> serde_json::Value {
		self.json_with(&ExportOptions::default())
	}

	fn normalize_key(&self, candidate: Input<'s>) -> Result<MapKey<'s>> {
		let value = self.key_desc.normalize(candidate)?;
		MapKey::from_value(value).map_err(|rejected| FieldError::Type {
			value: rejected.describe(),
			expected: format!("map key {}", self.key_desc.expected()),
		})
	}

	fn normalize_entry(&self, key: Input<'s>, value: Input<'s>) -> Result<(MapKey<'s>, Value<'s>)> {
		let key = self.normalize_key(key)?;
		let value = self.value_desc.normalize(value)?;
		Ok((key, value))
	}

	fn commit(&mut self, key: MapKey<'s>, value: Value<'s>) {
		if let Some(idx) = self.index.get(&key).copied() {
			self.entries[idx].1 = value;
			return;
		}
		self.index.insert(key.clone(), self.entries.len());
		self.entries.push((key, value));
	}
}
