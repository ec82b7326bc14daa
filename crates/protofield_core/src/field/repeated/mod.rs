use crate::field::export::{self, ExportMode, ExportOptions, Exported, PlainValue};
use crate::field::{ElementDescriptor, FieldError, Input, Message, Result, Value};

/// Ordered container backing a repeated field.
///
/// Every write goes through the element descriptor's normalizer. A rejected write leaves the
/// sequence exactly as it was; there is no mutable access to stored values that skips
/// normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatedField<'s> {
	desc: ElementDescriptor<'s>,
	items: Vec<Value<'s>>,
}

impl<'s> RepeatedField<'s> {
	/// Create an empty sequence bound to an element descriptor.
	pub fn new(desc: ElementDescriptor<'s>) -> Self {
		Self { desc, items: Vec::new() }
	}

	/// Element descriptor.
	pub fn descriptor(&self) -> ElementDescriptor<'s> {
		self.desc
	}

	/// Number of stored elements.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Whether no elements are stored.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Element at `index`.
	pub fn get(&self, index: usize) -> Option<&Value<'s>> {
		self.items.get(index)
	}

	/// Stored elements in order.
	pub fn as_slice(&self) -> &[Value<'s>] {
		&self.items
	}

	/// Iterate stored elements in order.
	pub fn iter(&self) -> std::slice::Iter<'_, Value<'s>> {
		self.items.iter()
	}

	/// Normalize and push a candidate at the end.
	pub fn append(&mut self, candidate: impl Into<Input<'s>>) -> Result<&Value<'s>> {
		let value = self.desc.normalize(candidate.into())?;
		self.items.push(value);
		Ok(&self.items[self.items.len() - 1])
	}

	/// Normalize a candidate and replace the element at `index`.
	///
	/// The index is checked first, so an out-of-range index is always an index error.
	pub fn set_at(&mut self, index: usize, candidate: impl Into<Input<'s>>) -> Result<&Value<'s>> {
		self.check_index(index, self.items.len())?;
		let value = self.desc.normalize(candidate.into())?;
		self.items[index] = value;
		Ok(&self.items[index])
	}

	/// Normalize a candidate and insert it at `index`, shifting later elements.
	///
	/// `index == len()` appends.
	pub fn insert_at(&mut self, index: usize, candidate: impl Into<Input<'s>>) -> Result<&Value<'s>> {
		self.check_index(index, self.items.len() + 1)?;
		let value = self.desc.normalize(candidate.into())?;
		self.items.insert(index, value);
		Ok(&self.items[index])
	}

	/// Normalize a candidate and insert it at the front.
	pub fn prepend(&mut self, candidate: impl Into<Input<'s>>) -> Result<&Value<'s>> {
		self.insert_at(0, candidate)
	}

	/// Normalize every candidate, then append them all. Any failure appends nothing.
	pub fn extend<T: Into<Input<'s>>>(&mut self, candidates: impl IntoIterator<Item = T>) -> Result<()> {
		let staged = self.normalize_all(candidates)?;
		self.items.extend(staged);
		Ok(())
	}

	/// Normalize every candidate, then replace the contents. Any failure keeps the old contents.
	pub fn replace_all<T: Into<Input<'s>>>(&mut self, candidates: impl IntoIterator<Item = T>) -> Result<()> {
		self.items = self.normalize_all(candidates)?;
		Ok(())
	}

	/// Mutable access to a nested message element. Writes into it go through its own setters.
	pub fn message_mut(&mut self, index: usize) -> Option<&mut Message<'s>> {
		match self.items.get_mut(index)? {
			Value::Message(message) => Some(&mut **message),
			_ => None,
		}
	}

	/// Remove and return the element at `index`.
	pub fn remove(&mut self, index: usize) -> Result<Value<'s>> {
		self.check_index(index, self.items.len())?;
		Ok(self.items.remove(index))
	}

	/// Remove and return the last element.
	pub fn pop(&mut self) -> Option<Value<'s>> {
		self.items.pop()
	}

	/// Keep the first `len` elements.
	pub fn truncate(&mut self, len: usize) {
		self.items.truncate(len);
	}

	/// Remove every element.
	pub fn clear(&mut self) {
		self.items.clear();
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
		PlainValue::Array(self.items.iter().map(|item| export::plain_value(item, options)).collect())
	}

	/// JSON-safe projection.
	pub fn json_with(&self, options: &ExportOptions) -> serde_json::Value {
		serde_json::Value::Array(self.items.iter().map(|item| export::json_value(item, options)).collect())
	}

	/// Plain projection with default options.
	pub fn to_plain(&self) -> PlainValue {
		self.plain_with(&ExportOptions::default())
	}

	/// JSON-safe projection with default options.
	pub fn to_json_safe(&self) -> serde_json::Value {
		self.json_with(&ExportOptions::default())
	}

	fn normalize_all<T: Into<Input<'s>>>(&self, candidates: impl IntoIterator<Item = T>) -> Result<Vec<Value<'s>>> {
		candidates.into_iter().map(|candidate| self.desc.normalize(candidate.into())).collect()
	}

	fn check_index(&self, index: usize, bound: usize) -> Result<()> {
		if index >= bound {
			return Err(FieldError::Index { index, len: self.items.len() });
		}
		Ok(())
	}
}

impl<'a, 's> IntoIterator for &'a RepeatedField<'s> {
	type Item = &'a Value<'s>;
	type IntoIter = std::slice::Iter<'a, Value<'s>>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.iter()
	}
}

#[cfg(test)]
mod tests;
