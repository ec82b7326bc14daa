use crate::field::test_support::{element, shop_schema};
use crate::field::{FieldError, Input, PlainEnum, PlainValue, RepeatedField, Value};

#[test]
fn append_normalizes_and_returns_stored_value() {
	let schema = shop_schema();
	let mut tags = RepeatedField::new(element(&schema, "string"));

	assert_eq!(tags.append("a").expect("text appends"), &Value::String("a".into()));
	assert_eq!(tags.append(7_i64).expect("number renders"), &Value::String("7".into()));
	assert_eq!(tags.len(), 2);
}

#[test]
fn failed_append_leaves_sequence_untouched() {
	let schema = shop_schema();
	let mut counts = RepeatedField::new(element(&schema, "int32"));
	counts.append(1_i64).expect("first append");
	let before = counts.clone();

	let err = counts.append("nope").expect_err("text is not an int32");
	assert!(err.is_type());
	assert_eq!(counts, before);
	assert!(counts.append(Input::Null).is_err(), "null elements are rejected");
	assert_eq!(counts.len(), 1);
}

#[test]
fn set_at_replaces_in_place() {
	let schema = shop_schema();
	let mut counts = RepeatedField::new(element(&schema, "int32"));
	counts.extend([1_i64, 2, 3]).expect("extend");

	counts.set_at(1, "20").expect("text parses");
	assert_eq!(counts.as_slice(), &[Value::I32(1), Value::I32(20), Value::I32(3)]);

	let err = counts.set_at(0, 1.5_f64).expect_err("fraction");
	assert!(err.is_type());
	assert_eq!(counts.get(0), Some(&Value::I32(1)));
}

#[test]
fn out_of_range_index_is_an_index_error_even_for_bad_candidates() {
	let schema = shop_schema();
	let mut counts = RepeatedField::new(element(&schema, "int32"));
	counts.append(1_i64).expect("append");

	let err = counts.set_at(usize::MAX, 5_i64).expect_err("index out of range");
	assert!(matches!(err, FieldError::Index { index: usize::MAX, len: 1 }));

	let err = counts.set_at(1, "not a number").expect_err("index checked before value");
	assert!(err.is_index());

	let err = counts.insert_at(3, 5_i64).expect_err("insert past end");
	assert!(err.is_index());
	assert!(counts.remove(4).expect_err("remove past end").is_index());
}

#[test]
fn insert_and_prepend_shift_later_elements() {
	let schema = shop_schema();
	let mut tags = RepeatedField::new(element(&schema, "string"));
	tags.append("b").expect("append");
	tags.prepend("a").expect("prepend");
	tags.insert_at(2, "d").expect("insert at end");
	tags.insert_at(2, "c").expect("insert before end");

	let texts: Vec<_> = tags.iter().filter_map(Value::as_str).collect();
	assert_eq!(texts, ["a", "b", "c", "d"]);
}

#[test]
fn replace_all_is_atomic() {
	let schema = shop_schema();
	let mut counts = RepeatedField::new(element(&schema, "uint32"));
	counts.extend([1_i64, 2]).expect("seed");
	let before = counts.clone();

	let err = counts.replace_all([Input::Int(5), Input::Int(6), Input::Int(-1)]).expect_err("last element invalid");
	assert!(err.is_type());
	assert_eq!(counts, before);

	counts.replace_all([Input::Int(9)]).expect("valid replacement");
	assert_eq!(counts.as_slice(), &[Value::U32(9)]);
}

#[test]
fn extend_is_atomic() {
	let schema = shop_schema();
	let mut counts = RepeatedField::new(element(&schema, "uint32"));
	counts.append(1_i64).expect("seed");

	counts.extend(["2", "x"]).expect_err("second element invalid");
	assert_eq!(counts.as_slice(), &[Value::U32(1)]);
}

#[test]
fn removal_and_queries_need_no_normalization() {
	let schema = shop_schema();
	let mut tags = RepeatedField::new(element(&schema, "string"));
	tags.extend(["a", "b", "c"]).expect("extend");

	assert_eq!(tags.remove(1).expect("in range"), Value::String("b".into()));
	assert_eq!(tags.pop(), Some(Value::String("c".into())));
	tags.truncate(0);
	assert!(tags.is_empty());
	assert_eq!(tags.pop(), None);
}

#[test]
fn nested_messages_are_editable_through_their_own_setters() {
	let schema = shop_schema();
	let mut items = RepeatedField::new(element(&schema, "Item"));
	items.append(Input::fields([("name", "a".into())])).expect("append item");

	let item = items.message_mut(0).expect("message element");
	item.set("quantity", 4_i64).expect("valid quantity");
	assert!(item.set("quantity", -4_i64).is_err());

	let stored = items.get(0).and_then(Value::as_message).expect("message");
	assert_eq!(stored.get("quantity"), Some(&Value::U32(4)));
}

#[test]
fn empty_sequence_exports_empty_array() {
	let schema = shop_schema();
	let tags = RepeatedField::new(element(&schema, "string"));
	assert_eq!(tags.to_plain(), PlainValue::Array(Vec::new()));
	assert_eq!(tags.to_json_safe(), serde_json::json!([]));
}

#[test]
fn enum_elements_export_pair_or_name() {
	let schema = shop_schema();
	let mut history = RepeatedField::new(element(&schema, "Status"));
	history.extend([Input::symbol("CLOSED"), Input::Int(99)]).expect("extend");

	assert_eq!(
		history.to_plain(),
		PlainValue::Array(vec![
			PlainValue::Enum(PlainEnum {
				code: 2,
				name: Some("CLOSED".into()),
			}),
			PlainValue::Enum(PlainEnum { code: 99, name: None }),
		])
	);
	assert_eq!(history.to_json_safe(), serde_json::json!(["CLOSED", 99]));
}

#[test]
fn bytes_elements_export_base64_in_json() {
	let schema = shop_schema();
	let mut blobs = RepeatedField::new(element(&schema, "bytes"));
	blobs.append(b"hi".to_vec()).expect("append");

	assert_eq!(blobs.to_plain(), PlainValue::Array(vec![PlainValue::Bytes(b"hi".to_vec())]));
	assert_eq!(blobs.to_json_safe(), serde_json::json!(["aGk="]));
}
