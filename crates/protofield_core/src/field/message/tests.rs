use crate::field::test_support::shop_schema;
use crate::field::{FieldDef, FieldError, Input, PlainValue, SchemaBuilder, Value};

#[test]
fn from_fields_assigns_every_shape() {
	let schema = shop_schema();
	let order = schema
		.build_message(
			"Order",
			[
				("id", Input::Str("42".into())),
				("status", Input::symbol("ACTIVE")),
				("items", Input::list([Input::fields([("name", "a".into())]), Input::fields([("name", "b".into())])])),
				("tags", Input::list(["x", "y"])),
				("attributes", Input::fields([("channel", "web".into())])),
				("stock", Input::map([(Input::Int(1), Input::fields([("name", "spare".into())]))])),
			],
		)
		.expect("order builds");

	assert_eq!(order.get("id"), Some(&Value::I64(42)));
	assert_eq!(order.get("status").and_then(Value::as_enum).and_then(|v| v.name()), Some("ACTIVE"));
	assert_eq!(order.repeated("items").map(|items| items.len()), Some(2));
	assert_eq!(order.repeated("tags").map(|tags| tags.len()), Some(2));
	assert_eq!(order.map("attributes").map(|m| m.len()), Some(1));
	assert!(order.map("stock").is_some_and(|m| m.contains_key(1_i64).unwrap_or(false)));
}

#[test]
fn nested_items_export_as_structs() {
	let schema = shop_schema();
	let order = schema
		.build_message("Order", [("items", Input::list([Input::fields([("name", "a".into())]), Input::fields([("name", "b".into())])]))])
		.expect("order builds");

	let plain = order.to_plain();
	let items = plain.as_struct().and_then(|s| s.field("items")).and_then(PlainValue::as_array).expect("items array");
	let names: Vec<_> = items
		.iter()
		.filter_map(|item| item.as_struct()?.field("name")?.as_str())
		.collect();
	assert_eq!(names, ["a", "b"]);

	let json = order.to_json_safe();
	assert_eq!(json["items"][0]["name"], "a");
	assert_eq!(json["items"][1]["name"], "b");
	assert_eq!(json["items"][1]["quantity"], 0);
}

#[test]
fn single_field_elements_export_as_name_mappings() {
	let mut builder = SchemaBuilder::new();
	builder
		.message("Tag", [FieldDef::singular("name", 1, "string")])
		.message("Holder", [FieldDef::repeated("tags", 1, "Tag")]);
	let schema = builder.build().expect("schema builds");

	let holder = schema
		.build_message("Holder", [("tags", Input::list([Input::fields([("name", "a".into())]), Input::fields([("name", "b".into())])]))])
		.expect("holder builds");

	assert_eq!(holder.to_json_safe(), serde_json::json!({ "tags": [{ "name": "a" }, { "name": "b" }] }));
	let tags = holder.repeated("tags").expect("tags").to_plain();
	let names: Vec<_> = tags
		.as_array()
		.expect("array")
		.iter()
		.map(|tag| {
			let tag = tag.as_struct().expect("struct");
			assert_eq!(tag.fields.len(), 1);
			tag.field("name").and_then(PlainValue::as_str)
		})
		.collect();
	assert_eq!(names, [Some("a"), Some("b")]);
}

#[test]
fn unknown_field_names_are_rejected() {
	let schema = shop_schema();
	let err = schema.build_message("Item", [("colour", Input::Str("red".into()))]).expect_err("no such field");
	assert!(matches!(err, FieldError::UnknownField { ref message, ref field } if message == "Item" && field == "colour"));

	let mut item = schema.new_message("Item").expect("item");
	assert!(matches!(item.set("colour", "red"), Err(FieldError::UnknownField { .. })));
	assert!(!item.has("colour"));
	assert!(item.get("colour").is_none());
}

#[test]
fn failed_set_keeps_previous_value() {
	let schema = shop_schema();
	let mut item = schema.new_message("Item").expect("item");
	item.set("quantity", 3_i64).expect("valid");

	assert!(item.set("quantity", "lots").expect_err("not a number").is_type());
	assert_eq!(item.get("quantity"), Some(&Value::U32(3)));

	let mut order = schema.new_message("Order").expect("order");
	order.set("tags", Input::list(["a"])).expect("tags");
	assert!(order.set("tags", "a").expect_err("scalar for repeated").is_type());
	assert!(order.set("tags", Input::list([Input::Str("b".into()), Input::Null])).is_err());
	assert_eq!(order.repeated("tags").and_then(|tags| tags.get(0)), Some(&Value::String("a".into())));
	assert!(order.set("attributes", Input::list(["a"])).expect_err("list for map").is_type());
}

#[test]
fn null_and_clear_reset_fields() {
	let schema = shop_schema();
	let mut order = schema
		.build_message("Order", [("id", Input::Int(1)), ("tags", Input::list(["a"])), ("attributes", Input::fields([("k", "v".into())]))])
		.expect("order builds");

	order.set("id", Input::Null).expect("null clears");
	order.clear("tags").expect("clear repeated");
	order.clear("attributes").expect("clear map");
	assert!(!order.has("id"));
	assert!(!order.has("tags"));
	assert!(!order.has("attributes"));
	assert!(order.clear("nope").is_err());
}

#[test]
fn defaults_fill_unset_singulars() {
	let schema = shop_schema();
	let order = schema.new_message("Order").expect("order");

	assert_eq!(order.get("id"), None);
	assert_eq!(order.get_or_default("id"), Some(Value::I64(0)));
	assert_eq!(order.get_or_default("status").and_then(|v| v.as_enum()).map(|v| v.code()), Some(0));
	assert_eq!(order.get_or_default("parent"), None);
	assert_eq!(order.get_or_default("tags"), None);
}

#[test]
fn nested_message_fields_are_editable() {
	let schema = shop_schema();
	let mut order = schema.new_message("Order").expect("order");
	assert!(order.message_mut("parent").is_none());

	order.set("parent", Input::fields([("id", Input::Int(7))])).expect("parent builds");
	let parent = order.message_mut("parent").expect("parent set");
	parent.set("status", 2_i64).expect("code");
	assert!(parent.set("status", "MISSING").is_err());

	order.repeated_mut("history").expect("history").append(Input::symbol("CLOSED")).expect("append");
	order.map_mut("attributes").expect("attributes").set("k", "v").expect("set");
	assert!(order.repeated_mut("attributes").is_none());
	assert!(order.map_mut("history").is_none());

	let parent = order.get("parent").and_then(Value::as_message).expect("parent");
	assert_eq!(parent.get("status").and_then(Value::as_enum).and_then(|v| v.name()), Some("CLOSED"));
}

#[test]
fn existing_messages_are_stored_without_rebuilding() {
	let schema = shop_schema();
	let item = schema.build_message("Item", [("name", Input::Str("bolt".into()))]).expect("item");
	let mut order = schema.new_message("Order").expect("order");
	order.set("items", Input::list([item.clone()])).expect("existing item");

	assert_eq!(order.repeated("items").and_then(|items| items.get(0)).and_then(Value::as_message), Some(&item));
	assert!(order.set("parent", item).expect_err("Item is not an Order").is_type());
}

#[test]
fn debug_lists_set_fields() {
	let schema = shop_schema();
	let item = schema.build_message("Item", [("name", Input::Str("bolt".into()))]).expect("item");
	assert_eq!(format!("{item:?}"), "Item { name: String(\"bolt\") }");
}

#[test]
fn fixture_order_loads_from_json() {
	let schema = shop_schema();
	let Input::Fields(entries) = Input::from_json(protofield_testkit::fixture_json("order.json")) else {
		panic!("order fixture should be an object");
	};
	let order = schema.build_message("Order", entries).expect("fixture order builds");

	assert_eq!(order.get("id"), Some(&Value::I64(9_007_199_254_740_993)));
	assert_eq!(order.repeated("history").map(|h| h.len()), Some(2));
	assert_eq!(order.get("signature"), Some(&Value::Bytes(b"hi".to_vec())));

	let Input::Fields(entries) = Input::from_json(protofield_testkit::fixture_json("order_invalid.json")) else {
		panic!("invalid order fixture should be an object");
	};
	assert!(schema.build_message("Order", entries).expect_err("negative quantity").is_type());
}
