use crate::field::test_support::shop_schema;
use crate::field::{FieldDef, FieldError, FieldShape, FieldType, MAX_FIELD_NUMBER, ScalarType, Schema, SchemaBuilder, SchemaDef};

#[test]
fn fixture_schema_matches_builder_schema() {
	let loaded = Schema::from_json(&protofield_testkit::fixture_text("shop_schema.json")).expect("fixture schema builds");
	let built = shop_schema();

	assert_eq!(loaded.enums.len(), built.enums.len());
	assert_eq!(loaded.messages.len(), built.messages.len());
	for (left, right) in loaded.messages.iter().zip(&built.messages) {
		assert_eq!(left.name, right.name);
		let left_fields: Vec<_> = left.fields.iter().map(|f| (&f.name, f.number, f.shape)).collect();
		let right_fields: Vec<_> = right.fields.iter().map(|f| (&f.name, f.number, f.shape)).collect();
		assert_eq!(left_fields, right_fields);
	}
}

#[test]
fn open_reads_schema_from_disk() {
	let schema = Schema::open(protofield_testkit::fixture_path("shop_schema.json")).expect("fixture opens");
	assert!(schema.message_by_name("Order").is_some());
	assert!(Schema::open(protofield_testkit::fixture_path("missing.json")).is_err());
}

#[test]
fn resolves_scalars_enums_and_messages() {
	let schema = shop_schema();
	let status = schema.enum_by_name("Status").expect("Status enum");
	let item = schema.message_by_name("Item").expect("Item message");

	assert_eq!(schema.resolve_type("sfixed64"), Some(FieldType::Scalar(ScalarType::Sfixed64)));
	assert_eq!(schema.resolve_type("Status"), Some(FieldType::Enum(status.id)));
	assert_eq!(schema.resolve_type("Item"), Some(FieldType::Message(item.id)));
	assert_eq!(schema.resolve_type("Missing"), None);
	assert!(schema.message_by_name("Status").is_none());
	assert!(schema.enum_by_name("Item").is_none());
	assert_eq!(schema.type_name(FieldType::Enum(status.id)), "Status");
}

#[test]
fn map_field_shapes_resolve_key_and_value() {
	let schema = shop_schema();
	let order = schema.message_by_name("Order").expect("Order message");
	let item = schema.message_by_name("Item").expect("Item message");

	let stock = order.field("stock").expect("stock field");
	assert_eq!(
		stock.shape,
		FieldShape::Map {
			key: FieldType::Scalar(ScalarType::Int32),
			value: FieldType::Message(item.id),
		}
	);
	assert_eq!(order.field_index("parent"), Some(8));
}

#[test]
fn enum_aliases_keep_first_name() {
	let mut builder = SchemaBuilder::new();
	builder.enum_type("Mode", [("OFF", 0), ("DISABLED", 0), ("ON", 1)]);
	let schema = builder.build().expect("aliases are allowed");
	let mode = schema.enum_by_name("Mode").expect("Mode enum");

	assert_eq!(mode.name_for_code(0), Some("OFF"));
	assert_eq!(mode.code_for_name("DISABLED"), Some(0));
	assert_eq!(mode.default_code(), 0);
	assert_eq!(mode.name_for_code(7), None);
}

#[test]
fn rejects_duplicate_and_reserved_type_names() {
	let mut builder = SchemaBuilder::new();
	builder.enum_type("Kind", [("A", 0)]).message("Kind", []);
	assert!(matches!(builder.build(), Err(FieldError::DuplicateType { name }) if name == "Kind"));

	let mut builder = SchemaBuilder::new();
	builder.message("string", []);
	assert!(matches!(builder.build(), Err(FieldError::DuplicateType { .. })));
}

#[test]
fn rejects_bad_field_declarations() {
	let build = |fields: Vec<FieldDef>| {
		let mut builder = SchemaBuilder::new();
		builder.message("Item", [FieldDef::singular("name", 1, "string")]).message("M", fields);
		builder.build()
	};

	assert!(matches!(build(vec![FieldDef::singular("a", 0, "int32")]), Err(FieldError::InvalidFieldNumber { number: 0, .. })));
	assert!(matches!(
		build(vec![FieldDef::singular("a", MAX_FIELD_NUMBER + 1, "int32")]),
		Err(FieldError::InvalidFieldNumber { .. })
	));
	assert!(matches!(
		build(vec![FieldDef::singular("a", 1, "int32"), FieldDef::singular("b", 1, "int32")]),
		Err(FieldError::DuplicateFieldNumber { number: 1, .. })
	));
	assert!(matches!(
		build(vec![FieldDef::singular("a", 1, "int32"), FieldDef::singular("a", 2, "int32")]),
		Err(FieldError::DuplicateField { .. })
	));
	assert!(matches!(build(vec![FieldDef::singular("a", 1, "Nope")]), Err(FieldError::UnknownType { type_name, .. }) if type_name == "Nope"));
	assert!(matches!(build(vec![FieldDef::map("a", 1, "double", "int32")]), Err(FieldError::InvalidMapKey { .. })));
	assert!(matches!(build(vec![FieldDef::map("a", 1, "Item", "int32")]), Err(FieldError::InvalidMapKey { .. })));
	assert!(matches!(build(vec![FieldDef::map("a", 1, "string", "Nope")]), Err(FieldError::UnknownType { .. })));
	assert!(build(vec![FieldDef::map("a", 1, "bool", "Item")]).is_ok());
}

#[test]
fn field_without_type_is_rejected() {
	let text = r#"{ "messages": [ { "name": "M", "fields": [ { "name": "a", "number": 1 } ] } ] }"#;
	assert!(matches!(Schema::from_json(text), Err(FieldError::MissingType { .. })));
}

#[test]
fn malformed_document_is_a_json_error() {
	assert!(matches!(Schema::from_json("{ \"messages\": 3 }"), Err(FieldError::Json(_))));
}

#[test]
fn schema_document_round_trips_through_serde() {
	let def: SchemaDef = serde_json::from_str(&protofield_testkit::fixture_text("shop_schema.json")).expect("fixture parses");
	let text = serde_json::to_string(&def).expect("serializes");
	let again: SchemaDef = serde_json::from_str(&text).expect("reparses");
	assert_eq!(def, again);
}

#[test]
fn new_message_and_build_message_look_up_by_name() {
	let schema = shop_schema();
	assert!(matches!(schema.new_message("Missing"), Err(FieldError::MessageNotFound { .. })));

	let item = schema.build_message("Item", [("name", "bolt".into()), ("quantity", 3_i64.into())]).expect("item builds");
	assert_eq!(item.type_name(), "Item");
	assert!(item.has("quantity"));
	assert!(!item.has("price"));
}
