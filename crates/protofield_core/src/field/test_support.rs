use crate::field::{ElementDescriptor, FieldDef, ScalarType, Schema, SchemaBuilder};

/// Shop schema mirroring `fixtures/shop_schema.json`.
pub(crate) fn shop_schema() -> Schema {
	let mut builder = SchemaBuilder::new();
	builder
		.enum_type("Status", [("ACTIVE", 0), ("SUSPENDED", 1), ("CLOSED", 2)])
		.message(
			"Item",
			[
				FieldDef::singular("name", 1, "string"),
				FieldDef::singular("quantity", 2, "uint32"),
				FieldDef::singular("price", 3, "double"),
			],
		)
		.message(
			"Order",
			[
				FieldDef::singular("id", 1, "int64"),
				FieldDef::singular("status", 2, "Status"),
				FieldDef::repeated("items", 3, "Item"),
				FieldDef::repeated("tags", 4, "string"),
				FieldDef::map("attributes", 5, "string", "string"),
				FieldDef::map("stock", 6, "int32", "Item"),
				FieldDef::repeated("history", 7, "Status"),
				FieldDef::singular("signature", 8, "bytes"),
				FieldDef::singular("parent", 9, "Order"),
			],
		);
	builder.build().expect("shop schema builds")
}

/// One message with a singular field per scalar type, named by keyword.
pub(crate) fn scalars_schema() -> Schema {
	let fields = ScalarType::ALL
		.iter()
		.enumerate()
		.map(|(idx, scalar)| FieldDef::singular(scalar.as_str(), idx as u32 + 1, scalar.as_str()));
	let mut builder = SchemaBuilder::new();
	builder.message("Scalars", fields);
	builder.build().expect("scalars schema builds")
}

/// Element descriptor for a named type.
pub(crate) fn element<'s>(schema: &'s Schema, type_name: &str) -> ElementDescriptor<'s> {
	schema.element(schema.resolve_type(type_name).expect("type resolves"))
}
