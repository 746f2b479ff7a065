use tabsmith_core::{
    DatabaseSpec, FieldReference, FieldSpec, SchemaModel, SingleTableSpec, TableSpec,
};

#[test]
fn serializes_schema_deterministically() {
    let mut customer_id = FieldSpec::named("customer_id", "integer");
    customer_id.reference = Some(FieldReference {
        target_table: "customers".to_string(),
        target_field: "id".to_string(),
    });

    let model = SchemaModel {
        schema_version: "0.1".to_string(),
        single: SingleTableSpec {
            fields: vec![FieldSpec::named("email", "email")],
            total_count: 3,
            valid_count: 2,
            invalid_count: 1,
            additional_rules: String::new(),
        },
        database: DatabaseSpec {
            name: "shop".to_string(),
            use_intelligent_mode: false,
            tables: vec![TableSpec {
                table_name: "orders".to_string(),
                total_count: 5,
                valid_count: 5,
                invalid_count: 0,
                additional_context: String::new(),
                fields: vec![customer_id],
            }],
        },
        description: String::new(),
    };

    let json = model.to_json_string().expect("serialize schema");
    let expected = r#"{
  "schema_version": "0.1",
  "single": {
    "fields": [
      {
        "name": "email",
        "type": "email",
        "rules": "",
        "example": ""
      }
    ],
    "total_count": 3,
    "valid_count": 2,
    "invalid_count": 1,
    "additional_rules": ""
  },
  "database": {
    "name": "shop",
    "use_intelligent_mode": false,
    "tables": [
      {
        "table_name": "orders",
        "total_count": 5,
        "valid_count": 5,
        "invalid_count": 0,
        "additional_context": "",
        "fields": [
          {
            "name": "customer_id",
            "type": "integer",
            "rules": "",
            "example": "",
            "reference": {
              "target_table": "customers",
              "target_field": "id"
            }
          }
        ]
      }
    ]
  },
  "description": ""
}"#;
    assert_eq!(json, expected);

    let decoded = SchemaModel::from_json_str(&json).expect("decode schema");
    assert_eq!(decoded, model);
}

#[test]
fn sparse_documents_fill_defaults() {
    let model = SchemaModel::from_json_str(
        r#"{"schema_version": "0.1", "database": {"tables": [{"table_name": "t", "fields": [{"name": "id"}]}]}}"#,
    )
    .expect("decode sparse schema");

    assert!(model.database.use_intelligent_mode);
    assert_eq!(model.database.tables[0].total_count, 5);
    assert_eq!(model.database.tables[0].fields[0].type_id, "string");
    assert_eq!(model.single.fields.len(), 1);
}

#[test]
fn rejects_unknown_schema_version() {
    let err = SchemaModel::from_json_str(r#"{"schema_version": "9.9"}"#)
        .expect_err("version mismatch");
    assert!(err.to_string().contains("9.9"));
}
