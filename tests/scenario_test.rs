//! End-to-end scenarios: the canonical bind/serialize behaviors an
//! application relies on, plus result lifecycle checks.

use intake::{contract, ser, Binder, ErrorKind, Schema, SchemaNode};
use serde_json::json;

fn person_schema() -> SchemaNode {
    Schema::object()
        .field("name", Schema::validated(contract::bounded_string(3, 50)))
        .field("age", Schema::validated(contract::ranged_integer(18, 120)))
        .into_node()
}

#[test]
fn scenario_a_short_name_and_small_age() {
    let result = Binder::new().bind(&person_schema(), &json!({"name": "Jo", "age": 15}));

    assert!(!result.is_valid());
    assert_eq!(result.errors().count(), 2);

    let name = result.errors().first().unwrap();
    assert_eq!(name.path.to_string(), "name");
    assert_eq!(name.kind, ErrorKind::TooShort);

    let age = result.errors().last().unwrap();
    assert_eq!(age.path.to_string(), "age");
    assert_eq!(age.kind, ErrorKind::TooSmall);
}

#[test]
fn scenario_b_nested_zip_error_path() {
    let schema = Schema::object()
        .field("id", Schema::integer())
        .field(
            "address",
            Schema::object()
                .field("zip", Schema::validated(contract::bounded_string(5, 10)))
                .into_node(),
        )
        .into_node();

    let result = Binder::new().bind(&schema, &json!({"id": 1, "address": {"zip": "1234"}}));

    assert_eq!(result.errors().count(), 1);
    let entry = result.errors().first().unwrap();
    assert_eq!(entry.path.to_string(), "address.zip");
    assert_eq!(entry.kind, ErrorKind::TooShort);
}

#[test]
fn scenario_c_omitted_field_takes_default() {
    let schema = Schema::object()
        .field("name", Schema::string())
        .default_field("role", Schema::string(), json!("user"))
        .into_node();

    let result = Binder::new().bind(&schema, &json!({"name": "Alice"}));

    assert!(result.is_valid());
    let value = result.into_value().unwrap();
    assert_eq!(value["role"], json!("user"));
}

#[test]
fn scenario_d_compact_serialization_is_byte_exact() {
    let result = Binder::new().bind(&person_schema(), &json!({"age": 25, "name": "Alice"}));
    assert!(result.is_valid());

    let text = ser::to_string(&person_schema(), result.value().unwrap());
    assert_eq!(text, "{\"name\":\"Alice\",\"age\":25}");
}

#[test]
fn all_valid_fields_bind_structurally_equal() {
    let docs = [
        json!({"name": "Alice", "age": 25}),
        json!({"name": "Bob", "age": 118}),
        json!({"name": "Carolina", "age": 18}),
    ];
    for doc in &docs {
        let result = Binder::new().bind(&person_schema(), doc);
        assert!(result.is_valid());
        assert_eq!(result.value(), Some(doc));
    }
}

#[test]
fn k_defects_yield_exactly_k_entries() {
    // Four independently broken fields, no short-circuiting.
    let schema = Schema::object()
        .field("name", Schema::validated(contract::bounded_string(3, 50)))
        .field("age", Schema::validated(contract::ranged_integer(18, 120)))
        .field("active", Schema::boolean())
        .field("score", Schema::integer())
        .into_node();
    let doc = json!({"name": "x", "age": 500, "active": "yes"});

    let result = Binder::new().bind(&schema, &doc);
    assert_eq!(result.errors().count(), 4);
}

#[test]
fn release_once_and_stable_validity() {
    let result = Binder::new().bind(&person_schema(), &json!({"name": "Jo", "age": 15}));

    // is_valid is stable across repeated queries before release.
    assert!(!result.is_valid());
    assert!(!result.is_valid());
    assert_eq!(result.errors().count(), 2);
    assert_eq!(result.errors().count(), 2);

    // Consuming release; the borrow checker forbids any further use.
    result.release();
}

#[test]
fn invalid_result_unwraps_to_validation_failed() {
    let result = Binder::new().bind(&person_schema(), &json!({}));
    let err = result.into_value().unwrap_err();
    assert_eq!(err.to_string(), "validation failed with 2 error(s)");
}
