//! E2E: malformed or unknown input degrades locally instead of failing the
//! whole decode.

use pyon::{decode, encode, ClassRegistry, EncodeOptions, Object, PyonError, Value};
use pyon_tests::*;
use tracing_test::traced_test;

#[test]
#[traced_test]
fn unregistered_classes_are_never_constructed() {
    let text = encode(&Value::Object(Object::new(account())), EncodeOptions::default()).unwrap();
    assert_eq!(decode(&text, &ClassRegistry::new()).unwrap(), Value::Null);
    assert!(logs_contain("Class is not registered"));
}

#[test]
#[traced_test]
fn unregistered_nested_class_only_nulls_its_own_slot() {
    let mut registry = ClassRegistry::new();
    registry.register::<Account>().register_enum(status_enum());
    let text = encode(&Value::Object(Object::new(account())), EncodeOptions::default()).unwrap();

    let decoded = decode(&text, &registry).unwrap();
    let account = decoded.as_object().unwrap().downcast_ref::<Account>().unwrap();
    assert_eq!(account.owner, "ada");
    assert_eq!(account.status, Some(status("Active")));
    assert_eq!(account.branch, None);
    assert!(logs_contain("Class is not registered"));
}

#[test]
#[traced_test]
fn unregistered_enum_is_null() {
    let text = encode(&Value::Enum(status("Closed")), EncodeOptions::default()).unwrap();
    assert_eq!(decode(&text, &ClassRegistry::new()).unwrap(), Value::Null);
    assert!(logs_contain("Enum class is not registered"));
}

#[test]
#[traced_test]
fn one_bad_element_does_not_spoil_its_siblings() {
    let text = r#"[
        {"type":"bit-vector","payload":"10x"},
        {"type":"unique-id","payload":"6f1e2b3c-4d5e-4f60-8a1b-2c3d4e5f6071"},
        {"type":"numeric-array","payload":[1,2,3],"aux1":[2,2]}
    ]"#;
    let Value::List(items) = decode(text, &registry()).unwrap() else {
        panic!("expected a list");
    };
    assert_eq!(items[0], Value::Null);
    assert_eq!(items[1], Value::Uuid(uuid()));
    assert_eq!(items[2], Value::Null);
    assert!(logs_contain("Invalid bit vector payload"));
    assert!(logs_contain("Invalid numeric array"));
}

#[test]
#[traced_test]
fn unknown_enum_value_is_null() {
    let text = r#"{"type":"enum","class":"bank.Status","payload":99}"#;
    assert_eq!(decode(text, &registry()).unwrap(), Value::Null);
    assert!(logs_contain("No enum member has this value"));
}

#[test]
#[traced_test]
fn unknown_attributes_are_skipped() {
    let text = r#"{"type":"record","class":"bank.Branch","payload":{"code":"X","lat":1.5,"floor":3}}"#;
    let decoded = decode(text, &registry()).unwrap();
    let branch = decoded.as_object().unwrap().downcast_ref::<Branch>().unwrap();
    assert_eq!(branch.code, "X");
    assert_eq!(branch.lat, 1.5);
    assert_eq!(branch.lon, 0.0);
    assert!(logs_contain("Attribute rejected"));
}

#[test]
#[traced_test]
fn record_tagged_as_object_is_null() {
    let text = r#"{"type":"object","class":"bank.Branch","payload":{"code":"X","lat":1.5,"lon":2.0}}"#;
    assert_eq!(decode(text, &registry()).unwrap(), Value::Null);
    assert!(logs_contain("Envelope kind disagrees with the registered class"));
}

#[test]
#[traced_test]
fn oversized_array_shape_is_null() {
    let text = r#"{"matrix":{"type":"numeric-array","payload":[],"aux1":[4294967296,4294967296,2]}}"#;
    assert_eq!(decode(text, &registry()).unwrap(), Value::map([("matrix", Value::Null)]));
    assert!(logs_contain("Invalid numeric array"));
}

#[test]
#[traced_test]
fn bogus_index_kind_nulls_the_dataset() {
    let text = r#"{"type":"tabular-dataset","payload":[{"a":1}],"aux1":["a"],"aux2":[0],"aux3":[null],"aux4":"BogusIndex"}"#;
    assert_eq!(decode(text, &registry()).unwrap(), Value::Null);
    assert!(logs_contain("Invalid tabular dataset"));
}

#[test]
fn objects_without_type_tag_are_plain_maps() {
    let decoded = decode(r#"{"a":1,"b":[true]}"#, &registry()).unwrap();
    assert_eq!(
        decoded,
        Value::map([("a", Value::Int(1)), ("b", Value::List(vec![Value::Bool(true)]))])
    );
}

#[test]
fn invalid_text_is_an_error() {
    let err = decode("not json at all", &registry()).unwrap_err();
    assert!(matches!(err, PyonError::Decode(_)));
}

#[test]
fn non_finite_floats_fail_to_encode() {
    let value = Value::map([("x", Value::Float(f64::INFINITY))]);
    let err = encode(&value, EncodeOptions::default()).unwrap_err();
    assert!(matches!(err, PyonError::Encode(_)));
}
