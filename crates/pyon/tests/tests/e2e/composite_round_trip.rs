//! E2E: entities, records, enum constants and plain maps through the facade.

use pyon::{decode, encode, EncodeOptions, Object, Pyon, PyonConfig, Value};
use pyon_tests::*;

fn round_trip(value: &Value, options: EncodeOptions) -> Value {
    let text = encode(value, options).unwrap();
    decode(&text, &registry()).unwrap()
}

#[test]
fn record_text_is_exact() {
    let text = encode(&Value::Object(Object::new(branch())), EncodeOptions::default()).unwrap();
    assert_eq!(
        text,
        r#"{"type":"record","class":"bank.Branch","payload":{"code":"LDN-01","lat":51.5,"lon":-0.125}}"#
    );
}

#[test]
fn enum_constant_is_encoded_by_value() {
    let text = encode(&Value::Enum(status("Frozen")), EncodeOptions::default()).unwrap();
    assert_eq!(text, r#"{"type":"enum","class":"bank.Status","payload":2}"#);
    assert_eq!(decode(&text, &registry()).unwrap(), Value::Enum(status("Frozen")));
}

#[test]
fn account_round_trips_with_nested_entities() {
    let value = Value::Object(Object::new(account()));
    let decoded = round_trip(&value, EncodeOptions::default());
    assert_eq!(decoded, value);

    let object = decoded.as_object().unwrap();
    let account = object.downcast_ref::<Account>().unwrap();
    assert_eq!(account.status, Some(status("Active")));
    let branch = account.branch.as_ref().unwrap().downcast_ref::<Branch>().unwrap();
    assert_eq!(branch.code, "LDN-01");
}

#[test]
fn underscore_attributes_are_gated_by_default() {
    let value = Value::Object(Object::new(account_with_secrets()));
    let text = encode(&value, EncodeOptions::default()).unwrap();
    assert!(text.contains(r#""_pin":null"#));
    assert!(text.contains(r#""__salt":null"#));
    assert!(!text.contains("4321"));
    assert!(!text.contains("pepper"));

    let decoded = decode(&text, &registry()).unwrap();
    assert_eq!(decoded, Value::Object(Object::new(account())));
}

#[test]
fn protected_and_private_flags_are_independent() {
    let value = Value::Object(Object::new(account_with_secrets()));

    let protected = round_trip(&value, EncodeOptions::new().with_protected(true));
    let account = protected.as_object().unwrap().downcast_ref::<Account>().unwrap().clone();
    assert_eq!(account._pin, Some(4321));
    assert_eq!(account.__salt, None);

    let private = round_trip(&value, EncodeOptions::new().with_private(true));
    let account = private.as_object().unwrap().downcast_ref::<Account>().unwrap().clone();
    assert_eq!(account._pin, None);
    assert_eq!(account.__salt.as_deref(), Some("pepper"));

    assert_eq!(round_trip(&value, EncodeOptions::all()), value);
}

#[test]
fn map_keys_follow_the_same_visibility_rules() {
    let value = Value::map([("open", Value::Int(1)), ("_half", Value::Int(2)), ("__shut", Value::Int(3))]);
    let text = encode(&value, EncodeOptions::default()).unwrap();
    assert_eq!(
        text,
        r#"{"type":"map","payload":{"open":1,"_half":null,"__shut":null}}"#
    );
    assert_eq!(round_trip(&value, EncodeOptions::all()), value);
}

#[test]
fn map_key_order_is_preserved() {
    let value = Value::map([("zeta", Value::Int(1)), ("alpha", Value::Int(2)), ("mid", Value::Int(3))]);
    let decoded = round_trip(&value, EncodeOptions::default());
    let keys: Vec<&str> = decoded.as_map().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn post_decode_hook_rebuilds_derived_state() {
    let pyon = Pyon::new(PyonConfig::default(), registry());
    let value = Value::Object(Object::new(Ledger::new(vec![5, 7, 30])));
    let text = pyon.encode(&value).unwrap();
    assert!(text.contains(r#""_total":null"#));
    assert_eq!(pyon.decode(&text).unwrap(), value);
}

#[test]
fn kitchen_sink_round_trips() {
    let value = kitchen_sink();
    assert_eq!(round_trip(&value, EncodeOptions::default()), value);
}

#[test]
fn encoding_is_deterministic() {
    let a = encode(&kitchen_sink(), EncodeOptions::default()).unwrap();
    let b = encode(&kitchen_sink(), EncodeOptions::default()).unwrap();
    assert_eq!(a, b);
}
