//! E2E: content identifiers derived from canonical text.

use pyon::{encode, identifier, object_id, EncodeOptions, HashAlgorithm, Object, Value};
use pyon_tests::*;

#[test]
fn identifier_is_digest_of_canonical_text() {
    let value = kitchen_sink();
    let text = encode(&value, EncodeOptions::default()).unwrap();
    for alg in HashAlgorithm::ALL {
        assert_eq!(
            identifier(&value, alg.as_str(), EncodeOptions::default()).unwrap(),
            alg.hex_digest(text.as_bytes())
        );
    }
}

#[test]
fn equal_values_share_an_identifier() {
    let a = Value::Object(Object::new(account()));
    let b = Value::Object(Object::new(account()));
    assert_eq!(
        object_id(&a, EncodeOptions::default()).unwrap(),
        object_id(&b, EncodeOptions::default()).unwrap()
    );
}

#[test]
fn gated_secrets_do_not_change_the_identifier() {
    let plain = Value::Object(Object::new(account()));
    let secret = Value::Object(Object::new(account_with_secrets()));
    let id = |v: &Value, options| identifier(v, "sha256", options).unwrap();

    assert_eq!(id(&plain, EncodeOptions::default()), id(&secret, EncodeOptions::default()));
    assert_ne!(id(&plain, EncodeOptions::all()), id(&secret, EncodeOptions::all()));
}

#[test]
fn different_values_differ() {
    let a = object_id(&Value::Enum(status("Active")), EncodeOptions::default()).unwrap();
    let b = object_id(&Value::Enum(status("Frozen")), EncodeOptions::default()).unwrap();
    assert_ne!(a, b);
}
