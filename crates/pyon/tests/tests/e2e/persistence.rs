//! E2E: saving canonical text to disk and loading it back.

use std::fs;

use pyon::{from_file, to_file, EncodeOptions, Object, Pyon, PyonConfig, PyonError, Value};
use pyon_tests::*;

#[test]
fn saved_file_holds_the_canonical_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault/accounts.pyon");
    let value = Value::List(vec![
        Value::Object(Object::new(account())),
        Value::Object(Object::new(account_with_secrets())),
    ]);

    let text = to_file(&value, &path, EncodeOptions::default()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), text);
    assert!(!text.contains("pepper"));

    let loaded = from_file(&path, &registry()).unwrap().unwrap();
    let expected = Value::List(vec![
        Value::Object(Object::new(account())),
        Value::Object(Object::new(account())),
    ]);
    assert_eq!(loaded, expected);
}

#[test]
fn loading_runs_the_post_decode_hook() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.pyon");
    let value = Value::Object(Object::new(Ledger::new(vec![1, 2, 3])));
    to_file(&value, &path, EncodeOptions::default()).unwrap();
    assert_eq!(from_file(&path, &registry()).unwrap(), Some(value));
}

#[test]
fn wrong_extension_is_refused_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/data.json");
    let err = to_file(&kitchen_sink(), &path, EncodeOptions::default()).unwrap_err();
    assert!(matches!(err, PyonError::InvalidDestination(_)));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn absent_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(from_file(dir.path().join("missing.pyon"), &registry()).unwrap(), None);
}

#[test]
fn handle_saves_with_its_visibility_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("secrets.pyon");
    let pyon = Pyon::new(PyonConfig::default().with_protected(true).with_private(true), registry());
    let value = Value::Object(Object::new(account_with_secrets()));

    pyon.to_file(&value, &path).unwrap();
    assert_eq!(pyon.from_file(&path).unwrap(), Some(value));
}
