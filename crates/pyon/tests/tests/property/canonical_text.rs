//! Property tests: the canonical text is deterministic and a fixed point of
//! decode followed by encode.

use proptest::prelude::*;

use pyon::{decode, encode, identifier, EncodeOptions};
use pyon_tests::registry;
use pyon_tests::strategies::*;

fn options() -> impl Strategy<Value = EncodeOptions> {
    (any::<bool>(), any::<bool>())
        .prop_map(|(protected, private)| EncodeOptions::new().with_protected(protected).with_private(private))
}

proptest! {
    /// Encoding the same value twice gives the same text and identifier.
    #[test]
    fn encoding_is_deterministic(value in any_value(), options in options()) {
        let a = encode(&value, options).unwrap();
        let b = encode(&value.clone(), options).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(
            identifier(&value, "sha256", options).unwrap(),
            identifier(&value, "sha256", options).unwrap()
        );
    }

    /// Re-encoding a decoded value reproduces the text it was decoded from.
    #[test]
    fn decoded_text_re_encodes_identically(value in any_value()) {
        let text = encode(&value, EncodeOptions::all()).unwrap();
        let decoded = decode(&text, &registry()).unwrap();
        prop_assert_eq!(encode(&decoded, EncodeOptions::all()).unwrap(), text);
    }

    /// Canonical text is always valid JSON.
    #[test]
    fn canonical_text_is_json(value in any_value(), options in options()) {
        let text = encode(&value, options).unwrap();
        prop_assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
    }
}
