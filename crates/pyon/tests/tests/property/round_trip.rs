//! Property tests: decoding canonical text gives back the encoded value.

use proptest::prelude::*;

use pyon::{decode, encode, EncodeOptions, Value};
use pyon_tests::registry;
use pyon_tests::strategies::*;

proptest! {
    /// Lossless values survive a round trip under default options.
    #[test]
    fn lossless_values_round_trip(value in lossless_value()) {
        let text = encode(&value, EncodeOptions::default()).unwrap();
        let decoded = decode(&text, &registry()).unwrap();
        prop_assert_eq!(decoded, value);
    }

    /// Numeric arrays keep shape and element type.
    #[test]
    fn arrays_round_trip(array in numeric_array()) {
        let value = Value::Array(array);
        let text = encode(&value, EncodeOptions::default()).unwrap();
        prop_assert_eq!(decode(&text, &registry()).unwrap(), value);
    }

    /// Datasets of two or more rows get their default range index back.
    #[test]
    fn datasets_round_trip(frame in dataset()) {
        let value = Value::Frame(frame);
        let text = encode(&value, EncodeOptions::default()).unwrap();
        prop_assert_eq!(decode(&text, &registry()).unwrap(), value);
    }

    /// Tuples and sets come back as lists with the same elements.
    #[test]
    fn tuples_and_sets_read_back_as_lists(items in prop::collection::vec(any::<i64>(), 0..8)) {
        let values: Vec<Value> = items.into_iter().map(Value::Int).collect();
        let tuple = encode(&Value::Tuple(values.clone()), EncodeOptions::default()).unwrap();
        prop_assert_eq!(decode(&tuple, &registry()).unwrap(), Value::List(values.clone()));

        let set = Value::set(values);
        let Value::Set(distinct) = set.clone() else { unreachable!() };
        let text = encode(&set, EncodeOptions::default()).unwrap();
        prop_assert_eq!(decode(&text, &registry()).unwrap(), Value::List(distinct));
    }
}
