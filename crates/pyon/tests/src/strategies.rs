//! Proptest strategies over the value model.
//!
//! [`lossless_value`] only produces values whose decode is equal to the
//! original: no tuples or sets, no empty arrays, no gated map keys and no
//! datasets short enough to lose their range index.

use proptest::prelude::*;

use pyon::types::ArrayData;
use pyon::{BitVector, DataFrame, FileHandle, Map, NdArray, Object, Uuid, Value};

use crate::{status, Branch};

/// Finite floats that survive a decimal round trip exactly.
pub fn exact_float() -> impl Strategy<Value = f64> {
    (-1_000_000i32..1_000_000).prop_map(|n| f64::from(n) / 64.0)
}

pub fn public_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        exact_float().prop_map(Value::Float),
        ".{0,12}".prop_map(Value::Str),
    ]
}

pub fn bit_vector() -> impl Strategy<Value = BitVector> {
    prop::collection::vec(any::<bool>(), 0..40).prop_map(BitVector::from_bools)
}

pub fn numeric_array() -> impl Strategy<Value = NdArray> {
    (1usize..4, 1usize..4)
        .prop_flat_map(|(rows, cols)| {
            let n = rows * cols;
            let data = prop_oneof![
                prop::collection::vec(any::<i64>(), n).prop_map(ArrayData::Int),
                prop::collection::vec(exact_float(), n).prop_map(ArrayData::Float),
                prop::collection::vec(any::<bool>(), n).prop_map(ArrayData::Bool),
            ];
            (Just(vec![rows, cols]), data)
        })
        .prop_filter_map("shape matches data", |(shape, data)| {
            NdArray::new(shape, data).ok()
        })
}

pub fn file_handle() -> impl Strategy<Value = FileHandle> {
    (
        "[a-z]{1,8}/[a-z]{1,8}\\.[a-z]{2,3}",
        prop_oneof![Just("text/plain"), Just("application/octet-stream")],
        prop::collection::vec(any::<u8>(), 0..32),
    )
        .prop_map(|(path, media, content)| FileHandle::new(path, media, content))
}

/// Datasets of two or more rows over integer and string cells.
pub fn dataset() -> impl Strategy<Value = DataFrame> {
    (2usize..6, 1usize..4)
        .prop_flat_map(|(rows, cols)| {
            let cell = prop_oneof![
                any::<i64>().prop_map(Value::Int),
                "[a-z]{0,6}".prop_map(Value::Str),
            ];
            prop::collection::vec(prop::collection::vec(cell, cols), rows)
                .prop_map(move |rows| {
                    let columns: Vec<String> = (0..cols).map(|c| format!("c{}", c)).collect();
                    (columns, rows)
                })
        })
        .prop_filter_map("rectangular rows", |(columns, rows)| {
            DataFrame::from_rows(columns, rows).ok()
        })
}

fn branch() -> impl Strategy<Value = Branch> {
    ("[A-Z]{3}-[0-9]{2}", exact_float(), exact_float())
        .prop_map(|(code, lat, lon)| Branch { code, lat, lon })
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => scalar(),
        1 => bit_vector().prop_map(Value::Bits),
        1 => numeric_array().prop_map(Value::Array),
        1 => any::<u128>().prop_map(|n| Value::Uuid(Uuid::from_u128(n))),
        1 => file_handle().prop_map(Value::File),
        1 => dataset().prop_map(Value::Frame),
        1 => prop_oneof![Just("Active"), Just("Frozen"), Just("Closed")]
            .prop_map(|member| Value::Enum(status(member))),
        1 => branch().prop_map(|b| Value::Object(Object::new(b))),
    ]
}

/// Arbitrary nesting of lists and public-keyed maps over every leaf kind.
pub fn lossless_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec((public_key(), inner), 0..4)
                .prop_map(|entries| Value::Map(entries.into_iter().collect::<Map>())),
        ]
    })
}

/// Like [`lossless_value`] but also producing tuples, sets and gated keys.
pub fn any_value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Tuple),
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::set),
            prop::collection::vec(("_{0,2}[a-z]{1,6}", inner), 0..4)
                .prop_map(|entries| Value::Map(entries.into_iter().collect::<Map>())),
        ]
    })
}
