use std::fmt;

use indexmap::IndexMap;
use uuid::Uuid;

use crate::array::NdArray;
use crate::bits::BitVector;
use crate::entity::{EnumConstant, Object};
use crate::file::FileHandle;
use crate::frame::DataFrame;

/// Insertion-ordered, string-keyed map.
///
/// Key order is emission order, so two maps with the same entries in a
/// different order produce different canonical text.
pub type Map = IndexMap<String, Value>;

/// Any value the engine can encode.
///
/// The tree is owned: a node cannot reference one of its ancestors, so every
/// `Value` is acyclic by construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Ordered sequence.
    List(Vec<Value>),
    /// Ordered sequence; decodes back as [`Value::List`].
    Tuple(Vec<Value>),
    /// Distinct elements in insertion order; decodes back as [`Value::List`].
    Set(Vec<Value>),
    /// Plain associative map (no class).
    Map(Map),
    /// Attribute-bearing instance of a named type.
    Object(Object),
    Enum(EnumConstant),
    Bits(BitVector),
    Array(NdArray),
    Frame(DataFrame),
    Uuid(Uuid),
    File(FileHandle),
}

impl Value {
    /// Build a set, dropping repeated elements while keeping first-seen order.
    pub fn set<I: IntoIterator<Item = Value>>(items: I) -> Self {
        let mut distinct: Vec<Value> = Vec::new();
        for item in items {
            if !distinct.contains(&item) {
                distinct.push(item);
            }
        }
        Value::Set(distinct)
    }

    /// Build a plain map from `(key, value)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Short name of the variant, used in logs and conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::Enum(_) => "enum",
            Value::Bits(_) => "bit-vector",
            Value::Array(_) => "numeric-array",
            Value::Frame(_) => "tabular-dataset",
            Value::Uuid(_) => "unique-id",
            Value::File(_) => "file-handle",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Elements of any sequence-like variant.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Uuid(u) => write!(f, "{}", u),
            Value::Bits(b) => write!(f, "{}", b),
            Value::Object(o) => write!(f, "<{}>", o.class_name()),
            Value::Enum(e) => write!(f, "{}.{}", e.class, e.member),
            other => write!(f, "<{}>", other.type_name()),
        }
    }
}
