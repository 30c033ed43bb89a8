//! Dispatch core: walks a value tree, handles primitives and sequences
//! itself and routes everything else to the owning codec family.

use serde_json::{Map as JsonMap, Number, Value as Json};
use tracing::{debug, error};

use pyon_types::{Map, Value};

use crate::composite::CompositeCodec;
use crate::envelope::{Discriminator, Envelope};
use crate::error::{DecodeError, EncodeError};
use crate::options::EncodeOptions;
use crate::registry::ClassRegistry;
use crate::specialized::SpecializedCodec;

/// Codec families, in encode probe order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodecKind {
    Specialized,
    Composite,
}

impl CodecKind {
    /// Specialized values also look attribute-like, so they are probed first.
    pub const DISPATCH_ORDER: [CodecKind; 2] = [CodecKind::Specialized, CodecKind::Composite];

    pub fn codec(&self) -> &'static dyn Codec {
        match self {
            CodecKind::Specialized => &SpecializedCodec,
            CodecKind::Composite => &CompositeCodec,
        }
    }
}

/// One codec family.
pub trait Codec: Sync {
    fn kind(&self) -> CodecKind;

    /// Whether this codec owns `value` on the encode path.
    fn is_encode(&self, value: &Value) -> bool;

    /// Whether this codec owns envelopes tagged `discriminator`.
    fn is_decode(&self, discriminator: Discriminator) -> bool {
        discriminator.codec() == self.kind()
    }

    fn encode(&self, value: &Value, encoder: &Encoder) -> Result<Envelope, EncodeError>;

    /// Rebuild a value from its envelope. Structural problems are logged and
    /// yield [`Value::Null`].
    fn decode(&self, envelope: Envelope, decoder: &Decoder<'_>) -> Value;
}

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// Value tree → canonical JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct Encoder {
    options: EncodeOptions,
}

impl Encoder {
    pub fn new(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EncodeOptions {
        &self.options
    }

    pub fn encode_value(&self, value: &Value) -> Result<Json, EncodeError> {
        match value {
            Value::Null => Ok(Json::Null),
            Value::Bool(b) => Ok(Json::Bool(*b)),
            Value::Int(i) => Ok(Json::from(*i)),
            Value::Float(f) => float(*f),
            Value::Str(s) => Ok(Json::String(s.clone())),
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => {
                self.encode_seq(items).map(Json::Array)
            }
            other => {
                let codec = CodecKind::DISPATCH_ORDER
                    .iter()
                    .map(CodecKind::codec)
                    .find(|codec| codec.is_encode(other))
                    .ok_or_else(|| EncodeError::UnsupportedType(other.type_name().to_string()))?;
                debug!(value = other.type_name(), codec = ?codec.kind(), "Encoding via codec");
                Ok(codec.encode(other, self)?.to_json()?)
            }
        }
    }

    pub fn encode_seq(&self, items: &[Value]) -> Result<Vec<Json>, EncodeError> {
        items.iter().map(|item| self.encode_value(item)).collect()
    }

    /// Encode the values of a map, keeping key order.
    pub fn encode_entries(&self, entries: &Map) -> Result<JsonMap<String, Json>, EncodeError> {
        entries
            .iter()
            .map(|(k, v)| Ok((k.clone(), self.encode_value(v)?)))
            .collect()
    }

    /// Canonical text of `value`.
    pub fn encode_str(&self, value: &Value) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(&self.encode_value(value)?)?)
    }
}

/// JSON number for a float; NaN and infinities have no JSON form.
pub(crate) fn float(f: f64) -> Result<Json, EncodeError> {
    Number::from_f64(f)
        .map(Json::Number)
        .ok_or_else(|| EncodeError::UnsupportedType(format!("non-finite float {}", f)))
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Canonical JSON → value tree, resolving classes against a registry.
#[derive(Clone, Copy, Debug)]
pub struct Decoder<'r> {
    registry: &'r ClassRegistry,
}

impl<'r> Decoder<'r> {
    pub fn new(registry: &'r ClassRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r ClassRegistry {
        self.registry
    }

    pub fn decode_value(&self, json: Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => number(&n),
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::List(self.decode_seq(items)),
            Json::Object(object) => match Discriminator::of(&object) {
                Some(discriminator) => self.decode_envelope(discriminator, object),
                None => Value::Map(self.decode_entries(object)),
            },
        }
    }

    pub fn decode_seq(&self, items: Vec<Json>) -> Vec<Value> {
        items.into_iter().map(|item| self.decode_value(item)).collect()
    }

    pub fn decode_entries(&self, object: JsonMap<String, Json>) -> Map {
        object
            .into_iter()
            .map(|(k, v)| (k, self.decode_value(v)))
            .collect()
    }

    fn decode_envelope(&self, discriminator: Discriminator, object: JsonMap<String, Json>) -> Value {
        let envelope = match Envelope::from_json(Json::Object(object)) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!(envelope = %discriminator, error = %e, "Malformed envelope");
                return Value::Null;
            }
        };
        let codec = discriminator.codec().codec();
        debug!(envelope = %discriminator, codec = ?codec.kind(), "Decoding via codec");
        codec.decode(envelope, self)
    }

    /// Parse canonical text. Only non-JSON input is an error.
    pub fn decode_str(&self, text: &str) -> Result<Value, DecodeError> {
        let json: Json = serde_json::from_str(text)?;
        Ok(self.decode_value(json))
    }
}

fn number(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => Value::Int(i),
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// Look up a required envelope field, logging when it is absent.
pub(crate) fn required<'e, T>(
    envelope: &Envelope,
    field: &'static str,
    slot: &'e Option<T>,
) -> Option<&'e T> {
    if slot.is_none() {
        error!(envelope = %envelope.kind, field, "Envelope missing required field");
    }
    slot.as_ref()
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Encode `value` to canonical text.
pub fn encode_str(value: &Value, options: EncodeOptions) -> Result<String, EncodeError> {
    Encoder::new(options).encode_str(value)
}

/// Decode canonical text, resolving classes against `registry`.
pub fn decode_str(text: &str, registry: &ClassRegistry) -> Result<Value, DecodeError> {
    Decoder::new(registry).decode_str(text)
}
