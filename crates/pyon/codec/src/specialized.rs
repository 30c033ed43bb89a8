//! Specialized codec: bit vectors, numeric arrays, tabular datasets, unique
//! ids and file handles.

use serde_json::Value as Json;
use tracing::error;
use uuid::Uuid;

use pyon_types::{ArrayData, BitVector, FileHandle, NdArray, Value};

use crate::dispatch::{float, required, Codec, CodecKind, Decoder, Encoder};
use crate::envelope::{Discriminator, Envelope};
use crate::error::EncodeError;
use crate::tabular;

#[derive(Clone, Copy, Debug, Default)]
pub struct SpecializedCodec;

impl SpecializedCodec {
    fn encode_array(&self, array: &NdArray) -> Result<Envelope, EncodeError> {
        let payload = match array.data() {
            ArrayData::Int(v) => v.iter().map(|x| Json::from(*x)).collect(),
            ArrayData::Bool(v) => v.iter().map(|x| Json::Bool(*x)).collect(),
            ArrayData::Float(v) => v
                .iter()
                .map(|x| float(*x))
                .collect::<Result<Vec<Json>, _>>()?,
        };
        let shape = array.shape().iter().map(|d| Json::from(*d)).collect();
        Ok(Envelope::new(Discriminator::NumericArray)
            .with_payload(Json::Array(payload))
            .with_aux(1, Json::Array(shape)))
    }

    fn decode_bits(&self, envelope: &Envelope) -> Value {
        let Some(payload) = required(envelope, "payload", &envelope.payload) else {
            return Value::Null;
        };
        let Some(text) = payload.as_str() else {
            error!(envelope = %envelope.kind, "Bit vector payload is not a string");
            return Value::Null;
        };
        match text.parse::<BitVector>() {
            Ok(bits) => Value::Bits(bits),
            Err(e) => {
                error!(error = %e, "Invalid bit vector payload");
                Value::Null
            }
        }
    }

    fn decode_array(&self, envelope: &Envelope) -> Value {
        let (Some(payload), Some(shape)) = (
            required(envelope, "payload", &envelope.payload),
            required(envelope, "aux1", &envelope.aux1),
        ) else {
            return Value::Null;
        };

        let Some(shape) = shape.as_array().and_then(|dims| {
            dims.iter()
                .map(|d| d.as_u64().and_then(|d| usize::try_from(d).ok()))
                .collect::<Option<Vec<usize>>>()
        }) else {
            error!(shape = %shape, "Array shape is not a list of dimension sizes");
            return Value::Null;
        };

        let mut flat = Vec::new();
        if let Err(found) = flatten(payload, &mut flat) {
            error!(found, "Array payload holds a non-numeric element");
            return Value::Null;
        }

        match ArrayData::from_values(&flat).and_then(|data| NdArray::new(shape, data)) {
            Ok(array) => Value::Array(array),
            Err(e) => {
                error!(error = %e, "Invalid numeric array");
                Value::Null
            }
        }
    }

    fn decode_uuid(&self, envelope: &Envelope) -> Value {
        let Some(payload) = required(envelope, "payload", &envelope.payload) else {
            return Value::Null;
        };
        match payload.as_str().map(Uuid::parse_str) {
            Some(Ok(id)) => Value::Uuid(id),
            _ => {
                error!(payload = %payload, "Invalid unique id payload");
                Value::Null
            }
        }
    }

    fn decode_file(&self, envelope: Envelope, decoder: &Decoder<'_>) -> Value {
        if required(&envelope, "payload", &envelope.payload).is_none() {
            return Value::Null;
        }
        let dict = match envelope.payload {
            Some(Json::Object(entries)) => decoder.decode_entries(entries),
            _ => {
                error!("File handle payload is not an object");
                return Value::Null;
            }
        };
        match FileHandle::from_dict(&dict) {
            Some(handle) => Value::File(handle),
            None => {
                error!("File handle payload is incomplete");
                Value::Null
            }
        }
    }
}

/// Collect the scalars of an arbitrarily nested payload in row-major order.
/// On failure returns the JSON type of the offending element.
fn flatten(json: &Json, out: &mut Vec<Value>) -> Result<(), &'static str> {
    match json {
        Json::Array(items) => items.iter().try_for_each(|item| flatten(item, out)),
        Json::Bool(b) => {
            out.push(Value::Bool(*b));
            Ok(())
        }
        Json::Number(n) => {
            out.push(match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            });
            Ok(())
        }
        Json::Null => Err("null"),
        Json::String(_) => Err("string"),
        Json::Object(_) => Err("object"),
    }
}

impl Codec for SpecializedCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Specialized
    }

    fn is_encode(&self, value: &Value) -> bool {
        matches!(
            value,
            Value::Bits(_) | Value::Array(_) | Value::Frame(_) | Value::Uuid(_) | Value::File(_)
        )
    }

    fn encode(&self, value: &Value, encoder: &Encoder) -> Result<Envelope, EncodeError> {
        match value {
            Value::Bits(bits) => {
                Ok(Envelope::new(Discriminator::BitVector).with_payload(Json::String(bits.to01())))
            }
            Value::Array(array) => self.encode_array(array),
            Value::Frame(frame) => tabular::encode(frame, encoder),
            Value::Uuid(id) => Ok(Envelope::new(Discriminator::UniqueId)
                .with_payload(Json::String(id.hyphenated().to_string()))),
            Value::File(handle) => Ok(Envelope::new(Discriminator::FileHandle)
                .with_payload(Json::Object(encoder.encode_entries(&handle.to_dict())?))),
            other => Err(EncodeError::UnsupportedType(other.type_name().to_string())),
        }
    }

    fn decode(&self, envelope: Envelope, decoder: &Decoder<'_>) -> Value {
        match envelope.kind {
            Discriminator::BitVector => self.decode_bits(&envelope),
            Discriminator::NumericArray => self.decode_array(&envelope),
            Discriminator::TabularDataset => tabular::decode(envelope, decoder),
            Discriminator::UniqueId => self.decode_uuid(&envelope),
            Discriminator::FileHandle => self.decode_file(envelope, decoder),
            other => {
                error!(envelope = %other, "Envelope is not a specialized value");
                Value::Null
            }
        }
    }
}
