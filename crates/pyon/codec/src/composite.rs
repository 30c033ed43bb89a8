//! Composite codec: plain maps, attribute-bearing entities and enum
//! constants.

use serde_json::{Map as JsonMap, Value as Json};
use tracing::{error, warn};

use pyon_types::{CompositeKind, Entity, Map, Object, Value};

use crate::dispatch::{required, Codec, CodecKind, Decoder, Encoder};
use crate::envelope::{Discriminator, Envelope};
use crate::error::EncodeError;
use crate::options::EncodeOptions;
use crate::registry::ClassEntry;

/// Visibility tier of an attribute, read from its leading underscores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    /// `_name`
    Protected,
    /// `__name`
    Private,
}

impl Visibility {
    pub fn of(name: &str) -> Self {
        if name.starts_with("__") {
            Visibility::Private
        } else if name.starts_with('_') {
            Visibility::Protected
        } else {
            Visibility::Public
        }
    }

    /// Whether values of this tier are written out under `options`.
    pub fn is_emitted(&self, options: &EncodeOptions) -> bool {
        match self {
            Visibility::Public => true,
            Visibility::Protected => options.enc_protected,
            Visibility::Private => options.enc_private,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CompositeCodec;

impl CompositeCodec {
    /// Encode attribute entries, replacing gated values with `null`.
    fn encode_attributes<'a, I>(
        &self,
        entries: I,
        encoder: &Encoder,
    ) -> Result<JsonMap<String, Json>, EncodeError>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut out = JsonMap::new();
        for (name, value) in entries {
            let encoded = if Visibility::of(name).is_emitted(encoder.options()) {
                encoder.encode_value(value)?
            } else {
                Json::Null
            };
            out.insert(name.to_string(), encoded);
        }
        Ok(out)
    }

    fn encode_object(&self, object: &Object, encoder: &Encoder) -> Result<Envelope, EncodeError> {
        let discriminator = match object.kind() {
            CompositeKind::Object => Discriminator::Object,
            CompositeKind::Record => Discriminator::Record,
        };
        let attributes = object.attributes();
        let payload = self.encode_attributes(
            attributes.iter().map(|(name, value)| (name.as_str(), value)),
            encoder,
        )?;
        Ok(Envelope::new(discriminator)
            .with_class(object.class_name())
            .with_payload(Json::Object(payload)))
    }

    fn decode_enum(&self, envelope: Envelope, decoder: &Decoder<'_>) -> Value {
        let (Some(class), Some(payload)) = (
            required(&envelope, "class", &envelope.class).cloned(),
            required(&envelope, "payload", &envelope.payload).cloned(),
        ) else {
            return Value::Null;
        };

        let Some(descriptor) = decoder.registry().resolve(&class).and_then(ClassEntry::as_enum)
        else {
            error!(class = %class, "Enum class is not registered");
            return Value::Null;
        };

        let value = decoder.decode_value(payload);
        match descriptor.lookup(&value) {
            Some(constant) => Value::Enum(constant),
            None => {
                error!(class = %class, value = %value, "No enum member has this value");
                Value::Null
            }
        }
    }

    fn decode_composite(&self, envelope: Envelope, decoder: &Decoder<'_>) -> Value {
        if required(&envelope, "payload", &envelope.payload).is_none() {
            return Value::Null;
        }
        let payload = match envelope.payload {
            Some(Json::Object(entries)) => entries,
            other => {
                error!(
                    envelope = %envelope.kind,
                    found = other.as_ref().map_or("null", json_type),
                    "Composite payload is not an object"
                );
                return Value::Null;
            }
        };

        let entries = decoder.decode_entries(payload);
        if entries.is_empty() {
            return Value::Map(entries);
        }
        let Some(class) = envelope.class.as_deref() else {
            return Value::Map(entries);
        };

        let Some(entry) = decoder.registry().resolve(class) else {
            error!(class = %class, "Class is not registered");
            return Value::Null;
        };
        let Some(mut entity) = entry.instantiate() else {
            error!(class = %class, "Class is not registered");
            return Value::Null;
        };

        let tagged = match envelope.kind {
            Discriminator::Object => Some(CompositeKind::Object),
            Discriminator::Record => Some(CompositeKind::Record),
            _ => None,
        };
        if let (Some(tagged), Some(registered)) = (tagged, entry.kind()) {
            if tagged != registered {
                error!(
                    class = %class,
                    envelope = %envelope.kind,
                    registered = ?registered,
                    "Envelope kind disagrees with the registered class"
                );
                return Value::Null;
            }
        }

        inject(entity.as_mut(), class, entries);
        Value::Object(Object::from_box(entity))
    }
}

/// Assign decoded entries onto a freshly allocated instance. Rejected
/// entries keep the instance's default.
fn inject(entity: &mut dyn Entity, class: &str, entries: Map) {
    for (name, value) in entries {
        if let Err(e) = entity.set_attribute(&name, value) {
            warn!(class = %class, attribute = %name, error = %e, "Attribute rejected");
        }
    }
}

fn json_type(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

impl Codec for CompositeCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Composite
    }

    fn is_encode(&self, value: &Value) -> bool {
        matches!(value, Value::Map(_) | Value::Object(_) | Value::Enum(_))
    }

    fn encode(&self, value: &Value, encoder: &Encoder) -> Result<Envelope, EncodeError> {
        match value {
            Value::Enum(constant) => Ok(Envelope::new(Discriminator::Enum)
                .with_class(constant.class.clone())
                .with_payload(encoder.encode_value(&constant.value)?)),
            Value::Map(entries) => {
                let payload = self.encode_attributes(
                    entries.iter().map(|(name, value)| (name.as_str(), value)),
                    encoder,
                )?;
                Ok(Envelope::new(Discriminator::Map).with_payload(Json::Object(payload)))
            }
            Value::Object(object) => self.encode_object(object, encoder),
            other => Err(EncodeError::UnsupportedType(other.type_name().to_string())),
        }
    }

    fn decode(&self, envelope: Envelope, decoder: &Decoder<'_>) -> Value {
        match envelope.kind {
            Discriminator::Enum => self.decode_enum(envelope, decoder),
            Discriminator::Map | Discriminator::Record | Discriminator::Object => {
                self.decode_composite(envelope, decoder)
            }
            other => {
                error!(envelope = %other, "Envelope is not a composite");
                Value::Null
            }
        }
    }
}
