//! The tagged wire shape every non-primitive value is wrapped in.
//!
//! ```json
//! {"type": "object", "class": "bank.Account", "payload": {"owner": "ada"}}
//! ```
//!
//! Keys are emitted in the order `type`, `class`, `payload`, `aux1`..`aux4`;
//! absent fields are omitted and a JSON `null` reads back as absent.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as Json};

use crate::dispatch::CodecKind;

/// Closed set of envelope `type` tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Discriminator {
    Object,
    Record,
    Map,
    Enum,
    BitVector,
    NumericArray,
    TabularDataset,
    UniqueId,
    FileHandle,
}

impl Discriminator {
    pub const ALL: [Discriminator; 9] = [
        Discriminator::Object,
        Discriminator::Record,
        Discriminator::Map,
        Discriminator::Enum,
        Discriminator::BitVector,
        Discriminator::NumericArray,
        Discriminator::TabularDataset,
        Discriminator::UniqueId,
        Discriminator::FileHandle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Discriminator::Object => "object",
            Discriminator::Record => "record",
            Discriminator::Map => "map",
            Discriminator::Enum => "enum",
            Discriminator::BitVector => "bit-vector",
            Discriminator::NumericArray => "numeric-array",
            Discriminator::TabularDataset => "tabular-dataset",
            Discriminator::UniqueId => "unique-id",
            Discriminator::FileHandle => "file-handle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }

    /// The codec family that owns envelopes with this tag.
    pub fn codec(&self) -> CodecKind {
        match self {
            Discriminator::BitVector
            | Discriminator::NumericArray
            | Discriminator::TabularDataset
            | Discriminator::UniqueId
            | Discriminator::FileHandle => CodecKind::Specialized,
            Discriminator::Object
            | Discriminator::Record
            | Discriminator::Map
            | Discriminator::Enum => CodecKind::Composite,
        }
    }

    /// Tag of a JSON object, if it carries a recognised one.
    pub fn of(object: &JsonMap<String, Json>) -> Option<Self> {
        object.get("type")?.as_str().and_then(Self::from_name)
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One encoded non-primitive value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: Discriminator,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Json>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux1: Option<Json>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux2: Option<Json>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux3: Option<Json>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux4: Option<Json>,
}

impl Envelope {
    pub fn new(kind: Discriminator) -> Self {
        Self {
            kind,
            class: None,
            payload: None,
            aux1: None,
            aux2: None,
            aux3: None,
            aux4: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_payload(mut self, payload: Json) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Set auxiliary slot `slot` (1 to 4). Other slot numbers are ignored.
    pub fn with_aux(mut self, slot: u8, value: Json) -> Self {
        match slot {
            1 => self.aux1 = Some(value),
            2 => self.aux2 = Some(value),
            3 => self.aux3 = Some(value),
            4 => self.aux4 = Some(value),
            _ => {}
        }
        self
    }

    pub fn to_json(&self) -> Result<Json, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn from_json(json: Json) -> Result<Self, serde_json::Error> {
        serde_json::from_value(json)
    }
}
