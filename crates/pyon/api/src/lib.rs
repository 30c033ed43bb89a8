//! # pyon
//!
//! Reversible canonical text for values a plain JSON encoder cannot
//! round-trip: attribute-bearing entities, enum constants, unique ids, bit
//! vectors, shaped numeric arrays, tabular datasets and file handles.
//!
//! The canonical text doubles as persistence format ([`to_file`],
//! [`from_file`]) and as hash input ([`identifier`], [`object_id`]).
//!
//! ```
//! use pyon::{decode, encode, impl_entity, ClassRegistry, EncodeOptions, Object, Value};
//!
//! #[derive(Clone, Debug, Default, PartialEq)]
//! struct Point {
//!     x: i64,
//!     y: i64,
//! }
//!
//! impl_entity!(Point, "geometry.Point", record { x, y });
//!
//! let mut registry = ClassRegistry::new();
//! registry.register::<Point>();
//!
//! let value = Value::Object(Object::new(Point { x: 1, y: 2 }));
//! let text = encode(&value, EncodeOptions::default()).unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"type":"record","class":"geometry.Point","payload":{"x":1,"y":2}}"#
//! );
//! assert_eq!(decode(&text, &registry).unwrap(), value);
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod hash;
pub mod persist;

use std::path::Path;

pub use config::{PyonConfig, DEFAULT_EXTENSION};
pub use error::{PyonError, Result};
pub use hash::{identifier, object_id, HashAlgorithm, ObjectId};
pub use persist::{from_file, to_file};

pub use pyon_codec::{
    ClassEntry, ClassRegistry, DecodeError, Discriminator, EncodeError, EncodeOptions,
    EnumDescriptor, Envelope,
};
pub use pyon_types::{
    impl_entity, BitVector, CompositeKind, DataFrame, DynamicObject, Entity, EntityType,
    EnumConstant, FileHandle, FromValue, Index, IndexKind, Map, NdArray, Object, ToValue, Uuid,
    Value,
};

/// Underlying crates, for items not re-exported at the root.
pub use pyon_codec as codec;
pub use pyon_types as types;

/// Canonical text of `value`.
pub fn encode(value: &Value, options: EncodeOptions) -> Result<String> {
    Ok(pyon_codec::encode_str(value, options)?)
}

/// Decode canonical text, then run the post-decode hook of a top-level
/// entity once.
pub fn decode(text: &str, registry: &ClassRegistry) -> Result<Value> {
    let mut value = pyon_codec::decode_str(text, registry)?;
    if let Value::Object(object) = &mut value {
        object.post_decode();
    }
    Ok(value)
}

/// A configuration and a class registry bundled behind one handle.
#[derive(Debug, Default)]
pub struct Pyon {
    config: PyonConfig,
    registry: ClassRegistry,
}

impl Pyon {
    pub fn new(config: PyonConfig, registry: ClassRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &PyonConfig {
        &self.config
    }

    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ClassRegistry {
        &mut self.registry
    }

    pub fn encode(&self, value: &Value) -> Result<String> {
        encode(value, self.config.encode_options())
    }

    pub fn decode(&self, text: &str) -> Result<Value> {
        decode(text, &self.registry)
    }

    /// Save under the configured extension.
    pub fn to_file(&self, value: &Value, path: impl AsRef<Path>) -> Result<String> {
        persist::save(
            value,
            path.as_ref(),
            self.config.encode_options(),
            &self.config.extension,
        )
    }

    pub fn from_file(&self, path: impl AsRef<Path>) -> Result<Option<Value>> {
        from_file(path, &self.registry)
    }

    /// Hex digest under the configured algorithm.
    pub fn identifier(&self, value: &Value) -> Result<String> {
        let text = self.encode(value)?;
        Ok(self.config.algorithm.hex_digest(text.as_bytes()))
    }

    pub fn object_id(&self, value: &Value) -> Result<ObjectId> {
        object_id(value, self.config.encode_options())
    }
}
