//! # pyon-codec
//!
//! Canonical text encoding for the Pyon value model.
//!
//! Primitives and sequences are written as plain JSON. Every other value is
//! wrapped in an [`Envelope`] whose `type` tag names the codec family that
//! rebuilds it:
//!
//! - [`SpecializedCodec`] for bit vectors, numeric arrays, tabular datasets,
//!   unique ids and file handles
//! - [`CompositeCodec`] for maps, entities and enum constants
//!
//! Encoding fails loudly ([`EncodeError`]); decoding degrades a malformed
//! subtree to `Value::Null`, logs it and carries on.
//!
//! ```
//! use pyon_codec::{decode_str, encode_str, ClassRegistry, EncodeOptions};
//! use pyon_types::Value;
//!
//! let value = Value::map([("answer", Value::Int(42))]);
//! let text = encode_str(&value, EncodeOptions::default()).unwrap();
//! assert_eq!(text, r#"{"type":"map","payload":{"answer":42}}"#);
//! assert_eq!(decode_str(&text, &ClassRegistry::new()).unwrap(), value);
//! ```

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

pub mod composite;
pub mod dispatch;
pub mod envelope;
pub mod error;
pub mod options;
pub mod registry;
pub mod specialized;
mod tabular;

pub use composite::{CompositeCodec, Visibility};
pub use dispatch::{decode_str, encode_str, Codec, CodecKind, Decoder, Encoder};
pub use envelope::{Discriminator, Envelope};
pub use error::{DecodeError, EncodeError};
pub use options::EncodeOptions;
pub use registry::{ClassEntry, ClassRegistry, EnumDescriptor};
pub use specialized::SpecializedCodec;
