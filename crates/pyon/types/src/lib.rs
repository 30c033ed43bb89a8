//! Pyon value model.
//!
//! Everything the engine can encode is a [`Value`]: JSON scalars and
//! containers, attribute-bearing [`Object`]s, [`EnumConstant`]s and the
//! shape-carrying specialized values ([`BitVector`], [`NdArray`],
//! [`DataFrame`], [`uuid::Uuid`], [`FileHandle`]).

#![deny(unsafe_code)]
#![warn(rust_2018_idioms)]

mod array;
mod bits;
mod convert;
mod entity;
mod error;
mod file;
mod frame;
mod temporal;
mod value;

pub use array::{ArrayData, NdArray};
pub use bits::BitVector;
pub use convert::{FromValue, ToValue};
pub use entity::{CompositeKind, DynamicObject, Entity, EntityBase, EntityType, EnumConstant, Object};
pub use error::{AttributeError, TemporalParseError, ValueError};
pub use file::FileHandle;
pub use frame::{DataFrame, Index, IndexKind, RangeIndex};
pub use temporal::{
    format_timedelta, format_timestamp, parse_timedelta, parse_timestamp, Period, PeriodFreq,
};
pub use value::{Map, Value};

pub use uuid::Uuid;
