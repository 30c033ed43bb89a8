use thiserror::Error;

/// Errors from converting a [`crate::Value`] into a concrete Rust type or
/// from building a shaped value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("integer out of range for {target}: {value}")]
    OutOfRange { target: &'static str, value: i64 },

    #[error("shape {shape:?} holds {expected} elements, found {found}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        found: usize,
    },

    #[error("shape {0:?} holds more elements than fit in memory")]
    ShapeOverflow(Vec<usize>),

    #[error("invalid bit character {0:?}, expected '0' or '1'")]
    InvalidBit(char),

    #[error("index holds {index} labels but the dataset has {rows} rows")]
    IndexLength { index: usize, rows: usize },

    #[error("multi-level index entry {position} has {found} levels, expected {expected}")]
    LevelArity {
        position: usize,
        expected: usize,
        found: usize,
    },

    #[error("range step must be non-zero")]
    ZeroStep,
}

/// Rejection of a field injection through [`crate::Entity::set_attribute`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttributeError {
    #[error("unknown attribute '{0}'")]
    Unknown(String),

    #[error("attribute '{name}': {source}")]
    Conversion {
        name: String,
        #[source]
        source: ValueError,
    },
}

/// Failure to read one of the temporal text forms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemporalParseError {
    #[error("invalid timestamp: {0}")]
    Timestamp(String),

    #[error("invalid period: {0}")]
    Period(String),

    #[error("invalid timedelta: {0}")]
    Timedelta(String),
}
