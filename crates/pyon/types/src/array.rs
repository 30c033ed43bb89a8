use crate::error::ValueError;
use crate::value::Value;

/// Flat element storage of an [`NdArray`].
#[derive(Clone, Debug, PartialEq)]
pub enum ArrayData {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Bool(Vec<bool>),
}

impl ArrayData {
    pub fn len(&self) -> usize {
        match self {
            ArrayData::Int(v) => v.len(),
            ArrayData::Float(v) => v.len(),
            ArrayData::Bool(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> &'static str {
        match self {
            ArrayData::Int(_) => "int64",
            ArrayData::Float(_) => "float64",
            ArrayData::Bool(_) => "bool",
        }
    }

    /// Elements as scalar values, row-major.
    pub fn to_values(&self) -> Vec<Value> {
        match self {
            ArrayData::Int(v) => v.iter().map(|x| Value::Int(*x)).collect(),
            ArrayData::Float(v) => v.iter().map(|x| Value::Float(*x)).collect(),
            ArrayData::Bool(v) => v.iter().map(|x| Value::Bool(*x)).collect(),
        }
    }

    /// Infer storage from scalar values: all bools give `Bool`, all ints give
    /// `Int`, any mix of numbers gives `Float`. Empty input is `Float`.
    pub fn from_values(values: &[Value]) -> Result<Self, ValueError> {
        if values.is_empty() {
            return Ok(ArrayData::Float(Vec::new()));
        }
        if values.iter().all(|v| matches!(v, Value::Bool(_))) {
            return Ok(ArrayData::Bool(
                values
                    .iter()
                    .map(|v| matches!(v, Value::Bool(true)))
                    .collect(),
            ));
        }
        if values.iter().all(|v| matches!(v, Value::Int(_))) {
            return Ok(ArrayData::Int(
                values.iter().filter_map(Value::as_i64).collect(),
            ));
        }
        values
            .iter()
            .map(|v| {
                v.as_f64().ok_or(ValueError::TypeMismatch {
                    expected: "number",
                    found: v.type_name(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()
            .map(ArrayData::Float)
    }
}

/// Shaped numeric array stored flat in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    data: ArrayData,
}

impl NdArray {
    /// Build an array, checking that `shape` accounts for every element.
    pub fn new(shape: Vec<usize>, data: ArrayData) -> Result<Self, ValueError> {
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
            .ok_or_else(|| ValueError::ShapeOverflow(shape.clone()))?;
        if expected != data.len() {
            return Err(ValueError::ShapeMismatch {
                shape,
                expected,
                found: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// One-dimensional array over `data`.
    pub fn from_vec(data: ArrayData) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Same elements under a new shape.
    pub fn reshape(self, shape: Vec<usize>) -> Result<Self, ValueError> {
        Self::new(shape, self.data)
    }

    /// Element at a multi-dimensional position.
    pub fn get(&self, position: &[usize]) -> Option<Value> {
        if position.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0usize;
        for (&p, &dim) in position.iter().zip(&self.shape) {
            if p >= dim {
                return None;
            }
            offset = offset * dim + p;
        }
        match &self.data {
            ArrayData::Int(v) => v.get(offset).map(|x| Value::Int(*x)),
            ArrayData::Float(v) => v.get(offset).map(|x| Value::Float(*x)),
            ArrayData::Bool(v) => v.get(offset).map(|x| Value::Bool(*x)),
        }
    }
}
