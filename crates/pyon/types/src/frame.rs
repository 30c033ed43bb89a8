//! Tabular datasets: column labels, row-major cells and a typed row index.

use std::fmt;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::error::ValueError;
use crate::temporal::Period;
use crate::value::{Map, Value};

// ---------------------------------------------------------------------------
// IndexKind
// ---------------------------------------------------------------------------

/// Closed set of row-index kinds a dataset envelope may name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    Index,
    RangeIndex,
    MultiIndex,
    DatetimeIndex,
    TimedeltaIndex,
    PeriodIndex,
    CategoricalIndex,
    Float64Index,
    Int64Index,
    UInt64Index,
}

impl IndexKind {
    pub const ALL: [IndexKind; 10] = [
        IndexKind::Index,
        IndexKind::RangeIndex,
        IndexKind::MultiIndex,
        IndexKind::DatetimeIndex,
        IndexKind::TimedeltaIndex,
        IndexKind::PeriodIndex,
        IndexKind::CategoricalIndex,
        IndexKind::Float64Index,
        IndexKind::Int64Index,
        IndexKind::UInt64Index,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Index => "Index",
            IndexKind::RangeIndex => "RangeIndex",
            IndexKind::MultiIndex => "MultiIndex",
            IndexKind::DatetimeIndex => "DatetimeIndex",
            IndexKind::TimedeltaIndex => "TimedeltaIndex",
            IndexKind::PeriodIndex => "PeriodIndex",
            IndexKind::CategoricalIndex => "CategoricalIndex",
            IndexKind::Float64Index => "Float64Index",
            IndexKind::Int64Index => "Int64Index",
            IndexKind::UInt64Index => "UInt64Index",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// Kinds whose labels are stored as plain values.
    pub fn is_labelled(&self) -> bool {
        matches!(
            self,
            IndexKind::Index
                | IndexKind::CategoricalIndex
                | IndexKind::Float64Index
                | IndexKind::Int64Index
                | IndexKind::UInt64Index
        )
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RangeIndex
// ---------------------------------------------------------------------------

/// Half-open arithmetic progression `start, start + step, ...` below `stop`
/// (above `stop` for negative steps).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RangeIndex {
    start: i64,
    stop: i64,
    step: i64,
}

impl RangeIndex {
    pub fn new(start: i64, stop: i64, step: i64) -> Result<Self, ValueError> {
        if step == 0 {
            return Err(ValueError::ZeroStep);
        }
        Ok(Self { start, stop, step })
    }

    /// `0..len` with step 1.
    pub fn default_for(len: usize) -> Self {
        Self {
            start: 0,
            stop: len as i64,
            step: 1,
        }
    }

    /// Recognise a perfectly arithmetic sequence of at least two labels with a
    /// non-zero step and rebuild the range it came from.
    pub fn detect(labels: &[i64]) -> Option<Self> {
        if labels.len() < 2 {
            return None;
        }
        let step = labels[1].checked_sub(labels[0])?;
        if step == 0 {
            return None;
        }
        for pair in labels.windows(2) {
            if pair[1].checked_sub(pair[0]) != Some(step) {
                return None;
            }
        }
        let stop = labels[labels.len() - 1].checked_add(step)?;
        Some(Self {
            start: labels[0],
            stop,
            step,
        })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn stop(&self) -> i64 {
        self.stop
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub fn len(&self) -> usize {
        let span = self.stop as i128 - self.start as i128;
        let step = self.step as i128;
        if (step > 0 && span <= 0) || (step < 0 && span >= 0) {
            return 0;
        }
        ((span + step - step.signum()) / step) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn values(&self) -> Vec<i64> {
        (0..self.len() as i64)
            .map(|i| self.start + i * self.step)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Row labels of a [`DataFrame`].
#[derive(Clone, Debug, PartialEq)]
pub enum Index {
    Range {
        range: RangeIndex,
        name: Option<String>,
    },
    /// Composite labels; every tuple has one entry per level.
    Multi {
        tuples: Vec<Vec<Value>>,
        names: Vec<Option<String>>,
    },
    Datetime {
        values: Vec<NaiveDateTime>,
        name: Option<String>,
    },
    Period {
        values: Vec<Period>,
        name: Option<String>,
    },
    Timedelta {
        values: Vec<TimeDelta>,
        name: Option<String>,
    },
    /// Plain labels: generic, categorical and the numeric index kinds.
    Labels {
        kind: IndexKind,
        values: Vec<Value>,
        name: Option<String>,
    },
}

impl Index {
    pub fn range(range: RangeIndex) -> Self {
        Index::Range { range, name: None }
    }

    pub fn labels(values: Vec<Value>) -> Self {
        Index::Labels {
            kind: IndexKind::Index,
            values,
            name: None,
        }
    }

    /// Build a multi-level index, checking every tuple has the same arity.
    pub fn multi(
        tuples: Vec<Vec<Value>>,
        names: Vec<Option<String>>,
    ) -> Result<Self, ValueError> {
        let arity = tuples.first().map_or(names.len(), Vec::len);
        for (position, tuple) in tuples.iter().enumerate() {
            if tuple.len() != arity {
                return Err(ValueError::LevelArity {
                    position,
                    expected: arity,
                    found: tuple.len(),
                });
            }
        }
        Ok(Index::Multi { tuples, names })
    }

    /// Attach a name to a single-level index. Multi-level indices are
    /// returned unchanged; their names are per level.
    pub fn named(mut self, new_name: impl Into<String>) -> Self {
        match &mut self {
            Index::Range { name, .. }
            | Index::Datetime { name, .. }
            | Index::Period { name, .. }
            | Index::Timedelta { name, .. }
            | Index::Labels { name, .. } => *name = Some(new_name.into()),
            Index::Multi { .. } => {}
        }
        self
    }

    pub fn kind(&self) -> IndexKind {
        match self {
            Index::Range { .. } => IndexKind::RangeIndex,
            Index::Multi { .. } => IndexKind::MultiIndex,
            Index::Datetime { .. } => IndexKind::DatetimeIndex,
            Index::Period { .. } => IndexKind::PeriodIndex,
            Index::Timedelta { .. } => IndexKind::TimedeltaIndex,
            Index::Labels { kind, .. } => *kind,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Index::Range { range, .. } => range.len(),
            Index::Multi { tuples, .. } => tuples.len(),
            Index::Datetime { values, .. } => values.len(),
            Index::Period { values, .. } => values.len(),
            Index::Timedelta { values, .. } => values.len(),
            Index::Labels { values, .. } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Level names: one per level for multi-level indices, otherwise a single
    /// optional name.
    pub fn names(&self) -> Vec<Option<String>> {
        match self {
            Index::Multi { names, .. } => names.clone(),
            Index::Range { name, .. }
            | Index::Datetime { name, .. }
            | Index::Period { name, .. }
            | Index::Timedelta { name, .. }
            | Index::Labels { name, .. } => vec![name.clone()],
        }
    }
}

// ---------------------------------------------------------------------------
// DataFrame
// ---------------------------------------------------------------------------

/// Row-major table with labelled columns and a row index.
#[derive(Clone, Debug, PartialEq)]
pub struct DataFrame {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    index: Index,
}

impl DataFrame {
    /// Empty dataset with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            index: Index::range(RangeIndex::default_for(0)),
        }
    }

    /// Dataset from full rows, indexed `0..n`.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self, ValueError> {
        for row in &rows {
            if row.len() != columns.len() {
                return Err(ValueError::ShapeMismatch {
                    shape: vec![rows.len(), columns.len()],
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        let index = Index::range(RangeIndex::default_for(rows.len()));
        Ok(Self {
            columns,
            rows,
            index,
        })
    }

    /// Dataset from row records. Columns are the union of record keys in
    /// first-seen order; keys a record lacks become null.
    pub fn from_records(records: &[Map]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect::<Vec<Vec<Value>>>();
        let index = Index::range(RangeIndex::default_for(rows.len()));
        Self {
            columns,
            rows,
            index,
        }
    }

    /// Conform columns to exactly `columns`: absent ones are null-filled,
    /// unlisted ones are dropped.
    pub fn reindex_columns(self, columns: &[String]) -> Self {
        let positions: Vec<Option<usize>> = columns
            .iter()
            .map(|c| self.columns.iter().position(|existing| existing == c))
            .collect();
        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                positions
                    .iter()
                    .map(|p| p.and_then(|i| row.get(i).cloned()).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Self {
            columns: columns.to_vec(),
            rows,
            index: self.index,
        }
    }

    /// Replace the row index; it must label every row.
    pub fn with_index(mut self, index: Index) -> Result<Self, ValueError> {
        self.set_index(index)?;
        Ok(self)
    }

    pub fn set_index(&mut self, index: Index) -> Result<(), ValueError> {
        if index.len() != self.rows.len() {
            return Err(ValueError::IndexLength {
                index: index.len(),
                rows: self.rows.len(),
            });
        }
        self.index = index;
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.get(col)
    }

    pub fn column(&self, column: &str) -> Option<Vec<&Value>> {
        let col = self.columns.iter().position(|c| c == column)?;
        Some(self.rows.iter().filter_map(|row| row.get(col)).collect())
    }

    /// One column-label → cell map per row, in column order.
    pub fn to_records(&self) -> Vec<Map> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}
