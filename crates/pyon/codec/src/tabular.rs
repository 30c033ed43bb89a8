//! Tabular dataset envelopes.
//!
//! | slot    | contents                                   |
//! |---------|--------------------------------------------|
//! | payload | row records, one column → cell map per row |
//! | aux1    | column labels                              |
//! | aux2    | index labels in JSON-safe form             |
//! | aux3    | index level names                          |
//! | aux4    | index kind name                            |
//!
//! Range indices are written out label by label and recognised again on
//! decode only if the labels form an arithmetic progression.

use std::str::FromStr;

use serde_json::{Map as JsonMap, Value as Json};
use tracing::{debug, error};

use pyon_types::{
    format_timedelta, format_timestamp, parse_timedelta, parse_timestamp, DataFrame, Index,
    IndexKind, Map, Period, RangeIndex, TemporalParseError, Value,
};

use crate::dispatch::{required, Decoder, Encoder};
use crate::envelope::{Discriminator, Envelope};
use crate::error::EncodeError;

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

pub(crate) fn encode(frame: &DataFrame, encoder: &Encoder) -> Result<Envelope, EncodeError> {
    let mut records = Vec::with_capacity(frame.len());
    for row in frame.rows() {
        let mut record = JsonMap::new();
        for (column, cell) in frame.columns().iter().zip(row) {
            record.insert(column.clone(), encoder.encode_value(cell)?);
        }
        records.push(Json::Object(record));
    }

    let index = frame.index();
    let columns = frame.columns().iter().cloned().map(Json::String).collect();
    let names = index
        .names()
        .into_iter()
        .map(|name| name.map_or(Json::Null, Json::String))
        .collect();

    Ok(Envelope::new(Discriminator::TabularDataset)
        .with_payload(Json::Array(records))
        .with_aux(1, Json::Array(columns))
        .with_aux(2, Json::Array(project_index(index, encoder)?))
        .with_aux(3, Json::Array(names))
        .with_aux(4, Json::String(index.kind().as_str().to_string())))
}

/// Index labels as JSON: ranges materialised, temporal labels as text,
/// multi-level entries as arrays.
fn project_index(index: &Index, encoder: &Encoder) -> Result<Vec<Json>, EncodeError> {
    match index {
        Index::Range { range, .. } => Ok(range.values().into_iter().map(Json::from).collect()),
        Index::Multi { tuples, names } => {
            let arity = names.len();
            tuples
                .iter()
                .enumerate()
                .map(|(position, tuple)| {
                    if tuple.len() != arity {
                        return Err(EncodeError::InvalidShape(format!(
                            "multi-level index entry {} has {} levels, expected {}",
                            position,
                            tuple.len(),
                            arity
                        )));
                    }
                    encoder.encode_seq(tuple).map(Json::Array)
                })
                .collect()
        }
        Index::Datetime { values, .. } => Ok(text_labels(values, format_timestamp)),
        Index::Period { values, .. } => Ok(text_labels(values, Period::to_string)),
        Index::Timedelta { values, .. } => Ok(text_labels(values, format_timedelta)),
        Index::Labels { kind, values, .. } => {
            if !kind.is_labelled() {
                return Err(EncodeError::InvalidShape(format!(
                    "{} cannot hold plain labels",
                    kind
                )));
            }
            encoder.encode_seq(values)
        }
    }
}

fn text_labels<T>(values: &[T], render: impl Fn(&T) -> String) -> Vec<Json> {
    values.iter().map(|v| Json::String(render(v))).collect()
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

pub(crate) fn decode(envelope: Envelope, decoder: &Decoder<'_>) -> Value {
    let present = [
        required(&envelope, "payload", &envelope.payload).is_some(),
        required(&envelope, "aux1", &envelope.aux1).is_some(),
        required(&envelope, "aux2", &envelope.aux2).is_some(),
        required(&envelope, "aux3", &envelope.aux3).is_some(),
        required(&envelope, "aux4", &envelope.aux4).is_some(),
    ];
    if present.contains(&false) {
        return Value::Null;
    }
    let Envelope {
        payload: Some(payload),
        aux1: Some(columns),
        aux2: Some(labels),
        aux3: Some(names),
        aux4: Some(kind),
        ..
    } = envelope
    else {
        return Value::Null;
    };

    match rebuild(payload, columns, labels, names, kind, decoder) {
        Ok(frame) => Value::Frame(frame),
        Err(reason) => {
            error!(reason = %reason, "Invalid tabular dataset");
            Value::Null
        }
    }
}

fn rebuild(
    payload: Json,
    columns: Json,
    labels: Json,
    names: Json,
    kind: Json,
    decoder: &Decoder<'_>,
) -> Result<DataFrame, String> {
    let Json::Array(rows) = payload else {
        return Err("payload is not a list of row records".into());
    };
    let columns = string_list(columns).ok_or("aux1 is not a list of column labels")?;
    let Json::Array(labels) = labels else {
        return Err("aux2 is not a list of index labels".into());
    };
    let names = name_list(names).ok_or("aux3 is not a list of index names")?;
    let kind_name = kind.as_str().ok_or("aux4 is not an index kind name")?;
    let kind =
        IndexKind::from_name(kind_name).ok_or_else(|| format!("unknown index kind {}", kind_name))?;

    let records = rows
        .into_iter()
        .map(|row| match row {
            Json::Object(entries) => Ok(decoder.decode_entries(entries)),
            _ => Err("row is not a record".to_string()),
        })
        .collect::<Result<Vec<Map>, _>>()?;
    let frame = DataFrame::from_records(&records).reindex_columns(&columns);

    let index = rebuild_index(kind, labels, names, decoder)?;
    frame.with_index(index).map_err(|e| e.to_string())
}

fn rebuild_index(
    kind: IndexKind,
    labels: Vec<Json>,
    names: Vec<Option<String>>,
    decoder: &Decoder<'_>,
) -> Result<Index, String> {
    let name = names.first().cloned().flatten();
    match kind {
        IndexKind::MultiIndex => {
            let tuples = labels
                .into_iter()
                .map(|entry| match entry {
                    Json::Array(levels) => Ok(decoder.decode_seq(levels)),
                    _ => Err("multi-level index entry is not a list".to_string()),
                })
                .collect::<Result<Vec<Vec<Value>>, _>>()?;
            if tuples.first().is_some_and(|t| t.len() != names.len()) {
                return Err(format!(
                    "{} level names for {}-level index",
                    names.len(),
                    tuples[0].len()
                ));
            }
            Index::multi(tuples, names).map_err(|e| e.to_string())
        }
        IndexKind::DatetimeIndex => Ok(Index::Datetime {
            values: parse_labels(&labels, parse_timestamp)?,
            name,
        }),
        IndexKind::PeriodIndex => Ok(Index::Period {
            values: parse_labels(&labels, Period::from_str)?,
            name,
        }),
        IndexKind::TimedeltaIndex => Ok(Index::Timedelta {
            values: parse_labels(&labels, parse_timedelta)?,
            name,
        }),
        IndexKind::RangeIndex => match arithmetic(&labels) {
            Some(range) => Ok(Index::Range { range, name }),
            None => {
                debug!(labels = labels.len(), "Range labels are not arithmetic");
                Ok(Index::Labels {
                    kind: IndexKind::Index,
                    values: decoder.decode_seq(labels),
                    name,
                })
            }
        },
        IndexKind::Index
        | IndexKind::CategoricalIndex
        | IndexKind::Float64Index
        | IndexKind::Int64Index
        | IndexKind::UInt64Index => Ok(Index::Labels {
            kind,
            values: decoder.decode_seq(labels),
            name,
        }),
    }
}

/// The range a label list came from, when every label is an integer and the
/// list is an arithmetic progression of at least two terms.
fn arithmetic(labels: &[Json]) -> Option<RangeIndex> {
    let ints = labels
        .iter()
        .map(Json::as_i64)
        .collect::<Option<Vec<i64>>>()?;
    RangeIndex::detect(&ints)
}

fn parse_labels<T>(
    labels: &[Json],
    parse: impl Fn(&str) -> Result<T, TemporalParseError>,
) -> Result<Vec<T>, String> {
    labels
        .iter()
        .map(|label| {
            let text = label
                .as_str()
                .ok_or_else(|| format!("temporal label {} is not a string", label))?;
            parse(text).map_err(|e| e.to_string())
        })
        .collect()
}

fn string_list(json: Json) -> Option<Vec<String>> {
    match json {
        Json::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Json::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}

fn name_list(json: Json) -> Option<Vec<Option<String>>> {
    match json {
        Json::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Json::String(s) => Some(Some(s)),
                Json::Null => Some(None),
                _ => None,
            })
            .collect(),
        _ => None,
    }
}
