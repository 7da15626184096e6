//! Immutable tabular microdata.
//!
//! A `Dataset` is a list of named columns and rows of typed `Value`s.
//! The engine never mutates it: sorting produces a permutation of row
//! indices, and linking builds a new dataset.
use csv::{ReaderBuilder, Trim};
use ordered_float::OrderedFloat;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io;

use crate::errors::{Error, Result};

/// Cells that are read as missing values.
const MISSING: [&str; 6] = ["", "nan", "NaN", "NA", "N/A", "null"];

/// A single cell of a dataset.
///
/// Values are totally ordered (first by variant, then by value) so that
/// tuples of them can be sorted and hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Missing,
    Integer(i64),
    Float(OrderedFloat<f64>),
    Text(String),
}

impl Value {
    pub fn is_missing(&self) -> bool {
        *self == Value::Missing
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Value {
        Value::Integer(x)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Value {
        if x.is_nan() {
            Value::Missing
        } else {
            Value::Float(OrderedFloat(x))
        }
    }
}

impl From<&str> for Value {
    fn from(x: &str) -> Value {
        Value::Text(x.to_owned())
    }
}

impl From<String> for Value {
    fn from(x: String) -> Value {
        Value::Text(x)
    }
}

/// The string form of a value.
///
/// Tallies, worth assignments and linked composite keys all work on it;
/// missing values print as `nan`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Missing => write!(f, "nan"),
            Value::Integer(x) => write!(f, "{}", x),
            Value::Float(x) => write!(f, "{:?}", x.into_inner()),
            Value::Text(x) => write!(f, "{}", x),
        }
    }
}

/// An immutable ordered collection of records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Builds a dataset, checking that column names are unique and that
    /// every row has one value per column.
    pub fn new<S: Into<String>>(columns: Vec<S>, rows: Vec<Vec<Value>>) -> Result<Dataset> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(Error::Configuration(format!("duplicate column {}", name)));
            }
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(Error::Configuration(format!(
                    "row {} has {} values, expected {}",
                    i,
                    row.len(),
                    columns.len()
                )));
            }
        }

        Ok(Dataset { columns, rows })
    }

    /// Loads a dataset from headered CSV data.
    ///
    /// Each column gets a single type: integer if every non-missing cell
    /// parses as an integer, float if every one parses as a number, and
    /// text otherwise.
    pub fn from_csv<R: io::Read>(reader: R) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let columns: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let mut raw: Vec<Vec<String>> = Vec::new();
        for result in reader.records() {
            let record = result?;
            raw.push(record.iter().map(String::from).collect());
        }

        let kinds: Vec<ColumnKind> = (0..columns.len())
            .map(|c| ColumnKind::infer(raw.iter().filter_map(|r| r.get(c))))
            .collect();

        let rows = raw
            .into_iter()
            .map(|record| {
                record
                    .iter()
                    .zip(&kinds)
                    .map(|(cell, kind)| kind.parse(cell))
                    .collect()
            })
            .collect();

        Dataset::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn row(&self, i: usize) -> &[Value] {
        &self.rows[i]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Returns the position of column `name`.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::unknown_attribute(name, "the dataset"))
    }

    /// Row permutation of a stable sort by the given columns.
    ///
    /// Ties keep their original row order.
    pub fn stable_order(&self, columns: &[usize]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by(|&a, &b| {
            let (ra, rb) = (&self.rows[a], &self.rows[b]);
            columns
                .iter()
                .map(|&c| ra[c].cmp(&rb[c]))
                .find(|o| *o != std::cmp::Ordering::Equal)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }

    /// Counts the occurrences of each value of `column` over the whole
    /// dataset, keyed by string form. Missing values are not counted.
    pub fn value_counts(&self, column: usize) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for row in &self.rows {
            let value = &row[column];
            if !value.is_missing() {
                *counts.entry(value.to_string()).or_insert(0) += 1;
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnKind {
    Integer,
    Float,
    Text,
}

impl ColumnKind {
    fn infer<'a, I: Iterator<Item = &'a String>>(cells: I) -> ColumnKind {
        let mut kind = ColumnKind::Integer;
        for cell in cells.filter(|c| !is_missing(c)) {
            if kind == ColumnKind::Integer && cell.parse::<i64>().is_err() {
                kind = ColumnKind::Float;
            }
            if kind == ColumnKind::Float && !parses_finite(cell) {
                return ColumnKind::Text;
            }
        }
        kind
    }

    fn parse(self, cell: &str) -> Value {
        if is_missing(cell) {
            return Value::Missing;
        }
        match self {
            // Both parses were checked during inference.
            ColumnKind::Integer => cell
                .parse::<i64>()
                .map(Value::Integer)
                .unwrap_or_else(|_| Value::from(cell)),
            ColumnKind::Float => cell
                .parse::<f64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::from(cell)),
            ColumnKind::Text => Value::from(cell),
        }
    }
}

fn is_missing(cell: &str) -> bool {
    MISSING.contains(&cell)
}

fn parses_finite(cell: &str) -> bool {
    cell.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}
