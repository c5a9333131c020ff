//! Matrix parser: heterogeneous numeric input to an exact [`Matrix`].

mod read;

pub use read::ReadError;

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{Axis, ValidationError};
use crate::math::{Matrix, ParseRationalError, Rational};

/// Largest accepted number of rows and of columns.
pub const MAX_DIMENSION: usize = 5;

/// One matrix entry as it arrives from a request payload.
///
/// JSON integers land in [`Entry::Int`], or in [`Entry::Wide`] when they do
/// not fit an `i64`; other JSON numbers land in [`Entry::Float`] and strings
/// in [`Entry::Text`]. [`MatrixInput::from_json`] keeps integers of any
/// width exact. A plain `serde_json` deserialization only sees integers up
/// to `u64::MAX` as integers; wider ones reach [`Entry`] as floats.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entry {
    Int(i64),
    /// Decimal text of an integer outside the `i64` range.
    Wide(String),
    Float(f64),
    Text(String),
}

impl Entry {
    /// Exact conversion, one rule per kind.
    pub fn to_rational(&self) -> Result<Rational, ParseRationalError> {
        match self {
            Entry::Int(i) => Ok(Rational::from(*i)),
            Entry::Wide(digits) | Entry::Text(digits) => digits.parse(),
            Entry::Float(x) => Rational::from_f64(*x),
        }
    }

    /// Entry from one JSON value's source text.
    ///
    /// Integer literals are classified from their digits, so
    /// `18446744073709551617` stays exact instead of passing through `f64`.
    pub fn from_json_literal(text: &str) -> Result<Self, serde_json::Error> {
        let text = text.trim();
        let integer = text.strip_prefix('-').unwrap_or(text);
        if !integer.is_empty() && integer.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(text
                .parse()
                .map_or_else(|_| Entry::Wide(text.to_string()), Entry::Int));
        }
        serde_json::from_str(text)
    }
}

struct EntryVisitor;

impl<'de> Visitor<'de> for EntryVisitor {
    type Value = Entry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Entry, E> {
        Ok(Entry::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Entry, E> {
        Ok(i64::try_from(v).map_or_else(|_| Entry::Wide(v.to_string()), Entry::Int))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Entry, E> {
        Ok(i64::try_from(v).map_or_else(|_| Entry::Wide(v.to_string()), Entry::Int))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Entry, E> {
        Ok(i64::try_from(v).map_or_else(|_| Entry::Wide(v.to_string()), Entry::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Entry, E> {
        Ok(Entry::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Entry, E> {
        Ok(Entry::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Entry, E> {
        Ok(Entry::Text(v))
    }
}

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntryVisitor)
    }
}

impl From<i64> for Entry {
    fn from(value: i64) -> Self {
        Entry::Int(value)
    }
}

impl From<f64> for Entry {
    fn from(value: f64) -> Self {
        Entry::Float(value)
    }
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Entry::Text(value.to_string())
    }
}

impl From<String> for Entry {
    fn from(value: String) -> Self {
        Entry::Text(value)
    }
}

/// Request body: `{"matrix": [[...], ...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatrixInput {
    pub matrix: Vec<Vec<Entry>>,
}

impl MatrixInput {
    pub fn new(matrix: Vec<Vec<Entry>>) -> Self {
        Self { matrix }
    }

    /// Accepts either a full request body or a bare `[[...]]` array.
    ///
    /// Entries are read from their source text through
    /// [`Entry::from_json_literal`], so wide integers stay exact.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        type RawRows = Vec<Vec<Box<RawValue>>>;

        #[derive(Deserialize)]
        struct Wrapped {
            matrix: RawRows,
        }

        let raw: RawRows = if text.trim_start().starts_with('[') {
            serde_json::from_str(text)?
        } else {
            serde_json::from_str::<Wrapped>(text)?.matrix
        };

        let matrix = raw
            .iter()
            .map(|row| {
                row.iter()
                    .map(|v| Entry::from_json_literal(v.get()))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { matrix })
    }

    /// Validates and converts, see [`parse`].
    pub fn parse(&self) -> Result<Matrix, ValidationError> {
        parse(&self.matrix)
    }
}

/// Validates the shape of `rows` and converts every entry to a [`Rational`].
///
/// Checks run in a fixed order: empty outer list, too many rows, empty first
/// row, too many columns, ragged rows, then the entries row by row. The first
/// failure wins.
pub fn parse<R: AsRef<[Entry]>>(rows: &[R]) -> Result<Matrix, ValidationError> {
    let m = rows.len();
    if m == 0 {
        return Err(ValidationError::EmptyMatrix);
    }
    if m > MAX_DIMENSION {
        return Err(ValidationError::DimensionExceeded {
            axis: Axis::Rows,
            found: m,
        });
    }

    let n = rows[0].as_ref().len();
    if n == 0 {
        return Err(ValidationError::ZeroColumns);
    }
    if n > MAX_DIMENSION {
        return Err(ValidationError::DimensionExceeded {
            axis: Axis::Columns,
            found: n,
        });
    }

    if let Some((row, found)) = rows
        .iter()
        .map(|r| r.as_ref().len())
        .enumerate()
        .find(|&(_, len)| len != n)
    {
        return Err(ValidationError::NonRectangular {
            row,
            expected: n,
            found,
        });
    }

    let parsed = rows
        .iter()
        .enumerate()
        .map(|(row, entries)| {
            entries
                .as_ref()
                .iter()
                .enumerate()
                .map(|(col, entry)| {
                    entry.to_rational().map_err(|e| ValidationError::InvalidEntry {
                        row,
                        col,
                        reason: e.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Rectangularity was checked above.
    Matrix::from_rows(parsed).ok_or(ValidationError::NonRectangular {
        row: 0,
        expected: n,
        found: 0,
    })
}
