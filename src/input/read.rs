use std::path::Path;

use csv::{ReaderBuilder, Trim};
use thiserror::Error;

use super::{Entry, MatrixInput};

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV file contains no data records")]
    EmptyFile,
}

impl MatrixInput {
    /// Read a matrix from a headerless CSV file, one matrix row per record.
    ///
    /// Cells are kept as text and go through the same parser as string
    /// entries, so `1/3` and `0.25` are read exactly. Ragged records are not
    /// a CSV error here: the shape check reports them as `NonRectangular`.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ReadError> {
        let rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)?;
        Self::from_csv_reader(rdr)
    }

    /// Same as [`MatrixInput::read`], from any reader.
    pub fn read_from<R: std::io::Read>(reader: R) -> Result<Self, ReadError> {
        let rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);
        Self::from_csv_reader(rdr)
    }

    fn from_csv_reader<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Self, ReadError> {
        let mut matrix = Vec::new();
        for record in rdr.records() {
            let record = record?;
            matrix.push(record.iter().map(Entry::from).collect());
        }

        if matrix.is_empty() {
            return Err(ReadError::EmptyFile);
        }

        Ok(Self { matrix })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Rational;
    use crate::error::ValidationError;

    #[test]
    fn reads_exact_cells() {
        let input = MatrixInput::read_from("1, 1/3\n0.25 ,-2\n".as_bytes()).unwrap();
        let m = input.parse().unwrap();
        assert_eq!(m.shape(), (2, 2));
        assert_eq!(m[(0, 1)], Rational::new(1, 3).unwrap());
        assert_eq!(m[(1, 0)], Rational::new(1, 4).unwrap());
    }

    #[test]
    fn ragged_records_reach_the_parser() {
        let input = MatrixInput::read_from("1,2\n3\n".as_bytes()).unwrap();
        assert!(matches!(input.parse(), Err(ValidationError::NonRectangular { row: 1, .. })));
    }

    #[test]
    fn empty_file() {
        assert!(matches!(MatrixInput::read_from("".as_bytes()), Err(ReadError::EmptyFile)));
    }

    #[test]
    fn missing_file() {
        assert!(MatrixInput::read("/definitely/not/here.csv").is_err());
    }
}
