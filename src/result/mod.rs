//! Result assembler.
//!
//! [`ComputationResult::compute`] runs the whole engine on a parsed matrix and
//! packages everything a caller sees: the matrix, its RREF, the rank, the four
//! bases with their LaTeX renderings, and the rank–nullity cross-check.

use serde::{Serialize, Serializer};
use serde::ser::SerializeSeq;

use crate::display::Latex;
use crate::error::InternalError;
use crate::math::{Matrix, Rational};
use crate::subspace::{Basis, ColumnSpace, Decomposition, Extract, LeftNullSpace, NullSpace, RowSpace};

/// Everything computed for one matrix. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputationResult {
    pub matrix: MatrixSummary,
    pub rank: usize,
    pub rref: RrefSummary,
    pub column_space: SpaceResult,
    pub row_space: SpaceResult,
    pub null_space: SpaceResult,
    pub left_null_space: SpaceResult,
    pub dimension_check: DimensionCheck,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixSummary {
    #[serde(serialize_with = "rows_of")]
    pub data: Matrix,
    pub rows: usize,
    pub cols: usize,
    pub latex: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RrefSummary {
    #[serde(rename = "matrix", serialize_with = "rows_of")]
    pub reduced: Matrix,
    pub latex: String,
    pub pivots: Vec<usize>,
}

/// One subspace as shipped to callers.
///
/// `basis` serializes each vector as a column, `[[a], [b], ...]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpaceResult {
    #[serde(serialize_with = "columns_of")]
    pub basis: Basis,
    pub latex: Vec<String>,
    pub dimension: usize,
    pub description: String,
}

impl SpaceResult {
    fn new(basis: Basis) -> Self {
        Self {
            latex: basis.vectors().iter().map(|v| v.as_slice().latex()).collect(),
            dimension: basis.dimension(),
            description: basis.description(),
            basis,
        }
    }
}

/// Rank–nullity statements and whether every dimension agrees with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionCheck {
    pub rank_plus_nullity: String,
    pub rank_plus_left_nullity: String,
    pub valid: bool,
}

impl DimensionCheck {
    /// `valid` holds iff `dim C(A) = dim C(Aᵀ) = rank`, `dim N(A) = n - rank`
    /// and `dim N(Aᵀ) = m - rank`.
    pub fn new(rows: usize, cols: usize, rank: usize, dims: [usize; 4]) -> Self {
        let [column, row, null, left_null] = dims;
        let valid = rank <= rows.min(cols)
            && column == rank
            && row == rank
            && null == cols - rank
            && left_null == rows - rank;

        // Statements are only meaningful for a sane rank; otherwise report raw numbers.
        let nullity = cols.saturating_sub(rank);
        let left_nullity = rows.saturating_sub(rank);
        Self {
            rank_plus_nullity: format!("{rank} + {nullity} = {cols} (columns)"),
            rank_plus_left_nullity: format!("{rank} + {left_nullity} = {rows} (rows)"),
            valid,
        }
    }
}

impl ComputationResult {
    /// Reduce `matrix`, extract the four subspaces and assemble the result.
    ///
    /// The returned result may carry `valid == false`; see
    /// [`ComputationResult::ensure_valid`].
    pub fn compute(matrix: &Matrix) -> Result<Self, InternalError> {
        let rref = matrix.rref()?;
        let input = Decomposition::new(matrix, &rref);
        let (column, row, null, left_null) =
            (ColumnSpace, RowSpace, NullSpace, LeftNullSpace).extract(&input)?;

        let (rows, cols) = matrix.shape();
        let rank = rref.rank();
        let dimension_check = DimensionCheck::new(
            rows,
            cols,
            rank,
            [column.dimension(), row.dimension(), null.dimension(), left_null.dimension()],
        );

        Ok(Self {
            matrix: MatrixSummary {
                latex: matrix.latex(),
                data: matrix.clone(),
                rows,
                cols,
            },
            rank,
            rref: RrefSummary {
                latex: rref.matrix().latex(),
                pivots: rref.pivots().to_vec(),
                reduced: rref.matrix().clone(),
            },
            column_space: SpaceResult::new(column),
            row_space: SpaceResult::new(row),
            null_space: SpaceResult::new(null),
            left_null_space: SpaceResult::new(left_null),
            dimension_check,
        })
    }

    /// Escalates a failed rank–nullity cross-check to an [`InternalError`].
    pub fn ensure_valid(self) -> Result<Self, InternalError> {
        if self.dimension_check.valid {
            Ok(self)
        } else {
            Err(InternalError::DimensionMismatch(format!(
                "rank {} of a {}×{} matrix with subspace dimensions col={} row={} null={} left_null={}",
                self.rank,
                self.matrix.rows,
                self.matrix.cols,
                self.column_space.dimension,
                self.row_space.dimension,
                self.null_space.dimension,
                self.left_null_space.dimension,
            )))
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.matrix.rows, self.matrix.cols)
    }
}

fn rows_of<S: Serializer>(matrix: &Matrix, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(matrix.rows())
}

fn columns_of<S: Serializer>(basis: &Basis, serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(basis.dimension()))?;
    for v in basis.vectors() {
        let column: Vec<[&Rational; 1]> = v.iter().map(|x| [x]).collect();
        seq.serialize_element(&column)?;
    }
    seq.end()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{parse, Entry};
    use itertools::Itertools;
    use serde_json::json;

    fn compute(rows: &[&[i64]]) -> ComputationResult {
        let a = Matrix::from_integers(rows).unwrap();
        ComputationResult::compute(&a).unwrap().ensure_valid().unwrap()
    }

    #[test]
    fn identity_three_by_three() {
        let r = compute(&[&[1, 0, 0], &[0, 1, 0], &[0, 0, 1]]);
        assert_eq!(r.rank, 3);
        assert_eq!(r.null_space.dimension, 0);
        assert_eq!(r.column_space.dimension, 3);
        assert_eq!(r.column_space.basis.vectors(), Matrix::identity(3).rows());
        assert_eq!(r.column_space.description, "Subspace of R^3");
        assert!(r.dimension_check.valid);
    }

    #[test]
    fn zero_three_by_three() {
        let r = compute(&[&[0, 0, 0], &[0, 0, 0], &[0, 0, 0]]);
        assert_eq!(r.rank, 0);
        assert_eq!(r.null_space.basis.vectors(), Matrix::identity(3).rows());
        assert!(r.column_space.basis.is_trivial());
        assert!(r.row_space.latex.is_empty());
        assert_eq!(r.left_null_space.dimension, 3);
    }

    #[test]
    fn singular_two_by_two() {
        let r = compute(&[&[1, 2], &[2, 4]]);
        assert_eq!(r.rank, 1);
        assert_eq!(r.null_space.basis.vectors(), &[vec![Rational::from(-2), Rational::from(1)]]);
        assert_eq!(r.column_space.basis.vectors(), &[vec![Rational::from(1), Rational::from(2)]]);
        assert_eq!(r.dimension_check.rank_plus_nullity, "1 + 1 = 2 (columns)");
    }

    #[test]
    fn rectangular_two_by_three() {
        let r = compute(&[&[1, 2, 3], &[4, 5, 6]]);
        assert_eq!(r.rank, 2);
        assert_eq!(r.null_space.dimension, 1);
        assert_eq!(r.row_space.dimension, 2);
        assert_eq!(r.left_null_space.dimension, 0);
        assert_eq!(r.dimension_check.rank_plus_left_nullity, "2 + 0 = 2 (rows)");
    }

    #[test]
    fn column_space_is_original_pivot_columns() {
        let a = Matrix::from_integers(&[[0, 2, 4, 1], [0, 1, 2, 0], [0, 3, 6, 5]]).unwrap();
        let r = ComputationResult::compute(&a).unwrap();
        assert_eq!(r.rref.pivots, vec![1, 3]);
        let expected = r.rref.pivots.iter().map(|&p| a.column(p)).collect_vec();
        assert_eq!(r.column_space.basis.vectors(), expected.as_slice());
    }

    #[test]
    fn dimension_check_flags_inconsistency() {
        let check = DimensionCheck::new(2, 3, 2, [2, 2, 0, 0]);
        assert!(!check.valid);
        assert!(DimensionCheck::new(2, 3, 2, [2, 2, 1, 0]).valid);
        assert!(!DimensionCheck::new(2, 3, 4, [4, 4, 0, 0]).valid);
    }

    #[test]
    fn ensure_valid_escalates() {
        let mut r = compute(&[&[1, 2], &[3, 4]]);
        r.dimension_check.valid = false;
        assert!(matches!(r.ensure_valid(), Err(InternalError::DimensionMismatch(_))));
    }

    #[test]
    fn half_survives_the_round_trip() {
        let a = parse(&[vec![Entry::Float(0.5), Entry::Int(1)]]).unwrap();
        let r = ComputationResult::compute(&a).unwrap();
        assert_eq!(r.matrix.data[(0, 0)], Rational::new(1, 2).unwrap());
        assert_eq!(r.matrix.latex, r"\left[\begin{matrix}\frac{1}{2} & 1\end{matrix}\right]");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["matrix"]["data"], json!([["1/2", "1"]]));
    }

    #[test]
    fn json_shape() {
        let r = compute(&[&[1, 2], &[2, 4]]);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["rank"], json!(1));
        assert_eq!(json["matrix"]["rows"], json!(2));
        assert_eq!(json["rref"]["matrix"], json!([["1", "2"], ["0", "0"]]));
        assert_eq!(json["rref"]["pivots"], json!([0]));
        assert_eq!(json["null_space"]["basis"], json!([[["-2"], ["1"]]]));
        assert_eq!(json["null_space"]["latex"], json!([r"\left[\begin{matrix}-2\\1\end{matrix}\right]"]));
        assert_eq!(json["column_space"]["description"], json!("Subspace of R^2"));
        assert_eq!(json["dimension_check"]["valid"], json!(true));
    }
}
