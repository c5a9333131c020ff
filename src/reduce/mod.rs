//! Gauss–Jordan elimination to reduced row-echelon form.
//!
//! # Pivot policy
//! Columns are scanned left to right; in each one the *first* row at or below
//! the cursor with a nonzero entry becomes the pivot row. Arithmetic is exact,
//! so there is nothing to gain from partial pivoting on magnitude, and the
//! first-nonzero rule keeps the output a pure function of the input.
//!
//! # Cost
//! `O(rows² · cols)` rational operations. Every operation reduces its result
//! by the gcd, which keeps entry growth in check.

use num_traits::{One, Zero};
use tracing::debug;

use crate::error::InternalError;
use crate::math::Matrix;

/// Reduced row-echelon form of a matrix together with its pivot columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rref {
    matrix: Matrix,
    pivots: Vec<usize>,
}

impl Rref {
    /// The reduced matrix; same shape as the input.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Pivot column indices, strictly increasing.
    pub fn pivots(&self) -> &[usize] {
        &self.pivots
    }

    /// Number of pivots.
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// `true` when column `col` holds a pivot.
    pub fn is_pivot(&self, col: usize) -> bool {
        self.pivots.binary_search(&col).is_ok()
    }

    /// Non-pivot columns in increasing order.
    pub fn free_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.matrix.ncols()).filter(|&c| !self.is_pivot(c))
    }

    /// Checks the shape every RREF must have.
    ///
    /// - pivots strictly increase and there are at most `rows` of them;
    /// - row `i` starts with zeros followed by a 1 at `pivots[i]`;
    /// - every pivot column is zero outside its pivot row;
    /// - rows from `rank` on are entirely zero.
    pub fn verify(&self) -> Result<(), InternalError> {
        let (rows, cols) = self.matrix.shape();
        let bad = |msg: String| Err(InternalError::MalformedPivots(msg));

        if self.rank() > rows.min(cols) {
            return bad(format!("{} pivots in a {rows}×{cols} matrix", self.rank()));
        }
        if let Some(w) = self.pivots.windows(2).find(|w| w[0] >= w[1]) {
            return bad(format!("pivot columns {} and {} out of order", w[0], w[1]));
        }

        for (i, &p) in self.pivots.iter().enumerate() {
            if p >= cols {
                return bad(format!("pivot column {p} outside {cols} columns"));
            }
            if let Some(c) = (0..p).find(|&c| !self.matrix[(i, c)].is_zero()) {
                return bad(format!("row {i} has a nonzero entry in column {c} before its pivot {p}"));
            }
            if !self.matrix[(i, p)].is_one() {
                return bad(format!("pivot at ({i}, {p}) is {} rather than 1", self.matrix[(i, p)]));
            }
            if let Some(r) = (0..rows).find(|&r| r != i && !self.matrix[(r, p)].is_zero()) {
                return bad(format!("pivot column {p} has a nonzero entry in row {r}"));
            }
        }

        if let Some(r) = (self.rank()..rows).find(|&r| self.matrix.row(r).iter().any(|x| !x.is_zero())) {
            return bad(format!("row {r} below the last pivot is not zero"));
        }

        Ok(())
    }
}

impl Matrix {
    /// Reduced row-echelon form by Gauss–Jordan elimination.
    ///
    /// The result is verified before it is returned; an [`InternalError`]
    /// means the elimination itself went wrong, never that the input was bad.
    pub fn rref(&self) -> Result<Rref, InternalError> {
        let mut work = self.clone();
        let (rows, cols) = work.shape();
        let mut pivots = Vec::with_capacity(rows.min(cols));
        let mut cursor = 0;

        for col in 0..cols {
            if cursor >= rows {
                break;
            }

            let Some(found) = (cursor..rows).find(|&r| !work[(r, col)].is_zero()) else {
                continue;
            };

            work.swap_rows(cursor, found);
            let pivot = work[(cursor, col)].clone();
            work.scale_row(cursor, &pivot);

            for r in 0..rows {
                if r == cursor || work[(r, col)].is_zero() {
                    continue;
                }
                let factor = work[(r, col)].clone();
                work.sub_scaled_row(r, cursor, &factor, col);
            }

            pivots.push(col);
            cursor += 1;
        }

        debug!(rows, cols, rank = pivots.len(), ?pivots, "row reduction finished");

        let rref = Rref { matrix: work, pivots };
        rref.verify()?;
        Ok(rref)
    }

    /// Number of pivots in the RREF.
    pub fn rank(&self) -> Result<usize, InternalError> {
        self.rref().map(|r| r.rank())
    }
}
