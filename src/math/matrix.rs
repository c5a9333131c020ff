use std::ops::Index;

use num_traits::Zero;

use super::Rational;

/// Dense row-major matrix of exact rationals.
///
/// Rows always share one length; the constructors refuse ragged input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Matrix {
    rows: Vec<Vec<Rational>>,
    cols: usize,
}

impl Matrix {
    /// Builds a matrix from its rows, or `None` if the rows are ragged.
    ///
    /// An empty `rows` gives the `0 × 0` matrix.
    pub fn from_rows(rows: Vec<Vec<Rational>>) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return None;
        }
        Some(Self { rows, cols })
    }

    /// Convenience constructor from integer rows.
    pub fn from_integers<R: AsRef<[i64]>>(rows: &[R]) -> Option<Self> {
        Self::from_rows(
            rows.iter()
                .map(|row| row.as_ref().iter().map(|&x| Rational::from(x)).collect())
                .collect(),
        )
    }

    /// All-zero `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![vec![Rational::zero(); cols]; rows],
            cols,
        }
    }

    /// `n × n` identity.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.rows[i][i] = Rational::from(1);
        }
        m
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.cols)
    }

    /// Row `r`, left to right.
    pub fn row(&self, r: usize) -> &[Rational] {
        &self.rows[r]
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> &[Vec<Rational>] {
        &self.rows
    }

    /// Copy of column `c`, top to bottom.
    pub fn column(&self, c: usize) -> Vec<Rational> {
        self.rows.iter().map(|row| row[c].clone()).collect()
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let rows = (0..self.cols).map(|c| self.column(c)).collect();
        Self {
            rows,
            cols: self.nrows(),
        }
    }

    /// `true` when every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.rows.iter().flatten().all(Zero::is_zero)
    }

    /// `A · x`; `None` when `x.len() != ncols`.
    pub fn mul_vec(&self, x: &[Rational]) -> Option<Vec<Rational>> {
        if x.len() != self.cols {
            return None;
        }
        Some(
            self.rows
                .iter()
                .map(|row| {
                    row.iter()
                        .zip(x)
                        .fold(Rational::zero(), |acc, (a, b)| acc + a * b)
                })
                .collect(),
        )
    }

    // Row operations used by the reducer. They keep the shape invariant.

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        self.rows.swap(a, b);
    }

    /// Divides row `r` by `pivot`, which must be nonzero.
    pub(crate) fn scale_row(&mut self, r: usize, pivot: &Rational) {
        for x in &mut self.rows[r] {
            *x = &*x / pivot;
        }
    }

    /// `row[target] -= factor * row[source]` over columns `from..`.
    pub(crate) fn sub_scaled_row(&mut self, target: usize, source: usize, factor: &Rational, from: usize) {
        for c in from..self.cols {
            let delta = factor * &self.rows[source][c];
            let entry = &mut self.rows[target][c];
            *entry = &*entry - &delta;
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = Rational;

    fn index(&self, (r, c): (usize, usize)) -> &Rational {
        &self.rows[r][c]
    }
}
