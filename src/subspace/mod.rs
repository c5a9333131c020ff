//! The four fundamental subspaces.
//!
//! Each subspace is a unit extractor ([`ColumnSpace`], [`RowSpace`],
//! [`NullSpace`], [`LeftNullSpace`]) implementing [`Extract`]. Extractors
//! compose: a tuple of extractors is itself an extractor returning a tuple of
//! bases, so all four come out of one call:
//!
//! ```
//! use spaces::{ColumnSpace, Decomposition, Extract, LeftNullSpace, Matrix, NullSpace, RowSpace};
//!
//! let a = Matrix::from_integers(&[[1, 2], [2, 4]]).unwrap();
//! let rref = a.rref().unwrap();
//! let input = Decomposition::new(&a, &rref);
//! let (col, row, null, left) = (ColumnSpace, RowSpace, NullSpace, LeftNullSpace)
//!     .extract(&input)
//!     .unwrap();
//! assert_eq!(col.dimension() + null.dimension(), 2);
//! assert_eq!(row.dimension() + left.dimension(), 2);
//! ```

mod column;
mod left_null;
mod null;
mod row;

pub use column::ColumnSpace;
pub use left_null::LeftNullSpace;
pub use null::NullSpace;
pub use row::RowSpace;

use crate::error::InternalError;
use crate::math::{Matrix, Rational};
use crate::reduce::Rref;

/// Ordered basis of a subspace of `Q^ambient`.
///
/// Vectors are linearly independent by construction; this is not re-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    vectors: Vec<Vec<Rational>>,
    ambient: usize,
}

impl Basis {
    /// Panics in debug builds if a vector's length is not `ambient`.
    pub fn new(vectors: Vec<Vec<Rational>>, ambient: usize) -> Self {
        debug_assert!(vectors.iter().all(|v| v.len() == ambient), "basis vector outside Q^{ambient}");
        Self { vectors, ambient }
    }

    /// Basis vectors in extraction order.
    pub fn vectors(&self) -> &[Vec<Rational>] {
        &self.vectors
    }

    /// Number of basis vectors.
    pub fn dimension(&self) -> usize {
        self.vectors.len()
    }

    /// Length of every basis vector.
    pub fn ambient(&self) -> usize {
        self.ambient
    }

    /// `true` for the zero subspace.
    pub fn is_trivial(&self) -> bool {
        self.vectors.is_empty()
    }

    /// `"Subspace of R^n"`.
    pub fn description(&self) -> String {
        format!("Subspace of R^{}", self.ambient)
    }
}

/// A matrix and its reduced form, the input every extractor reads.
#[derive(Debug, Clone, Copy)]
pub struct Decomposition<'a> {
    pub matrix: &'a Matrix,
    pub rref: &'a Rref,
}

impl<'a> Decomposition<'a> {
    pub fn new(matrix: &'a Matrix, rref: &'a Rref) -> Self {
        Self { matrix, rref }
    }

    pub fn rank(&self) -> usize {
        self.rref.rank()
    }
}

/// Derives something (usually a [`Basis`]) from a [`Decomposition`].
pub trait Extract<T> {
    fn extract(&self, input: &Decomposition<'_>) -> Result<T, InternalError>;
}

// ===== 2-tuple =====
impl<T1, T2, S1, S2> Extract<(T1, T2)> for (S1, S2)
where
    S1: Extract<T1>,
    S2: Extract<T2>,
{
    #[inline]
    fn extract(&self, input: &Decomposition<'_>) -> Result<(T1, T2), InternalError> {
        Ok((self.0.extract(input)?, self.1.extract(input)?))
    }
}

// ===== 3-tuple =====
impl<T1, T2, T3, S1, S2, S3> Extract<(T1, T2, T3)> for (S1, S2, S3)
where
    S1: Extract<T1>,
    S2: Extract<T2>,
    S3: Extract<T3>,
{
    #[inline]
    fn extract(&self, input: &Decomposition<'_>) -> Result<(T1, T2, T3), InternalError> {
        Ok((
            self.0.extract(input)?,
            self.1.extract(input)?,
            self.2.extract(input)?,
        ))
    }
}

// ===== 4-tuple =====
impl<T1, T2, T3, T4, S1, S2, S3, S4> Extract<(T1, T2, T3, T4)> for (S1, S2, S3, S4)
where
    S1: Extract<T1>,
    S2: Extract<T2>,
    S3: Extract<T3>,
    S4: Extract<T4>,
{
    #[inline]
    fn extract(&self, input: &Decomposition<'_>) -> Result<(T1, T2, T3, T4), InternalError> {
        Ok((
            self.0.extract(input)?,
            self.1.extract(input)?,
            self.2.extract(input)?,
            self.3.extract(input)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;
    use num_traits::Zero;

    fn all_four(a: &Matrix) -> (Basis, Basis, Basis, Basis) {
        let rref = a.rref().unwrap();
        (ColumnSpace, RowSpace, NullSpace, LeftNullSpace)
            .extract(&Decomposition::new(a, &rref))
            .unwrap()
    }

    #[test]
    fn description_names_the_ambient_space() {
        let b = Basis::new(vec![], 4);
        assert!(b.is_trivial());
        assert_eq!(b.description(), "Subspace of R^4");
    }

    #[test]
    fn random_matrices_satisfy_rank_nullity() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
        for _ in 0..300 {
            let (m, n) = (rng.gen_range(1..=5), rng.gen_range(1..=5));
            // Small entries with plenty of zeros give rank-deficient matrices often.
            let data = (0..m)
                .map(|_| (0..n).map(|_| rng.gen_range(-2..=2) * rng.gen_range(0..=1)).collect_vec())
                .collect_vec();
            let a = Matrix::from_integers(&data).unwrap();
            let (col, row, null, left) = all_four(&a);
            let rank = a.rank().unwrap();

            assert_eq!(col.dimension(), rank);
            assert_eq!(row.dimension(), rank);
            assert_eq!(rank + null.dimension(), n, "{data:?}");
            assert_eq!(rank + left.dimension(), m, "{data:?}");
            assert_eq!((col.ambient(), row.ambient(), null.ambient(), left.ambient()), (m, n, n, m));

            for x in null.vectors() {
                assert!(a.mul_vec(x).unwrap().iter().all(Zero::is_zero), "A·x ≠ 0 for {data:?}");
            }
            let at = a.transpose();
            for y in left.vectors() {
                assert!(at.mul_vec(y).unwrap().iter().all(Zero::is_zero), "Aᵀ·y ≠ 0 for {data:?}");
            }
        }
    }
}
