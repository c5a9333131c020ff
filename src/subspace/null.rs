use num_traits::{One, Zero};

use super::{Basis, Decomposition, Extract};
use crate::error::InternalError;
use crate::math::Rational;
use crate::reduce::Rref;

/// Solutions of `A·x = 0`, a subspace of `Q^cols`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSpace;

impl Extract<Basis> for NullSpace {
    fn extract(&self, input: &Decomposition<'_>) -> Result<Basis, InternalError> {
        Ok(kernel(input.rref))
    }
}

/// Kernel basis read straight off an RREF.
///
/// One vector per free column `f`, in increasing order of `f`: the free
/// variable `x_f` is 1, every other free variable is 0, and the pivot variable
/// of row `i` is `-R[i][f]`.
pub(super) fn kernel(rref: &Rref) -> Basis {
    let reduced = rref.matrix();
    let n = reduced.ncols();

    let vectors = rref
        .free_columns()
        .map(|free| {
            let mut x = vec![Rational::zero(); n];
            x[free] = Rational::one();
            for (i, &p) in rref.pivots().iter().enumerate() {
                x[p] = -&reduced[(i, free)];
            }
            x
        })
        .collect();

    Basis::new(vectors, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Matrix;

    fn null_space(a: &Matrix) -> Basis {
        let rref = a.rref().unwrap();
        NullSpace.extract(&Decomposition::new(a, &rref)).unwrap()
    }

    #[test]
    fn singular_two_by_two() {
        let a = Matrix::from_integers(&[[1, 2], [2, 4]]).unwrap();
        assert_eq!(null_space(&a).vectors(), &[vec![Rational::from(-2), Rational::from(1)]]);
    }

    #[test]
    fn zero_matrix_gives_standard_basis() {
        let basis = null_space(&Matrix::zeros(3, 3));
        assert_eq!(basis.vectors(), Matrix::identity(3).rows());
    }

    #[test]
    fn full_column_rank_is_trivial() {
        assert!(null_space(&Matrix::identity(4)).is_trivial());
        let tall = Matrix::from_integers(&[[1, 2], [3, 4], [5, 6]]).unwrap();
        assert!(null_space(&tall).is_trivial());
    }

    #[test]
    fn free_columns_in_order() {
        // x0 + 2x2 + x3 = 0, x1 + x2 + 2x3 = 0
        let a = Matrix::from_integers(&[[1, 0, 2, 1], [0, 1, 1, 2], [0, 0, 0, 0]]).unwrap();
        let basis = null_space(&a);
        let expected = Matrix::from_integers(&[[-2, -1, 1, 0], [-1, -2, 0, 1]]).unwrap();
        assert_eq!(basis.vectors(), expected.rows());
    }
}
