use super::{Basis, Decomposition, Extract};
use crate::error::InternalError;

/// Span of the columns of `A`, a subspace of `Q^rows`.
///
/// The basis is taken from the *original* matrix: the columns of `A` sitting
/// at the pivot indices of its RREF are linearly independent and span the
/// column space. Vectors come out in pivot order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnSpace;

impl Extract<Basis> for ColumnSpace {
    fn extract(&self, input: &Decomposition<'_>) -> Result<Basis, InternalError> {
        let vectors = input
            .rref
            .pivots()
            .iter()
            .map(|&p| input.matrix.column(p))
            .collect();
        Ok(Basis::new(vectors, input.matrix.nrows()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Matrix, Rational};

    #[test]
    fn pivot_columns_of_the_original() {
        let a = Matrix::from_integers(&[[1, 2, 3], [2, 4, 7]]).unwrap();
        let rref = a.rref().unwrap();
        assert_eq!(rref.pivots(), &[0, 2]);
        let basis = ColumnSpace.extract(&Decomposition::new(&a, &rref)).unwrap();
        assert_eq!(basis.vectors(), &[a.column(0), a.column(2)]);
        assert_eq!(basis.ambient(), 2);
    }

    #[test]
    fn singular_two_by_two() {
        let a = Matrix::from_integers(&[[1, 2], [2, 4]]).unwrap();
        let rref = a.rref().unwrap();
        let basis = ColumnSpace.extract(&Decomposition::new(&a, &rref)).unwrap();
        assert_eq!(basis.vectors(), &[vec![Rational::from(1), Rational::from(2)]]);
    }
}
