use super::{Basis, Decomposition, Extract};
use crate::error::InternalError;

/// Span of the rows of `A`, a subspace of `Q^cols`.
///
/// Row operations do not change the row space, so the nonzero rows of the
/// RREF (its first `rank` rows) form a basis.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowSpace;

impl Extract<Basis> for RowSpace {
    fn extract(&self, input: &Decomposition<'_>) -> Result<Basis, InternalError> {
        let reduced = input.rref.matrix();
        let vectors = reduced.rows()[..input.rank()].to_vec();
        Ok(Basis::new(vectors, reduced.ncols()))
    }
}
