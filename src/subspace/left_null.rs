use super::null::kernel;
use super::{Basis, Decomposition, Extract};
use crate::error::InternalError;

/// Solutions of `Aᵀ·y = 0`, a subspace of `Q^rows`.
///
/// The transpose is reduced on its own and its kernel read off the same way
/// as for [`NullSpace`](super::NullSpace).
#[derive(Debug, Clone, Copy, Default)]
pub struct LeftNullSpace;

impl Extract<Basis> for LeftNullSpace {
    fn extract(&self, input: &Decomposition<'_>) -> Result<Basis, InternalError> {
        let transposed = input.matrix.transpose().rref()?;
        Ok(kernel(&transposed))
    }
}
