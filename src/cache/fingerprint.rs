use std::fmt::{self, Display, Formatter};

use sha2::{Digest, Sha256};

use crate::math::Matrix;

/// Bump when the byte layout below changes.
const CANONICAL_VERSION: u8 = 1;

/// SHA-256 of a matrix's canonical bytes, hex encoded.
///
/// Two inputs that parse to the same rationals share a fingerprint, so
/// `[[0.5]]` and `[["1/2"]]` hit the same cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(matrix: &Matrix) -> Self {
        let bytes = canonical_bytes(matrix);
        Self(hex::encode(Sha256::digest(&bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 8 hex digits, for log lines.
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// version, rows, cols, then every entry row-major as a length-prefixed
/// `p/q` string in lowest terms.
fn canonical_bytes(matrix: &Matrix) -> Vec<u8> {
    let (rows, cols) = matrix.shape();
    let mut buf = Vec::with_capacity(9 + rows * cols * 8);
    buf.push(CANONICAL_VERSION);
    encode_u32(&mut buf, rows as u32);
    encode_u32(&mut buf, cols as u32);
    for row in matrix.rows() {
        for x in row {
            encode_string(&mut buf, &format!("{}/{}", x.numer(), x.denom()));
        }
    }
    buf
}

#[inline]
fn encode_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

#[inline]
fn encode_string(buf: &mut Vec<u8>, value: &str) {
    encode_u32(buf, value.len() as u32);
    buf.extend_from_slice(value.as_bytes());
}
