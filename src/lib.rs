//! Exact computation of the four fundamental subspaces of a matrix of at
//! most 5×5 entries.
//!
//! ```
//! use spaces::{Entry, Spaces};
//!
//! let spaces = Spaces::default();
//! let rows = vec![vec![Entry::from(1), Entry::from(2)], vec![Entry::from(2), Entry::from(4)]];
//! let served = spaces.compute(&rows).unwrap();
//! assert_eq!(served.result.rank, 1);
//! assert_eq!(served.result.null_space.dimension, 1);
//! assert!(spaces.compute(&rows).unwrap().cached);
//! ```
#![allow(missing_docs)]

mod math;
mod error;

mod input;
mod reduce;
mod subspace;
mod result;
mod cache;
mod display;
mod service;

pub mod config;
pub mod telemetry;

pub use math::*;
pub use crate::error::*;
pub use crate::input::{parse, Entry, MatrixInput, ReadError, MAX_DIMENSION};
pub use crate::reduce::Rref;
pub use crate::subspace::*;
pub use crate::result::*;
pub use crate::cache::{CacheStats, ComputationCache, Fingerprint};
pub use crate::display::Latex;
pub use crate::service::{catalog, Example, Health, Served, Spaces};
pub use crate::config::{ConfigError, Settings};
