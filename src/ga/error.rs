//! Errors raised before the evolutionary loop starts.

use thiserror::Error;

/// Reasons a GA run cannot start.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaError {
    /// A configuration parameter is out of range.
    #[error("invalid GA configuration: {0}")]
    InvalidConfig(String),

    /// The problem offers no gene values to sample from.
    #[error("problem has no alleles to sample genes from")]
    EmptyAlleles,

    /// The problem declares zero-length chromosomes.
    #[error("problem declares an empty chromosome")]
    EmptyChromosome,
}
