//! Error types for building payload attributes.

use loam_genesis::ForkName;
use loam_hardforks::HardforkError;
use thiserror::Error;

/// An [`AttributesBuilder`] Error.
///
/// [`AttributesBuilder`]: crate::traits::AttributesBuilder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// The network upgrade transactions for a fork could not be constructed.
    #[error("Failed to build {0} upgrade transactions: {1}")]
    UpgradeTxs(ForkName, HardforkError),
    /// The parent block timestamp overflowed when adding the block time.
    #[error("Next block timestamp overflows for parent at {0}")]
    TimestampOverflow(u64),
}
