//! Errors raised while building upgrade transactions.

/// An error constructing a network upgrade transaction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HardforkError {
    /// An embedded contract creation code is not valid hex.
    #[error("Invalid {0} bytecode: {1}")]
    InvalidBytecode(&'static str, alloy_primitives::hex::FromHexError),
    /// The creation code of a predeploy implementation was not supplied.
    #[error("Missing {0} creation code")]
    MissingBytecode(&'static str),
}
