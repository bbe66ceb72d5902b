//! Contains error types specific to the L1 block info transaction.

/// An error decoding an L1 block info transaction.
#[derive(Debug, Eq, PartialEq, Clone, thiserror::Error)]
pub enum DecodeError {
    /// Missing selector bytes.
    #[error("The provided calldata is too short, missing the 4 selector bytes")]
    MissingSelector,
    /// Invalid selector for the L1 info transaction.
    #[error("Invalid L1 info transaction selector")]
    InvalidSelector,
    /// Invalid length for the L1 info bedrock transaction.
    /// Arguments are the expected length and the actual length.
    #[error("Invalid bedrock data length. Expected {0}, got {1}")]
    InvalidBedrockLength(usize, usize),
    /// Invalid length for the L1 info ecotone transaction.
    /// Arguments are the expected length and the actual length.
    #[error("Invalid ecotone data length. Expected {0}, got {1}")]
    InvalidEcotoneLength(usize, usize),
    /// Invalid length for the L1 info isthmus transaction.
    /// Arguments are the expected length and the actual length.
    #[error("Invalid isthmus data length. Expected {0}, got {1}")]
    InvalidIsthmusLength(usize, usize),
}
