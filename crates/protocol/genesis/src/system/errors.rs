//! Contains error types for system config updates.

use alloy_primitives::B256;
use derive_more::From;

use crate::SystemConfigUpdateKind;

/// An error for processing a [`crate::SystemConfig`] update log.
#[derive(Debug, From, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum SystemConfigUpdateError {
    /// The log itself is not a well-formed config update.
    #[error("Log processing error: {0}")]
    LogProcessing(LogProcessingError),
    /// The update payload could not be decoded.
    #[error("Invalid {kind:?} update: {source}")]
    #[from(ignore)]
    Data {
        /// The kind of update that failed to decode.
        kind: SystemConfigUpdateKind,
        /// What was wrong with its data.
        #[source]
        source: UpdateDataError,
    },
}

impl SystemConfigUpdateError {
    /// Wraps a payload decoding error for an update of the given kind.
    pub const fn data(kind: SystemConfigUpdateKind, source: UpdateDataError) -> Self {
        Self::Data { kind, source }
    }
}

/// An error occurred while processing the update log.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum LogProcessingError {
    /// Received an incorrect number of log topics.
    #[error("Invalid config update log: invalid topic length: {0}")]
    InvalidTopicLen(usize),
    /// The log topic is invalid.
    #[error("Invalid config update log: invalid topic")]
    InvalidTopic,
    /// The config update log version is unsupported.
    #[error("Invalid config update log: unsupported version: {0}")]
    UnsupportedVersion(B256),
    /// Failed to decode the update type from the config update log.
    #[error("Failed to decode config update log: update type")]
    UpdateTypeDecodingError,
    /// An invalid system config update type.
    #[error("Invalid system config update type: {0}")]
    InvalidSystemConfigUpdateType(u64),
}

/// The ABI-encoded `bytes` payload of a config update is malformed.
///
/// Every update shares the `(pointer, length, payload)` layout; the variants follow that
/// layout from the outside in.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDataError {
    /// The log data has the wrong total length.
    #[error("invalid data length: expected {expected}, got {actual}")]
    InvalidDataLen {
        /// The required length.
        expected: usize,
        /// The observed length.
        actual: usize,
    },
    /// Failed to decode the data pointer word.
    #[error("failed to decode data pointer")]
    PointerDecodingError,
    /// The data pointer is not 32.
    #[error("invalid data pointer: {0}")]
    InvalidDataPointer(u64),
    /// Failed to decode the payload length word.
    #[error("failed to decode data length")]
    LengthDecodingError,
    /// The payload length word does not match the update kind.
    #[error("invalid payload length: {0}")]
    InvalidDataLength(u64),
    /// A payload field could not be decoded.
    #[error("failed to decode {0}")]
    FieldDecodingError(&'static str),
}
