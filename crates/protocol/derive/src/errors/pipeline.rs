//! This module contains derivation errors thrown within the pipeline.

use crate::BuilderError;
use alloc::string::String;
use thiserror::Error;

/// A top-level severity filter for [`PipelineError`] that categorizes errors by handling strategy.
///
/// ```text
/// Temporary -> Retry operation, may succeed with more data
/// Critical  -> Stop derivation, external intervention required
/// Reset     -> Reset pipeline state, continue with clean slate
/// ```
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PipelineErrorKind {
    /// A temporary error that may resolve with additional data or time.
    ///
    /// Every failed fetch across a provider boundary lands here.
    #[error("Temporary error: {0}")]
    Temporary(#[source] PipelineError),
    /// A critical error that requires external intervention to resolve.
    #[error("Critical error: {0}")]
    Critical(#[source] PipelineError),
    /// A reset error that requires pipeline state reset but allows continued operation.
    #[error("Pipeline reset: {0}")]
    Reset(#[from] ResetError),
}

/// An error encountered during derivation pipeline processing.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PipelineError {
    /// End of file: no more data available from the channel bank.
    #[error("EOF")]
    Eof,
    /// Insufficient data available to complete the current processing stage.
    #[error("Not enough data")]
    NotEnoughData,
    /// No channels are available in the [`ChannelProvider`].
    ///
    /// [`ChannelProvider`]: crate::ChannelProvider
    #[error("The channel provider is empty")]
    ChannelProviderEmpty,
    /// Failed to locate a queued channel in the [`ChannelBank`].
    ///
    /// [`ChannelBank`]: crate::ChannelBank
    #[error("Channel not found in channel provider")]
    ChannelNotFound,
    /// Required L1 origin information is missing from the previous pipeline stage.
    #[error("Missing L1 origin from previous stage")]
    MissingOrigin,
    /// Block attributes construction failed.
    #[error("Attributes builder error: {0}")]
    AttributesBuilder(#[from] BuilderError),
    /// External provider communication or operation failed.
    ///
    /// The message names the fetch that failed.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl PipelineError {
    /// Wraps this [`PipelineError`] as a [PipelineErrorKind::Critical].
    pub const fn crit(self) -> PipelineErrorKind {
        PipelineErrorKind::Critical(self)
    }

    /// Wraps this [`PipelineError`] as a [PipelineErrorKind::Temporary].
    pub const fn temp(self) -> PipelineErrorKind {
        PipelineErrorKind::Temporary(self)
    }
}

impl PipelineErrorKind {
    /// Returns `true` if the error may resolve by retrying.
    pub const fn is_temporary(&self) -> bool {
        matches!(self, Self::Temporary(_))
    }

    /// Returns `true` if the error requires external intervention.
    pub const fn is_critical(&self) -> bool {
        matches!(self, Self::Critical(_))
    }
}

/// A reset error
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum ResetError {
    /// The L1 origin crossed Holocene activation while the pre-Holocene stage is active.
    ///
    /// The driver answers with an [`ActivationSignal`].
    ///
    /// [`ActivationSignal`]: crate::ActivationSignal
    #[error("Holocene activation reset")]
    HoloceneActivation,
    /// The L1 origin moved back before Holocene activation while the Holocene stage is active.
    /// The argument is the timestamp of the new origin.
    #[error("L1 origin at timestamp {0} reorged before Holocene activation")]
    ReorgedBeforeHolocene(u64),
}

impl ResetError {
    /// Wrap [`ResetError`] as a [PipelineErrorKind::Reset].
    pub const fn reset(self) -> PipelineErrorKind {
        PipelineErrorKind::Reset(self)
    }
}
