//! Error types for the derivation pipeline.
//!
//! Every failure is wrapped in a [`PipelineErrorKind`], whose variant tells the caller how to
//! react: retry, halt, or reset.

mod attributes;
pub use attributes::BuilderError;

mod pipeline;
pub use pipeline::{PipelineError, PipelineErrorKind, ResetError};
