#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

#[macro_use]
extern crate tracing;

mod attributes;
#[cfg(feature = "std")]
pub use attributes::SystemClock;
pub use attributes::{
    BuildMode, FixedClock, MAX_TIMESTAMP_LAG, StatefulAttributesBuilder, WallClock,
};

mod errors;
pub use errors::{BuilderError, PipelineError, PipelineErrorKind, ResetError};

mod stages;
pub use stages::{
    ActiveStage, ChannelAssembler, ChannelBank, ChannelProvider, MAX_CHANNEL_BANK_SIZE,
    NextFrameProvider,
};

mod traits;
pub use traits::{
    AttributesBuilder, ChainProvider, L2ChainProvider, OriginAdvancer, OriginProvider,
    SignalReceiver,
};

mod types;
pub use types::{ActivationSignal, PipelineResult, ResetSignal, Signal};

mod metrics;
pub use metrics::Metrics;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
