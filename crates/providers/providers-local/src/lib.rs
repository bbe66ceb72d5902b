#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod buffer;
pub use buffer::{
    BufferedBlock, CacheStats, CachedL2Block, ChainBufferError, ChainStateBuffer, ChainStateEvent,
};

mod buffered;
pub use buffered::{BufferedL1Provider, BufferedL2Provider, BufferedProviderError};

mod metrics;
pub use metrics::Metrics;
