#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod runtime;
pub use runtime::{
    L1StorageProvider, PROTOCOL_VERSION_RECOMMENDED_SLOT, PROTOCOL_VERSION_REQUIRED_SLOT,
    RuntimeConfig, RuntimeLoadError, RuntimeLoader, RuntimeSnapshot,
    UNSAFE_BLOCK_SIGNER_ADDRESS_SLOT,
};

mod metrics;
pub use metrics::Metrics;
