#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

//! ## Module Organization
//!
//! - **Sync**: [`find_l2_heads`] and the pure [`classify_forkchoice`] recovery check
//! - **State**: [`EngineSyncState`] tracking the unsafe, safe and finalized heads
//! - **Metrics**: block label gauges and sync start outcomes

#[macro_use]
extern crate tracing;

mod sync;
pub use sync::{
    ForkchoiceOutcome, L2ForkchoiceState, MAX_REORG_SEQ_WINDOWS, SyncConfig, SyncStartError,
    classify_forkchoice, find_l2_heads,
};

mod state;
pub use state::{EngineSyncState, EngineSyncStateUpdate};

mod metrics;
pub use metrics::Metrics;
