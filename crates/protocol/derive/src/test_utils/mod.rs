//! Test utilities for the derivation stages and the chain provider traits.

mod chain_providers;
pub use chain_providers::{TestChainProvider, TestL2ChainProvider, TestProviderError};

mod frames;
pub use frames::TestNextFrameProvider;

mod traces;
pub use traces::{CollectingLayer, TraceStorage};
