//! This module contains all of the traits describing functionality of portions of the derivation
//! pipeline.

mod providers;
pub use providers::{ChainProvider, L2ChainProvider};

mod attributes;
pub use attributes::AttributesBuilder;

mod stages;
pub use stages::{OriginAdvancer, OriginProvider, SignalReceiver};
