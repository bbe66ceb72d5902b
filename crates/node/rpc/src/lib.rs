#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

mod admin;
pub use admin::{AdminRpc, SequencerAdminQuery, SequencerAdminQuerySender};

mod jsonrpsee;
pub use jsonrpsee::{AdminApiServer, RollupNodeApiServer};

#[cfg(feature = "client")]
pub use jsonrpsee::{AdminApiClient, RollupNodeApiClient};

mod response;
pub use response::BlockRefWithStatus;

mod rollup;
pub use rollup::{EngineQueries, EngineQuerySender, RollupRpc};

mod l1_watcher;
pub use l1_watcher::{L1State, L1WatcherQueries, L1WatcherQuerySender};

mod metrics;
pub use metrics::Metrics;
