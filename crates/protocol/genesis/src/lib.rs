#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod updates;
pub use updates::{
    BatcherUpdate, Eip1559Update, GasConfigUpdate, GasLimitUpdate, OperatorFeeUpdate,
    UnsafeBlockSignerUpdate,
};

mod system;
pub use system::{
    CONFIG_UPDATE_EVENT_VERSION_0, CONFIG_UPDATE_TOPIC, LogProcessingError, SystemConfig,
    SystemConfigLog, SystemConfigUpdate, SystemConfigUpdateError, SystemConfigUpdateKind,
    UpdateDataError,
};

mod hardfork;
pub use hardfork::{ForkName, HardForkConfig};

mod genesis;
pub use genesis::ChainGenesis;

mod rollup;
pub use rollup::{
    FJORD_MAX_SEQUENCER_DRIFT, ForkOrderError, GRANITE_CHANNEL_TIMEOUT,
    MAX_RLP_BYTES_PER_CHANNEL_BEDROCK, MAX_RLP_BYTES_PER_CHANNEL_FJORD, RollupConfig,
};
