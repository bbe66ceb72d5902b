#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod block;
pub use block::{BlockInfo, FromBlockError, L2BlockInfo};

mod info;
pub use info::{
    DecodeError, L1BlockInfoBedrock, L1BlockInfoEcotone, L1BlockInfoIsthmus, L1BlockInfoTx,
};

mod utils;
pub use utils::{OpBlockConversionError, to_system_config};

mod frame;
pub use frame::{
    DERIVATION_VERSION_0, FRAME_OVERHEAD, Frame, FrameDecodingError, FrameParseError,
    MAX_FRAME_LEN,
};

mod channel;
pub use channel::{CHANNEL_ID_LENGTH, Channel, ChannelError, ChannelId};

mod predeploys;
pub use predeploys::{Predeploys, SystemAddresses};

mod protocol_version;
pub use protocol_version::{ProtocolVersion, ProtocolVersionError, ProtocolVersionFormatV0};

mod sync;
pub use sync::SyncStatus;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
