//! Derivation pipeline stages.

mod channel;
pub use channel::{
    ActiveStage, ChannelAssembler, ChannelBank, ChannelProvider, MAX_CHANNEL_BANK_SIZE,
    NextFrameProvider,
};
