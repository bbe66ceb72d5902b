//! Stages pertaining to the reading of channels.
//!
//! Sitting after the frame queue, the [`ChannelBank`] and [`ChannelAssembler`] stages collect
//! [Frame]s into [Channel]s. The [`ChannelProvider`] owns exactly one of them at a time and
//! swaps between them across the Holocene boundary.
//!
//! [Frame]: loam_protocol::Frame
//! [Channel]: loam_protocol::Channel

use crate::types::PipelineResult;
use alloc::boxed::Box;
use async_trait::async_trait;
use loam_protocol::Frame;

mod channel_provider;
pub use channel_provider::{ActiveStage, ChannelProvider};

mod channel_bank;
pub use channel_bank::{ChannelBank, MAX_CHANNEL_BANK_SIZE};

mod channel_assembler;
pub use channel_assembler::ChannelAssembler;

/// Provides frames for the [`ChannelBank`] and [`ChannelAssembler`] stages.
#[async_trait]
pub trait NextFrameProvider {
    /// Retrieves the next [`Frame`] from the frame queue.
    async fn next_frame(&mut self) -> PipelineResult<Frame>;
}
