//! This module contains the [`ChannelAssembler`] stage.

use super::NextFrameProvider;
use crate::{
    errors::PipelineError,
    metrics::Metrics,
    traits::{OriginAdvancer, OriginProvider, SignalReceiver},
    types::{PipelineResult, Signal},
};
use alloc::{boxed::Box, sync::Arc};
use alloy_primitives::{Bytes, hex};
use async_trait::async_trait;
use core::fmt::Debug;
use loam_genesis::RollupConfig;
use loam_protocol::{BlockInfo, Channel};

/// The [`ChannelAssembler`] stage is responsible for assembling the [`Frame`]s from the frame
/// queue into a raw compressed [`Channel`].
///
/// Only one channel is assembled at a time, and its frames must arrive in order. A frame
/// numbered `0` always opens a new channel, dropping whatever was being assembled.
///
/// [`Frame`]: loam_protocol::Frame
#[derive(Debug)]
pub struct ChannelAssembler<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Debug,
{
    /// The rollup configuration.
    pub cfg: Arc<RollupConfig>,
    /// The previous stage of the derivation pipeline.
    pub prev: P,
    /// The current [`Channel`] being assembled.
    pub channel: Option<Channel>,
}

impl<P> ChannelAssembler<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Debug,
{
    /// Creates a new [`ChannelAssembler`] stage with the given configuration and previous stage.
    pub const fn new(cfg: Arc<RollupConfig>, prev: P) -> Self {
        Self { cfg, prev, channel: None }
    }

    /// Returns whether or not the channel currently being assembled has timed out.
    pub fn is_timed_out(&self) -> PipelineResult<bool> {
        let origin = self.origin().ok_or(PipelineError::MissingOrigin.crit())?;
        Ok(self.channel.as_ref().is_some_and(|c| {
            c.is_timed_out(origin.number, self.cfg.channel_timeout(origin.timestamp))
        }))
    }

    /// Drops the channel currently being assembled, if any.
    pub fn flush(&mut self) {
        if let Some(channel) = self.channel.take() {
            debug!(
                target: "channel-assembler",
                "Flushing channel {} with {} frames",
                hex::encode(channel.id()),
                channel.len()
            );
        }
    }

    /// Pulls one frame from the previous stage and returns the channel's data once the frame
    /// completes it.
    pub async fn next_data(&mut self) -> PipelineResult<Option<Bytes>> {
        let origin = self.origin().ok_or(PipelineError::MissingOrigin.crit())?;

        // Time out the channel if it has timed out.
        if self.is_timed_out()? {
            warn!(
                target: "channel-assembler",
                "Channel timed out at L1 block #{}, dropping {} frames",
                origin.number,
                self.channel.as_ref().map(|c| c.len()).unwrap_or_default()
            );
            self.channel = None;
            loam_macros::inc!(counter, Metrics::CHANNELS_DROPPED, "reason" => "timeout");
        }

        // Grab the next frame from the previous stage.
        let next_frame = self.prev.next_frame().await?;

        // Start a new channel if the frame number is 0.
        if next_frame.number == 0 {
            if let Some(channel) = self.channel.as_ref() {
                warn!(
                    target: "channel-assembler",
                    "Replacing incomplete channel {} with {}",
                    hex::encode(channel.id()),
                    hex::encode(next_frame.id)
                );
                loam_macros::inc!(counter, Metrics::CHANNELS_DROPPED, "reason" => "replaced");
            }
            self.channel = Some(Channel::new(next_frame.id, origin));
        }

        let Some(channel) = self.channel.as_mut() else {
            warn!(
                target: "channel-assembler",
                "Dropping frame #{} of channel {}: no channel is open",
                next_frame.number,
                hex::encode(next_frame.id)
            );
            return Err(PipelineError::NotEnoughData.temp());
        };

        // Frames must arrive in order.
        if next_frame.id == channel.id() && usize::from(next_frame.number) != channel.len() {
            warn!(
                target: "channel-assembler",
                "Dropping out of order frame #{}, expected #{}",
                next_frame.number,
                channel.len()
            );
            return Err(PipelineError::NotEnoughData.temp());
        }

        // Add the frame to the channel. If this fails, return NotEnoughData and discard the frame.
        let frame_number = next_frame.number;
        if let Err(e) = channel.add_frame(next_frame, origin) {
            warn!(
                target: "channel-assembler",
                "Failed to add frame #{} to channel {}: {}",
                frame_number,
                hex::encode(channel.id()),
                e
            );
            return Err(PipelineError::NotEnoughData.temp());
        }

        // If the channel size exceeds the maximum RLP bytes per channel, drop the channel.
        let max_rlp_bytes_per_channel = self.cfg.max_rlp_bytes_per_channel(origin.timestamp);
        if channel.size() as u64 > max_rlp_bytes_per_channel {
            warn!(
                target: "channel-assembler",
                "Compressed channel size exceeded max RLP bytes per channel, dropping channel {} with {} bytes",
                hex::encode(channel.id()),
                channel.size()
            );
            self.channel = None;
            loam_macros::inc!(counter, Metrics::CHANNELS_DROPPED, "reason" => "too_large");
            return Err(PipelineError::NotEnoughData.temp());
        }

        // If the channel is ready, forward the channel to the next stage.
        if channel.is_ready() {
            let channel_bytes =
                channel.frame_data().ok_or(PipelineError::ChannelNotFound.crit())?;

            info!(
                target: "channel-assembler",
                "Channel {} ready ({} frames, {} bytes)",
                hex::encode(channel.id()),
                channel.len(),
                channel_bytes.len()
            );

            self.channel = None;
            loam_macros::inc!(counter, Metrics::CHANNELS_READ);
            return Ok(Some(channel_bytes));
        }

        Err(PipelineError::NotEnoughData.temp())
    }
}

#[async_trait]
impl<P> OriginAdvancer for ChannelAssembler<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Send + Debug,
{
    async fn advance_origin(&mut self) -> PipelineResult<()> {
        self.prev.advance_origin().await
    }
}

impl<P> OriginProvider for ChannelAssembler<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Debug,
{
    fn origin(&self) -> Option<BlockInfo> {
        self.prev.origin()
    }
}

#[async_trait]
impl<P> SignalReceiver for ChannelAssembler<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Send + Debug,
{
    async fn signal(&mut self, signal: Signal) -> PipelineResult<()> {
        self.prev.signal(signal).await?;
        self.flush();
        Ok(())
    }
}
