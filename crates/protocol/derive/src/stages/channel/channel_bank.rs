//! This module contains the `ChannelBank` struct.

use super::NextFrameProvider;
use crate::{
    errors::{PipelineError, PipelineErrorKind},
    metrics::Metrics,
    traits::{OriginAdvancer, OriginProvider, SignalReceiver},
    types::{PipelineResult, Signal},
};
use alloc::{boxed::Box, collections::VecDeque, sync::Arc};
use alloy_primitives::{Bytes, map::HashMap};
use async_trait::async_trait;
use core::fmt::Debug;
use loam_genesis::RollupConfig;
use loam_protocol::{BlockInfo, Channel, ChannelId, Frame};

/// The maximum size of a channel bank.
pub const MAX_CHANNEL_BANK_SIZE: usize = 100_000_000;

/// [`ChannelBank`] is a stateful stage that does the following:
/// 1. Unmarshalls frames from L1 transaction data
/// 2. Applies those frames to a channel
/// 3. Attempts to read from the channel when it is ready
/// 4. Prunes channels (not frames) when the channel bank is too large.
///
/// Several channels may be in flight at once, but only the oldest one is ever read. The bank is
/// pruned after every ingested frame, so it never exceeds [`MAX_CHANNEL_BANK_SIZE`] between
/// two ingests.
#[derive(Debug)]
pub struct ChannelBank<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Debug,
{
    /// The rollup configuration.
    pub cfg: Arc<RollupConfig>,
    /// Map of channels by ID.
    pub channels: HashMap<ChannelId, Channel>,
    /// Channels in FIFO order.
    pub channel_queue: VecDeque<ChannelId>,
    /// The previous stage of the derivation pipeline.
    pub prev: P,
}

impl<P> ChannelBank<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Debug,
{
    /// Create a new [`ChannelBank`] stage.
    pub fn new(cfg: Arc<RollupConfig>, prev: P) -> Self {
        Self { cfg, channels: HashMap::default(), channel_queue: VecDeque::new(), prev }
    }

    /// Returns the size of the channel bank by accumulating over all channels.
    pub fn size(&self) -> usize {
        self.channels.iter().fold(0, |acc, (_, c)| acc + c.size())
    }

    /// Prunes the Channel bank, until it is below [`MAX_CHANNEL_BANK_SIZE`].
    /// Prunes from the high-priority channel since it failed to be read.
    pub fn prune(&mut self) -> PipelineResult<()> {
        let mut total_size = self.size();
        while total_size > MAX_CHANNEL_BANK_SIZE {
            let id =
                self.channel_queue.pop_front().ok_or(PipelineError::ChannelProviderEmpty.crit())?;
            let channel = self.channels.remove(&id).ok_or(PipelineError::ChannelNotFound.crit())?;
            total_size -= channel.size();
            debug!(target: "channel-bank", "Pruned channel {:?} of size {}", id, channel.size());
            loam_macros::inc!(counter, Metrics::CHANNELS_DROPPED, "reason" => "pruned");
        }
        loam_macros::set!(gauge, Metrics::CHANNEL_BANK_SIZE, total_size as f64);
        Ok(())
    }

    /// Adds new L1 data to the channel bank. Should only be called after all data has been read.
    pub fn ingest_frame(&mut self, frame: Frame) -> PipelineResult<()> {
        let origin = self.origin().ok_or(PipelineError::MissingOrigin.crit())?;

        // Get the channel for the frame, or create a new one if it doesn't exist.
        if !self.channels.contains_key(&frame.id) {
            self.channel_queue.push_back(frame.id);
        }
        let current_channel =
            self.channels.entry(frame.id).or_insert_with(|| Channel::new(frame.id, origin));

        // Check if the channel is not timed out. If it has, ignore the frame.
        if current_channel.is_timed_out(origin.number, self.cfg.channel_timeout(origin.timestamp))
        {
            warn!(target: "channel-bank", "Channel {:?} timed out", frame.id);
            return Ok(());
        }

        // Ingest the frame. If it fails, ignore the frame.
        let frame_id = frame.id;
        if let Err(e) = current_channel.add_frame(frame, origin) {
            warn!(target: "channel-bank", "Failed to add frame to channel {:?}: {}", frame_id, e);
            return Ok(());
        }

        self.prune()
    }

    /// Read the raw data of the first channel, if it's timed-out or closed.
    ///
    /// Returns an error if there is nothing new to read. A timed-out head channel is dropped
    /// and yields `Ok(None)`.
    pub fn read(&mut self) -> PipelineResult<Option<Bytes>> {
        // Bail if there are no channels to read from.
        let Some(first) = self.channel_queue.front().copied() else {
            trace!(target: "channel-bank", "No channels to read from");
            return Err(PipelineError::Eof.temp());
        };

        // Return an `Ok(None)` if the first channel is timed out. There may be more timed
        // out channels at the head of the queue and we want to remove them all.
        let origin = self.origin().ok_or(PipelineError::MissingOrigin.crit())?;
        let channel = self.channels.get(&first).ok_or(PipelineError::ChannelNotFound.crit())?;
        if channel.is_timed_out(origin.number, self.cfg.channel_timeout(origin.timestamp)) {
            warn!(target: "channel-bank", "Channel {:?} timed out", first);
            self.channels.remove(&first);
            self.channel_queue.pop_front();
            loam_macros::inc!(counter, Metrics::CHANNELS_DROPPED, "reason" => "timeout");
            return Ok(None);
        }

        // Only the head of the queue may be read.
        if !channel.is_ready() {
            return Err(PipelineError::Eof.temp());
        }

        let frame_data = channel.frame_data();
        self.channels.remove(&first);
        self.channel_queue.pop_front();
        loam_macros::inc!(counter, Metrics::CHANNELS_READ);
        Ok(frame_data)
    }

    /// Returns the next channel's data, pulling one frame from the previous stage when no
    /// channel is ready.
    pub async fn next_data(&mut self) -> PipelineResult<Option<Bytes>> {
        match self.read() {
            Err(PipelineErrorKind::Temporary(PipelineError::Eof)) => {}
            data => return data,
        }

        // Load the data into the channel bank
        let frame = self.prev.next_frame().await?;
        self.ingest_frame(frame)?;
        Err(PipelineError::NotEnoughData.temp())
    }
}

#[async_trait]
impl<P> OriginAdvancer for ChannelBank<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Send + Debug,
{
    async fn advance_origin(&mut self) -> PipelineResult<()> {
        self.prev.advance_origin().await
    }
}

impl<P> OriginProvider for ChannelBank<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Debug,
{
    fn origin(&self) -> Option<BlockInfo> {
        self.prev.origin()
    }
}

#[async_trait]
impl<P> SignalReceiver for ChannelBank<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Send + Debug,
{
    async fn signal(&mut self, signal: Signal) -> PipelineResult<()> {
        self.prev.signal(signal).await?;
        if matches!(signal, Signal::Reset(_)) {
            self.channels.clear();
            self.channel_queue = VecDeque::with_capacity(10);
            loam_macros::set!(gauge, Metrics::CHANNEL_BANK_SIZE, 0);
        }
        Ok(())
    }
}
