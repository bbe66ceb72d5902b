//! This module contains the [`ChannelProvider`] stage.

use super::{ChannelAssembler, ChannelBank, NextFrameProvider};
use crate::{
    errors::{PipelineError, ResetError},
    metrics::Metrics,
    traits::{OriginAdvancer, OriginProvider, SignalReceiver},
    types::{PipelineResult, ResetSignal, Signal},
};
use alloc::{boxed::Box, sync::Arc};
use alloy_primitives::Bytes;
use async_trait::async_trait;
use core::fmt::Debug;
use loam_genesis::{ForkName, RollupConfig};
use loam_protocol::BlockInfo;

/// The channel stage owned by a [`ChannelProvider`].
#[derive(Debug)]
pub enum ActiveStage<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Debug,
{
    /// The pre-Holocene buffering stage.
    Bank(ChannelBank<P>),
    /// The Holocene strict-ordered stage.
    Assembler(ChannelAssembler<P>),
}

impl<P> ActiveStage<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Send + Debug,
{
    /// Builds the stage that handles frames at the given L1 timestamp.
    fn for_timestamp(cfg: &Arc<RollupConfig>, timestamp: u64, prev: P) -> Self {
        if cfg.is_holocene_active(timestamp) {
            Self::Assembler(ChannelAssembler::new(Arc::clone(cfg), prev))
        } else {
            Self::Bank(ChannelBank::new(Arc::clone(cfg), prev))
        }
    }

    /// Returns `true` if this is the Holocene stage.
    pub const fn is_assembler(&self) -> bool {
        matches!(self, Self::Assembler(_))
    }

    /// Returns a short name of the stage, for logs and metric labels.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bank(_) => "bank",
            Self::Assembler(_) => "assembler",
        }
    }

    /// Returns the previous stage, dropping any buffered channel state.
    fn into_prev(self) -> P {
        match self {
            Self::Bank(bank) => bank.prev,
            Self::Assembler(assembler) => assembler.prev,
        }
    }

    fn origin(&self) -> Option<BlockInfo> {
        match self {
            Self::Bank(bank) => bank.origin(),
            Self::Assembler(assembler) => assembler.origin(),
        }
    }

    async fn next_data(&mut self) -> PipelineResult<Option<Bytes>> {
        match self {
            Self::Bank(bank) => bank.next_data().await,
            Self::Assembler(assembler) => assembler.next_data().await,
        }
    }

    async fn advance_origin(&mut self) -> PipelineResult<()> {
        match self {
            Self::Bank(bank) => bank.advance_origin().await,
            Self::Assembler(assembler) => assembler.advance_origin().await,
        }
    }

    async fn signal(&mut self, signal: Signal) -> PipelineResult<()> {
        match self {
            Self::Bank(bank) => bank.signal(signal).await,
            Self::Assembler(assembler) => assembler.signal(signal).await,
        }
    }
}

/// The [`ChannelProvider`] stage is a mux between the [`ChannelBank`] and [`ChannelAssembler`]
/// stages.
///
/// Rules:
/// When Holocene is not active, the [`ChannelBank`] is used.
/// When Holocene is active, the [`ChannelAssembler`] is used.
///
/// The active stage only changes on a reset, which selects by the reset origin, or on the
/// Holocene [`ActivationSignal`]. Reading data never swaps stages on its own: an origin on the
/// wrong side of the fork surfaces as a reset error for the driver to act on.
///
/// [`ActivationSignal`]: crate::ActivationSignal
#[derive(Debug)]
pub struct ChannelProvider<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Debug,
{
    /// The rollup configuration.
    pub cfg: Arc<RollupConfig>,
    /// The previous stage of the derivation pipeline.
    ///
    /// If this is set to [`None`], the active stage owns the previous stage.
    ///
    /// Must be [`None`] if `stage` is [`Some`].
    pub prev: Option<P>,
    /// The active channel stage.
    ///
    /// Must be [`None`] if `prev` is [`Some`].
    pub stage: Option<ActiveStage<P>>,
}

impl<P> ChannelProvider<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Send + Debug,
{
    /// Creates a new [`ChannelProvider`] with the given configuration and previous stage.
    pub const fn new(cfg: Arc<RollupConfig>, prev: P) -> Self {
        Self { cfg, prev: Some(prev), stage: None }
    }

    /// Takes the previous stage out of the mux, tearing down the active stage if there is one.
    fn take_prev(&mut self) -> PipelineResult<P> {
        self.prev
            .take()
            .or_else(|| self.stage.take().map(ActiveStage::into_prev))
            .ok_or(PipelineError::ChannelProviderEmpty.crit())
    }

    /// Installs a new stage built around the previous stage.
    fn install(&mut self, stage: ActiveStage<P>) {
        info!(target: "channel-provider", "Activating channel {}", stage.name());
        loam_macros::inc!(counter, Metrics::CHANNEL_STAGE_TRANSITIONS, "stage" => stage.name());
        self.stage = Some(stage);
    }

    /// Selects the stage for the reset origin and resets it.
    ///
    /// A fresh stage is only built when the active one is of the wrong kind for the origin.
    pub async fn reset(&mut self, signal: ResetSignal) -> PipelineResult<()> {
        let holocene = self.cfg.is_holocene_active(signal.l1_origin.timestamp);
        let keep = self.stage.as_ref().is_some_and(|stage| stage.is_assembler() == holocene);
        if !keep {
            let prev = self.take_prev()?;
            let stage = ActiveStage::for_timestamp(&self.cfg, signal.l1_origin.timestamp, prev);
            self.install(stage);
        }

        debug!(
            target: "channel-provider",
            "Resetting channel stage to L1 origin #{}",
            signal.l1_origin.number
        );
        self.forward(signal.signal()).await
    }

    /// Applies a network upgrade to the mux.
    ///
    /// Holocene swaps the [`ChannelBank`] for a fresh [`ChannelAssembler`]. Every other fork
    /// leaves the stage untouched.
    ///
    /// # Panics
    ///
    /// Panics if the [`ChannelAssembler`] is already active, since Holocene activates once.
    pub fn transform(&mut self, fork: ForkName) -> PipelineResult<()> {
        if fork != ForkName::Holocene {
            trace!(target: "channel-provider", "Ignoring {} activation", fork);
            return Ok(());
        }
        if self.stage.as_ref().is_some_and(ActiveStage::is_assembler) {
            panic!("Holocene activation replayed: the channel assembler is already active");
        }

        let prev = self.take_prev()?;
        self.install(ActiveStage::Assembler(ChannelAssembler::new(Arc::clone(&self.cfg), prev)));
        Ok(())
    }

    /// Returns the next fully assembled channel's compressed bytes.
    pub async fn next_data(&mut self) -> PipelineResult<Option<Bytes>> {
        let origin = self.origin().ok_or(PipelineError::MissingOrigin.crit())?;
        let holocene = self.cfg.is_holocene_active(origin.timestamp);

        if self.stage.is_none() {
            let prev = self.take_prev()?;
            self.install(ActiveStage::for_timestamp(&self.cfg, origin.timestamp, prev));
        }
        let Some(stage) = self.stage.as_mut() else {
            return Err(PipelineError::ChannelProviderEmpty.crit());
        };

        match (stage.is_assembler(), holocene) {
            (false, true) => {
                warn!(
                    target: "channel-provider",
                    "L1 origin #{} is past Holocene activation, awaiting activation signal",
                    origin.number
                );
                Err(ResetError::HoloceneActivation.reset())
            }
            (true, false) => {
                warn!(
                    target: "channel-provider",
                    "L1 origin #{} is before Holocene activation",
                    origin.number
                );
                Err(ResetError::ReorgedBeforeHolocene(origin.timestamp).reset())
            }
            _ => stage.next_data().await,
        }
    }

    async fn forward(&mut self, signal: Signal) -> PipelineResult<()> {
        match (self.stage.as_mut(), self.prev.as_mut()) {
            (Some(stage), _) => stage.signal(signal).await,
            (None, Some(prev)) => prev.signal(signal).await,
            (None, None) => Err(PipelineError::ChannelProviderEmpty.crit()),
        }
    }
}

#[async_trait]
impl<P> OriginAdvancer for ChannelProvider<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Send + Debug,
{
    async fn advance_origin(&mut self) -> PipelineResult<()> {
        match (self.stage.as_mut(), self.prev.as_mut()) {
            (Some(stage), _) => stage.advance_origin().await,
            (None, Some(prev)) => prev.advance_origin().await,
            (None, None) => Err(PipelineError::ChannelProviderEmpty.crit()),
        }
    }
}

impl<P> OriginProvider for ChannelProvider<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Send + Debug,
{
    fn origin(&self) -> Option<BlockInfo> {
        self.stage.as_ref().map_or_else(
            || self.prev.as_ref().and_then(|prev| prev.origin()),
            |stage| stage.origin(),
        )
    }
}

#[async_trait]
impl<P> SignalReceiver for ChannelProvider<P>
where
    P: NextFrameProvider + OriginAdvancer + OriginProvider + SignalReceiver + Send + Debug,
{
    async fn signal(&mut self, signal: Signal) -> PipelineResult<()> {
        match signal {
            Signal::Reset(reset) => self.reset(reset).await,
            Signal::Activation(activation) => {
                self.transform(activation.fork)?;
                self.forward(signal).await
            }
            Signal::FlushChannel => self.forward(signal).await,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{ActivationSignal, PipelineErrorKind, test_utils::TestNextFrameProvider};
    use alloc::vec;
    use loam_genesis::HardForkConfig;

    fn holocene_at(time: u64) -> Arc<RollupConfig> {
        Arc::new(RollupConfig {
            hardforks: HardForkConfig { holocene_time: Some(time), ..Default::default() },
            ..Default::default()
        })
    }

    fn reset_at(timestamp: u64) -> ResetSignal {
        ResetSignal {
            l1_origin: BlockInfo { timestamp, ..Default::default() },
            ..Default::default()
        }
    }

    #[test]
    fn test_transform_bank_to_assembler() {
        let provider = TestNextFrameProvider::new(vec![]);
        let mut channel_provider = ChannelProvider::new(holocene_at(10), provider);

        channel_provider.transform(ForkName::Holocene).unwrap();
        assert!(channel_provider.prev.is_none());
        assert!(matches!(channel_provider.stage, Some(ActiveStage::Assembler(_))));
    }

    #[tokio::test]
    async fn test_transform_from_bank_drops_buffered_channels() {
        let provider = TestNextFrameProvider::new(vec![]);
        let mut channel_provider = ChannelProvider::new(holocene_at(10), provider);
        channel_provider.reset(reset_at(0)).await.unwrap();
        assert!(matches!(channel_provider.stage, Some(ActiveStage::Bank(_))));

        channel_provider.transform(ForkName::Holocene).unwrap();
        let Some(ActiveStage::Assembler(assembler)) = channel_provider.stage.as_ref() else {
            panic!("Expected ChannelAssembler");
        };
        assert!(assembler.channel.is_none());
    }

    #[test]
    #[should_panic(expected = "Holocene activation replayed")]
    fn test_transform_twice_panics() {
        let provider = TestNextFrameProvider::new(vec![]);
        let mut channel_provider = ChannelProvider::new(holocene_at(10), provider);

        channel_provider.transform(ForkName::Holocene).unwrap();
        let _ = channel_provider.transform(ForkName::Holocene);
    }

    #[test]
    fn test_transform_ignores_other_forks() {
        let provider = TestNextFrameProvider::new(vec![]);
        let mut channel_provider = ChannelProvider::new(holocene_at(10), provider);

        for fork in ForkName::ALL.into_iter().filter(|f| *f != ForkName::Holocene) {
            channel_provider.transform(fork).unwrap();
        }
        assert!(channel_provider.prev.is_some());
        assert!(channel_provider.stage.is_none());
    }

    #[tokio::test]
    async fn test_reset_selects_stage_by_origin() {
        let provider = TestNextFrameProvider::new(vec![]);
        let mut channel_provider = ChannelProvider::new(holocene_at(10), provider);

        channel_provider.reset(reset_at(9)).await.unwrap();
        assert!(matches!(channel_provider.stage, Some(ActiveStage::Bank(_))));

        channel_provider.reset(reset_at(10)).await.unwrap();
        assert!(matches!(channel_provider.stage, Some(ActiveStage::Assembler(_))));

        // A reorg back before activation returns to the bank.
        channel_provider.reset(reset_at(5)).await.unwrap();
        assert!(matches!(channel_provider.stage, Some(ActiveStage::Bank(_))));
    }

    #[tokio::test]
    async fn test_reset_retains_matching_stage() {
        let frames = [
            crate::frame!(0xFF, 0, vec![0xDD; 50], false),
            crate::frame!(0xFF, 1, vec![0xDD; 50], true),
        ];
        let provider = TestNextFrameProvider::new(frames.into_iter().rev().map(Ok).collect());
        let mut channel_provider = ChannelProvider::new(holocene_at(10), provider);

        // Load in the first frame.
        assert_eq!(
            channel_provider.next_data().await.unwrap_err(),
            PipelineError::NotEnoughData.temp()
        );
        let Some(ActiveStage::Bank(channel_bank)) = channel_provider.stage.as_ref() else {
            panic!("Expected ChannelBank");
        };
        assert_eq!(channel_bank.channel_queue.len(), 1);

        // Reset the channel provider to a pre-Holocene origin.
        channel_provider.signal(reset_at(0).signal()).await.unwrap();

        // The same bank is kept, and its state is cleared.
        let Some(ActiveStage::Bank(channel_bank)) = channel_provider.stage.as_ref() else {
            panic!("Expected ChannelBank");
        };
        assert!(channel_bank.channel_queue.is_empty());
        assert!(channel_bank.prev.reset);
    }

    #[tokio::test]
    async fn test_next_data_lazily_selects_stage() {
        let provider = TestNextFrameProvider::new(vec![]);
        let mut channel_provider = ChannelProvider::new(holocene_at(0), provider);

        assert_eq!(channel_provider.next_data().await, Err(PipelineError::Eof.temp()));
        assert!(matches!(channel_provider.stage, Some(ActiveStage::Assembler(_))));
    }

    #[tokio::test]
    async fn test_next_data_does_not_transition() {
        let provider = TestNextFrameProvider::new(vec![]);
        let mut channel_provider = ChannelProvider::new(holocene_at(2), provider);
        channel_provider.reset(reset_at(0)).await.unwrap();

        // Move the L1 origin across Holocene activation.
        let Some(ActiveStage::Bank(bank)) = channel_provider.stage.as_mut() else {
            panic!("Expected ChannelBank");
        };
        bank.prev.block_info = Some(BlockInfo { number: 1, timestamp: 2, ..Default::default() });

        assert_eq!(
            channel_provider.next_data().await,
            Err(ResetError::HoloceneActivation.reset())
        );
        assert!(matches!(channel_provider.stage, Some(ActiveStage::Bank(_))));

        // The activation signal performs the swap.
        channel_provider
            .signal(ActivationSignal::new(ForkName::Holocene).signal())
            .await
            .unwrap();
        assert!(matches!(channel_provider.stage, Some(ActiveStage::Assembler(_))));
        assert_eq!(channel_provider.origin().map(|o| o.number), Some(1));
        assert!(matches!(
            channel_provider.next_data().await,
            Err(PipelineErrorKind::Temporary(PipelineError::Eof))
        ));
    }

    #[tokio::test]
    async fn test_next_data_assembler_before_holocene() {
        let provider = TestNextFrameProvider::new(vec![]);
        let mut channel_provider = ChannelProvider::new(holocene_at(2), provider);
        channel_provider.transform(ForkName::Holocene).unwrap();

        assert_eq!(
            channel_provider.next_data().await,
            Err(ResetError::ReorgedBeforeHolocene(0).reset())
        );
    }

    #[tokio::test]
    async fn test_flush_channel_signal() {
        let frames = [crate::frame!(0xFF, 0, vec![0xDD; 50], false)];
        let provider = TestNextFrameProvider::new(frames.into_iter().map(Ok).collect());
        let mut channel_provider = ChannelProvider::new(holocene_at(0), provider);

        assert_eq!(
            channel_provider.next_data().await,
            Err(PipelineError::NotEnoughData.temp())
        );
        channel_provider.signal(Signal::FlushChannel).await.unwrap();
        let Some(ActiveStage::Assembler(assembler)) = channel_provider.stage.as_ref() else {
            panic!("Expected ChannelAssembler");
        };
        assert!(assembler.channel.is_none());
    }
}
