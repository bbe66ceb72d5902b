//! A mock frame queue for the channel stages.

use crate::{
    errors::PipelineError,
    stages::NextFrameProvider,
    traits::{OriginAdvancer, OriginProvider, SignalReceiver},
    types::{PipelineResult, Signal},
};
use alloc::{boxed::Box, vec::Vec};
use async_trait::async_trait;
use loam_protocol::{BlockInfo, Frame};

/// Builds a [`Frame`] whose channel id is sixteen copies of a single byte.
///
/// [`Frame`]: loam_protocol::Frame
#[macro_export]
macro_rules! frame {
    ($id:expr, $number:expr, $data:expr, $is_last:expr) => {
        loam_protocol::Frame { id: [$id; 16], number: $number, data: $data, is_last: $is_last }
    };
}

/// A mock [`NextFrameProvider`] for testing the channel stages.
///
/// Frames are popped from the back of `data`; once it is empty every call returns
/// [`PipelineError::Eof`].
#[derive(Debug, Default)]
pub struct TestNextFrameProvider {
    /// The data to return.
    pub data: Vec<PipelineResult<Frame>>,
    /// The block info
    pub block_info: Option<BlockInfo>,
    /// Tracks if the provider has been reset.
    pub reset: bool,
}

impl TestNextFrameProvider {
    /// Creates a new [`TestNextFrameProvider`] with the given data.
    pub fn new(data: Vec<PipelineResult<Frame>>) -> Self {
        Self { data, block_info: Some(BlockInfo::default()), reset: false }
    }
}

impl OriginProvider for TestNextFrameProvider {
    fn origin(&self) -> Option<BlockInfo> {
        self.block_info
    }
}

#[async_trait]
impl OriginAdvancer for TestNextFrameProvider {
    async fn advance_origin(&mut self) -> PipelineResult<()> {
        let origin = self.block_info.ok_or(PipelineError::MissingOrigin.crit())?;
        self.block_info = Some(BlockInfo {
            number: origin.number + 1,
            parent_hash: origin.hash,
            ..origin
        });
        Ok(())
    }
}

#[async_trait]
impl NextFrameProvider for TestNextFrameProvider {
    async fn next_frame(&mut self) -> PipelineResult<Frame> {
        self.data.pop().unwrap_or(Err(PipelineError::Eof.temp()))
    }
}

#[async_trait]
impl SignalReceiver for TestNextFrameProvider {
    async fn signal(&mut self, signal: Signal) -> PipelineResult<()> {
        if matches!(signal, Signal::Reset(_)) {
            self.reset = true;
        }
        Ok(())
    }
}
