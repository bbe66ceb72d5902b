//! Contains traits for working with payload attributes and their providers.

use crate::types::PipelineResult;
use alloc::boxed::Box;
use async_trait::async_trait;
use loam_protocol::L2BlockInfo;
use op_alloy_rpc_types_engine::OpPayloadAttributes;

/// [`AttributesBuilder`] is responsible for preparing [`OpPayloadAttributes`]
/// that can be used to construct an L2 Block containing only deposits.
#[async_trait]
pub trait AttributesBuilder {
    /// Prepares a template [`OpPayloadAttributes`] for the block following `parent`.
    ///
    /// `prev_randao` and `parent_beacon_block_root` are left at their defaults for the caller
    /// to fill from the L1 origin.
    async fn prepare_payload_attributes(
        &mut self,
        parent: L2BlockInfo,
    ) -> PipelineResult<OpPayloadAttributes>;
}
