//! The [`StatefulAttributesBuilder`] and its default implementation.

use super::WallClock;
use crate::{
    errors::{BuilderError, PipelineError},
    metrics::Metrics,
    traits::{AttributesBuilder, L2ChainProvider},
    types::PipelineResult,
};
use alloc::{boxed::Box, format, sync::Arc, vec, vec::Vec};
use alloy_primitives::{B256, Bytes};
use alloy_rpc_types_engine::PayloadAttributes;
use async_trait::async_trait;
use core::fmt::Debug;
use loam_genesis::{ForkName, RollupConfig};
use loam_hardforks::{Hardforks, UpgradeBytecode};
use loam_protocol::{L2BlockInfo, Predeploys};
use op_alloy_rpc_types_engine::OpPayloadAttributes;

/// How far behind the wall clock, in seconds, a sequenced block timestamp may fall before it is
/// clamped forward.
pub const MAX_TIMESTAMP_LAG: u64 = 60;

/// The forks that carry network upgrade transactions, in the order they are injected.
const UPGRADE_FORKS: [ForkName; 3] = [ForkName::Ecotone, ForkName::Fjord, ForkName::Isthmus];

/// Whether the builder produces blocks at the tip or replays them from L1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Replaying derived blocks. Timestamps follow the parent exactly.
    Verifying,
    /// Producing new blocks. Timestamps that lag the wall clock are clamped to it.
    Sequencing,
}

/// A stateful implementation of the [`AttributesBuilder`].
#[derive(Debug)]
pub struct StatefulAttributesBuilder<L2P>
where
    L2P: L2ChainProvider + Debug,
{
    /// The rollup config.
    rollup_cfg: Arc<RollupConfig>,
    /// The system config fetcher.
    config_fetcher: L2P,
    /// The build mode.
    mode: BuildMode,
    /// The wall clock consulted when sequencing.
    clock: Option<Box<dyn WallClock + Send + Sync>>,
    /// Creation code of the predeploy implementations deployed by upgrades.
    upgrade_bytecode: Arc<UpgradeBytecode>,
}

impl<L2P> StatefulAttributesBuilder<L2P>
where
    L2P: L2ChainProvider + Debug,
{
    /// Create a new [`StatefulAttributesBuilder`] that replays derived blocks.
    pub fn new(rcfg: Arc<RollupConfig>, sys_cfg_fetcher: L2P) -> Self {
        Self {
            rollup_cfg: rcfg,
            config_fetcher: sys_cfg_fetcher,
            mode: BuildMode::Verifying,
            clock: None,
            upgrade_bytecode: Arc::default(),
        }
    }

    /// Create a new [`StatefulAttributesBuilder`] that sequences new blocks against `clock`.
    pub fn sequencing(
        rcfg: Arc<RollupConfig>,
        sys_cfg_fetcher: L2P,
        clock: impl WallClock + Send + Sync + 'static,
    ) -> Self {
        Self {
            rollup_cfg: rcfg,
            config_fetcher: sys_cfg_fetcher,
            mode: BuildMode::Sequencing,
            clock: Some(Box::new(clock)),
            upgrade_bytecode: Arc::default(),
        }
    }

    /// Sets the predeploy creation code injected at upgrade activation blocks. Without it,
    /// building the first block of Ecotone, Fjord or Isthmus fails critically.
    pub fn with_upgrade_bytecode(mut self, bytecode: Arc<UpgradeBytecode>) -> Self {
        self.upgrade_bytecode = bytecode;
        self
    }

    /// Returns the [`BuildMode`] of the builder.
    pub const fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Returns the timestamp to place in the attributes for a block due at `next_time`.
    fn clamped_timestamp(&self, next_time: u64) -> u64 {
        let (BuildMode::Sequencing, Some(clock)) = (self.mode, self.clock.as_ref()) else {
            return next_time;
        };
        let now = clock.now();
        if next_time.saturating_add(MAX_TIMESTAMP_LAG) < now {
            warn!(
                target: "attributes-builder",
                "Block timestamp {} lags the wall clock {}, clamping",
                next_time,
                now
            );
            loam_macros::inc!(counter, Metrics::TIMESTAMPS_CLAMPED);
            return now;
        }
        next_time
    }

    /// Returns the network upgrade transactions due at `next_time`, oldest fork first.
    fn upgrade_transactions(&self, next_time: u64) -> PipelineResult<Vec<Bytes>> {
        let mut txs = vec![];
        for fork in UPGRADE_FORKS {
            if !self.rollup_cfg.is_first_fork_block(fork, next_time) {
                continue;
            }
            let upgrade = Hardforks::upgrade_txs(fork, &self.upgrade_bytecode).map_err(|e| {
                PipelineError::AttributesBuilder(BuilderError::UpgradeTxs(fork, e)).crit()
            })?;
            info!(
                target: "attributes-builder",
                "Injecting {} {} upgrade transactions at timestamp {}",
                upgrade.len(),
                fork,
                next_time
            );
            loam_macros::inc!(counter, Metrics::UPGRADE_TXS_INJECTED, "fork" => fork_label(fork));
            txs.extend(upgrade);
        }
        Ok(txs)
    }
}

/// Returns the metric label of an upgrade fork.
#[cfg(feature = "metrics")]
const fn fork_label(fork: ForkName) -> &'static str {
    match fork {
        ForkName::Ecotone => "ecotone",
        ForkName::Fjord => "fjord",
        ForkName::Isthmus => "isthmus",
        _ => "other",
    }
}

#[async_trait]
impl<L2P> AttributesBuilder for StatefulAttributesBuilder<L2P>
where
    L2P: L2ChainProvider + Debug + Send,
{
    async fn prepare_payload_attributes(
        &mut self,
        parent: L2BlockInfo,
    ) -> PipelineResult<OpPayloadAttributes> {
        let sys_config = self
            .config_fetcher
            .system_config_by_hash(parent.block_info.hash, Arc::clone(&self.rollup_cfg))
            .await
            .map_err(|e| {
                PipelineError::Provider(format!(
                    "system_config_by_hash({}): {}",
                    parent.block_info.hash, e
                ))
                .temp()
            })?;

        let next_time =
            parent.block_info.timestamp.checked_add(self.rollup_cfg.block_time).ok_or_else(
                || {
                    PipelineError::AttributesBuilder(BuilderError::TimestampOverflow(
                        parent.block_info.timestamp,
                    ))
                    .crit()
                },
            )?;

        let txs = self.upgrade_transactions(next_time)?;

        let withdrawals = self.rollup_cfg.is_canyon_active(next_time).then(Vec::new);
        let eip_1559_params =
            sys_config.eip_1559_params(&self.rollup_cfg, parent.block_info.timestamp, next_time);
        let timestamp = self.clamped_timestamp(next_time);

        debug!(
            target: "attributes-builder",
            "Prepared attributes for block #{} at {} ({} upgrade txs)",
            parent.block_info.number + 1,
            timestamp,
            txs.len()
        );
        loam_macros::inc!(counter, Metrics::ATTRIBUTES_PREPARED);

        Ok(OpPayloadAttributes {
            payload_attributes: PayloadAttributes {
                timestamp,
                prev_randao: B256::ZERO,
                suggested_fee_recipient: Predeploys::SEQUENCER_FEE_VAULT,
                parent_beacon_block_root: None,
                withdrawals,
            },
            transactions: Some(txs),
            no_tx_pool: Some(true),
            gas_limit: Some(sys_config.gas_limit),
            eip_1559_params,
            min_base_fee: None,
        })
    }
}
