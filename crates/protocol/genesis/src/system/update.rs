//! A decoded system config update.

use crate::{
    BatcherUpdate, Eip1559Update, GasConfigUpdate, GasLimitUpdate, OperatorFeeUpdate,
    SystemConfig, SystemConfigUpdateKind, UnsafeBlockSignerUpdate,
};

/// A decoded `ConfigUpdate` log, ready to apply to a [`SystemConfig`].
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum SystemConfigUpdate {
    /// The batcher address changed.
    Batcher(BatcherUpdate),
    /// The fee overhead and scalar changed.
    GasConfig(GasConfigUpdate),
    /// The L2 gas limit changed.
    GasLimit(GasLimitUpdate),
    /// The unsafe block signer changed.
    UnsafeBlockSigner(UnsafeBlockSignerUpdate),
    /// The EIP-1559 parameters changed.
    Eip1559(Eip1559Update),
    /// The operator fee parameters changed.
    OperatorFee(OperatorFeeUpdate),
}

impl SystemConfigUpdate {
    /// Applies the update to the [`SystemConfig`].
    pub const fn apply(&self, config: &mut SystemConfig) {
        match self {
            Self::Batcher(update) => update.apply(config),
            Self::GasConfig(update) => update.apply(config),
            Self::GasLimit(update) => update.apply(config),
            Self::UnsafeBlockSigner(_) => {}
            Self::Eip1559(update) => update.apply(config),
            Self::OperatorFee(update) => update.apply(config),
        }
    }

    /// Returns the kind of the update.
    pub const fn kind(&self) -> SystemConfigUpdateKind {
        match self {
            Self::Batcher(_) => SystemConfigUpdateKind::Batcher,
            Self::GasConfig(_) => SystemConfigUpdateKind::GasConfig,
            Self::GasLimit(_) => SystemConfigUpdateKind::GasLimit,
            Self::UnsafeBlockSigner(_) => SystemConfigUpdateKind::UnsafeBlockSigner,
            Self::Eip1559(_) => SystemConfigUpdateKind::Eip1559,
            Self::OperatorFee(_) => SystemConfigUpdateKind::OperatorFee,
        }
    }
}
