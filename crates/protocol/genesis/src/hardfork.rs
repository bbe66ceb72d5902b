//! Network upgrade names and their activation schedule.

use alloc::string::{String, ToString};
use core::fmt::Display;

/// A network upgrade that changes derivation or block-building rules.
///
/// Variants are declared in protocol order, so the derived [`Ord`] matches activation order.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, derive_more::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ForkName {
    /// Deposit-attribute fixes on top of Bedrock.
    Regolith,
    /// Shanghai on L2, withdrawals list in payload attributes.
    Canyon,
    /// Span batches.
    Delta,
    /// Cancun on L2, blob data availability and the new L1 info format.
    Ecotone,
    /// Brotli channels and the fixed sequencer drift.
    Fjord,
    /// Shorter channel timeout.
    Granite,
    /// Strict frame ordering and L1-governed EIP-1559 parameters.
    Holocene,
    /// Prague on L2 and operator fees.
    Isthmus,
    /// Minimum base fee.
    Jovian,
}

impl ForkName {
    /// Every fork, in activation order.
    pub const ALL: [Self; 9] = [
        Self::Regolith,
        Self::Canyon,
        Self::Delta,
        Self::Ecotone,
        Self::Fjord,
        Self::Granite,
        Self::Holocene,
        Self::Isthmus,
        Self::Jovian,
    ];
}

/// Activation timestamps of each network upgrade.
///
/// A fork is active at an L2 timestamp `t` if its time is `Some(x)` with `t >= x`, or if any
/// later fork is active at `t`. See [`crate::RollupConfig`] for the predicates.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct HardForkConfig {
    /// Activation time of the Regolith network upgrade.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub regolith_time: Option<u64>,
    /// Activation time of the Canyon network upgrade.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub canyon_time: Option<u64>,
    /// Activation time of the Delta network upgrade.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub delta_time: Option<u64>,
    /// Activation time of the Ecotone network upgrade.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub ecotone_time: Option<u64>,
    /// Activation time of the Fjord network upgrade.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub fjord_time: Option<u64>,
    /// Activation time of the Granite network upgrade.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub granite_time: Option<u64>,
    /// Activation time of the Holocene network upgrade.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub holocene_time: Option<u64>,
    /// Activation time of the Isthmus network upgrade.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub isthmus_time: Option<u64>,
    /// Activation time of the Jovian network upgrade.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub jovian_time: Option<u64>,
}

impl Display for HardForkConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        fn fmt_time(t: Option<u64>) -> String {
            t.map(|t| t.to_string()).unwrap_or_else(|| "Not scheduled".to_string())
        }

        writeln!(f, "Scheduled Hardforks:")?;
        for (name, time) in self.iter() {
            writeln!(f, "-> {name} Activation Time: {}", fmt_time(time))?;
        }
        Ok(())
    }
}

impl HardForkConfig {
    /// Returns the configured activation time of a fork, ignoring later forks.
    pub const fn time_of(&self, fork: ForkName) -> Option<u64> {
        match fork {
            ForkName::Regolith => self.regolith_time,
            ForkName::Canyon => self.canyon_time,
            ForkName::Delta => self.delta_time,
            ForkName::Ecotone => self.ecotone_time,
            ForkName::Fjord => self.fjord_time,
            ForkName::Granite => self.granite_time,
            ForkName::Holocene => self.holocene_time,
            ForkName::Isthmus => self.isthmus_time,
            ForkName::Jovian => self.jovian_time,
        }
    }

    /// Returns an iterator of forks and their activation times, in protocol order.
    pub fn iter(&self) -> impl Iterator<Item = (ForkName, Option<u64>)> + '_ {
        ForkName::ALL.into_iter().map(|fork| (fork, self.time_of(fork)))
    }
}
