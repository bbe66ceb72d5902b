//! Signals and result aliases shared by the pipeline stages.

use crate::PipelineErrorKind;
use core::fmt::Display;
use loam_genesis::{ForkName, SystemConfig};
use loam_protocol::{BlockInfo, L2BlockInfo};

/// A result type for the derivation pipeline stages.
pub type PipelineResult<T> = Result<T, PipelineErrorKind>;

/// A signal sent down the pipeline to reset or reconfigure its stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Reset every stage to a new L1 origin and L2 safe head.
    Reset(ResetSignal),
    /// A network upgrade activated. Stages that change shape at the fork transform themselves.
    Activation(ActivationSignal),
    /// Drop the channel currently being assembled.
    FlushChannel,
}

impl Display for Signal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Reset(_) => write!(f, "reset"),
            Self::Activation(signal) => write!(f, "activation({})", signal.fork),
            Self::FlushChannel => write!(f, "flush_channel"),
        }
    }
}

/// A pipeline reset signal.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResetSignal {
    /// The L2 safe head to reset to.
    pub l2_safe_head: L2BlockInfo,
    /// The L1 origin to reset to.
    pub l1_origin: BlockInfo,
    /// The optional [`SystemConfig`] to reset with.
    pub system_config: Option<SystemConfig>,
}

impl ResetSignal {
    /// Creates a new [`Signal::Reset`] from the [`ResetSignal`].
    pub const fn signal(self) -> Signal {
        Signal::Reset(self)
    }
}

/// A pipeline hardfork activation signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationSignal {
    /// The network upgrade that activated.
    pub fork: ForkName,
    /// The L2 safe head at activation.
    pub l2_safe_head: L2BlockInfo,
    /// The L1 origin at activation.
    pub l1_origin: BlockInfo,
    /// The optional [`SystemConfig`] to reset with.
    pub system_config: Option<SystemConfig>,
}

impl ActivationSignal {
    /// Creates an activation signal for `fork` with no anchor blocks set.
    pub fn new(fork: ForkName) -> Self {
        Self {
            fork,
            l2_safe_head: Default::default(),
            l1_origin: Default::default(),
            system_config: None,
        }
    }

    /// Creates a new [`Signal::Activation`] from the [`ActivationSignal`].
    pub const fn signal(self) -> Signal {
        Signal::Activation(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_reset_signal() {
        let signal = ResetSignal::default();
        assert_eq!(signal.signal(), Signal::Reset(signal));
    }

    #[test]
    fn test_activation_signal() {
        let signal = ActivationSignal::new(ForkName::Holocene);
        assert_eq!(signal.signal(), Signal::Activation(signal));
        assert_eq!(signal.signal().to_string(), "activation(Holocene)");
        assert_eq!(Signal::FlushChannel.to_string(), "flush_channel");
    }
}
