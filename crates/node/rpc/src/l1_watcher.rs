//! Queries to the component that follows the L1 chain.

use loam_protocol::{BlockInfo, SyncStatus};
use tokio::sync::{mpsc, oneshot};

/// The L1 half of the sync status. Unknown fields are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct L1State {
    /// The L1 block derivation last idled at.
    pub current_l1: Option<BlockInfo>,
    /// The finalized L1 block derivation has seen.
    pub current_l1_finalized: Option<BlockInfo>,
    /// The L1 head.
    pub head_l1: Option<BlockInfo>,
    /// The L1 safe head.
    pub safe_l1: Option<BlockInfo>,
    /// The L1 finalized head.
    pub finalized_l1: Option<BlockInfo>,
}

/// Unknown blocks are zeroed, following op-node.
impl From<L1State> for SyncStatus {
    fn from(l1: L1State) -> Self {
        Self {
            current_l1: l1.current_l1.unwrap_or_default(),
            current_l1_finalized: l1.current_l1_finalized.unwrap_or_default(),
            head_l1: l1.head_l1.unwrap_or_default(),
            safe_l1: l1.safe_l1.unwrap_or_default(),
            finalized_l1: l1.finalized_l1.unwrap_or_default(),
            ..Default::default()
        }
    }
}

/// The queries the L1 watcher answers.
#[derive(Debug)]
pub enum L1WatcherQueries {
    /// Returns the current [`L1State`].
    L1State(oneshot::Sender<L1State>),
}

/// The sender half of the L1 watcher query channel.
pub type L1WatcherQuerySender = mpsc::Sender<L1WatcherQueries>;
