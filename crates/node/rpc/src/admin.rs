//! Admin RPC Module

use crate::AdminApiServer;
use alloy_primitives::B256;
use async_trait::async_trait;
use jsonrpsee::{
    core::RpcResult,
    types::{ErrorCode, ErrorObject, ErrorObjectOwned},
};
use tokio::sync::{mpsc, oneshot};

/// The query types to the sequencer actor for the admin api.
#[derive(Debug)]
pub enum SequencerAdminQuery {
    /// A query to reset the derivation pipeline.
    ResetDerivationPipeline(oneshot::Sender<()>),
    /// A query to check if the sequencer is active.
    SequencerActive(oneshot::Sender<bool>),
    /// A query to start the sequencer on top of an unsafe head.
    ///
    /// The actor rejects the request with a reason when the head does not match its own.
    StartSequencer {
        /// The unsafe head to build on.
        unsafe_head: B256,
        /// The reply channel.
        sender: oneshot::Sender<Result<(), String>>,
    },
    /// A query to stop the sequencer. Replies with the last sequenced block hash.
    StopSequencer(oneshot::Sender<B256>),
    /// A query to override the leader.
    OverrideLeader,
}

/// The sender half of the sequencer admin query channel.
pub type SequencerAdminQuerySender = mpsc::Sender<SequencerAdminQuery>;

fn internal_error<E>(_: E) -> ErrorObjectOwned {
    ErrorObject::from(ErrorCode::InternalError)
}

/// The admin rpc server.
#[derive(Debug, Clone)]
pub struct AdminRpc {
    /// The sender to the sequencer actor. `None` when the node runs as a validator.
    pub sequencer_sender: Option<SequencerAdminQuerySender>,
}

impl AdminRpc {
    /// The error code returned when the sequencer rejects a start request.
    pub const START_REJECTED_CODE: i32 = -32001;

    /// Constructs a new [`AdminRpc`].
    pub const fn new(sequencer_sender: Option<SequencerAdminQuerySender>) -> Self {
        Self { sequencer_sender }
    }

    /// Returns the sequencer sender, or `MethodNotFound` in validator mode.
    fn sequencer(&self) -> RpcResult<&SequencerAdminQuerySender> {
        self.sequencer_sender.as_ref().ok_or_else(|| ErrorObject::from(ErrorCode::MethodNotFound))
    }

    async fn request<T, F>(&self, query: F) -> RpcResult<T>
    where
        F: FnOnce(oneshot::Sender<T>) -> SequencerAdminQuery,
    {
        let (tx, rx) = oneshot::channel();
        self.sequencer()?.send(query(tx)).await.map_err(internal_error)?;
        rx.await.map_err(internal_error)
    }
}

#[async_trait]
impl AdminApiServer for AdminRpc {
    async fn admin_reset_derivation_pipeline(&self) -> RpcResult<()> {
        loam_macros::inc!(
            gauge,
            crate::Metrics::RPC_CALLS,
            "method" => "admin_resetDerivationPipeline"
        );
        self.request(SequencerAdminQuery::ResetDerivationPipeline).await?;
        info!(target: "rpc", "Derivation pipeline reset requested");
        Ok(())
    }

    async fn admin_start_sequencer(&self, unsafe_head: B256) -> RpcResult<()> {
        loam_macros::inc!(gauge, crate::Metrics::RPC_CALLS, "method" => "admin_startSequencer");
        self.request(|sender| SequencerAdminQuery::StartSequencer { unsafe_head, sender })
            .await?
            .map_err(|reason| {
                warn!(target: "rpc", %unsafe_head, "Sequencer start rejected: {reason}");
                ErrorObject::owned(Self::START_REJECTED_CODE, reason, None::<()>)
            })
    }

    async fn admin_stop_sequencer(&self) -> RpcResult<B256> {
        loam_macros::inc!(gauge, crate::Metrics::RPC_CALLS, "method" => "admin_stopSequencer");
        self.request(SequencerAdminQuery::StopSequencer).await
    }

    async fn admin_sequencer_active(&self) -> RpcResult<bool> {
        loam_macros::inc!(gauge, crate::Metrics::RPC_CALLS, "method" => "admin_sequencerActive");
        self.request(SequencerAdminQuery::SequencerActive).await
    }

    async fn admin_override_leader(&self) -> RpcResult<()> {
        loam_macros::inc!(gauge, crate::Metrics::RPC_CALLS, "method" => "admin_overrideLeader");
        self.sequencer()?.send(SequencerAdminQuery::OverrideLeader).await.map_err(internal_error)
    }
}
