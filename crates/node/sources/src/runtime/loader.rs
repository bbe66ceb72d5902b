//! Loads the runtime configuration from L1 contract storage.

use crate::{Metrics, RuntimeConfig, RuntimeSnapshot};
use alloy_primitives::{Address, B256, U256, b256};
use alloy_provider::{Network, Provider, RootProvider};
use alloy_transport::TransportError;
use async_trait::async_trait;
use loam_genesis::RollupConfig;
use loam_protocol::{BlockInfo, ProtocolVersion, ProtocolVersionError};
use std::{fmt::Display, sync::Arc};
use thiserror::Error;

/// Storage slot of the unsafe block signer in the system config contract.
///
/// `keccak256("systemconfig.unsafeblocksigner")`
pub const UNSAFE_BLOCK_SIGNER_ADDRESS_SLOT: B256 =
    b256!("0x65a7ed542fb37fe237fdfbdd70b31598523fe5b32879e307bae27a0bd9581c08");

/// Storage slot of the required protocol version in the protocol versions contract.
///
/// `keccak256("protocolversion.required") - 1`
pub const PROTOCOL_VERSION_REQUIRED_SLOT: B256 =
    b256!("0x4aaefe95bd84fd3f32700cf3b7566bc944b73138e41958b5785826df2aecace0");

/// Storage slot of the recommended protocol version in the protocol versions contract.
///
/// `keccak256("protocolversion.recommended") - 1`
pub const PROTOCOL_VERSION_RECOMMENDED_SLOT: B256 =
    b256!("0xe314dfc40f0025322aacc0ba8ef420b62fb3b702cf01e0cdf3d829117ac2ff1a");

/// Reads contract storage on L1 at a given block.
#[async_trait]
pub trait L1StorageProvider {
    /// The error type for the [`L1StorageProvider`].
    type Error: Display;

    /// Returns the storage word at `slot` of `address`, as of the L1 block with `block_hash`.
    async fn storage_at(
        &self,
        address: Address,
        slot: B256,
        block_hash: B256,
    ) -> Result<B256, Self::Error>;
}

#[async_trait]
impl<N: Network> L1StorageProvider for RootProvider<N> {
    type Error = TransportError;

    async fn storage_at(
        &self,
        address: Address,
        slot: B256,
        block_hash: B256,
    ) -> Result<B256, Self::Error> {
        let word =
            self.get_storage_at(address, U256::from_be_bytes(slot.0)).hash(block_hash).await?;
        Ok(B256::from(word.to_be_bytes::<32>()))
    }
}

/// An error loading the runtime configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeLoadError {
    /// A storage read failed.
    #[error("Failed to read slot {slot} of {address}: {message}")]
    Storage {
        /// The contract address.
        address: Address,
        /// The storage slot.
        slot: B256,
        /// The provider's error message.
        message: String,
    },
    /// A protocol version word could not be decoded.
    #[error("Invalid protocol version: {0}")]
    ProtocolVersion(#[from] ProtocolVersionError),
}

/// Reads the runtime values from L1 and loads them into a [`RuntimeConfig`].
#[derive(Debug)]
pub struct RuntimeLoader<P> {
    /// The rollup config, for the contract addresses.
    rollup_config: Arc<RollupConfig>,
    /// The L1 storage source.
    provider: P,
    /// The store that receives each load.
    config: RuntimeConfig,
}

impl<P: L1StorageProvider + Send + Sync> RuntimeLoader<P> {
    /// Creates a new [`RuntimeLoader`] writing into `config`.
    pub const fn new(rollup_config: Arc<RollupConfig>, provider: P, config: RuntimeConfig) -> Self {
        Self { rollup_config, provider, config }
    }

    /// Returns a handle to the store.
    pub fn config(&self) -> RuntimeConfig {
        self.config.clone()
    }

    /// Reads the runtime values at `l1_ref` and loads them.
    ///
    /// Nothing is stored unless every read succeeds. Without a protocol versions contract both
    /// versions stay zero.
    pub async fn load(&self, l1_ref: BlockInfo) -> Result<RuntimeSnapshot, RuntimeLoadError> {
        let result = self.read(l1_ref).await;
        match &result {
            Ok(snapshot) => {
                self.config.store(*snapshot);
                loam_macros::inc!(counter, Metrics::RUNTIME_CONFIG_LOADS, "result" => "success");
            }
            Err(e) => {
                warn!(
                    target: "runtime-config",
                    l1 = %l1_ref.number,
                    "Failed to load runtime config: {e}"
                );
                loam_macros::inc!(counter, Metrics::RUNTIME_CONFIG_LOADS, "result" => "failure");
            }
        }
        result
    }

    async fn read(&self, l1_ref: BlockInfo) -> Result<RuntimeSnapshot, RuntimeLoadError> {
        let system_config = self.rollup_config.l1_system_config_address;
        let signer_word = self.slot(system_config, UNSAFE_BLOCK_SIGNER_ADDRESS_SLOT, l1_ref).await?;
        let p2p_block_signer = Address::from_word(signer_word);

        let versions = self.rollup_config.protocol_versions_address;
        let (required_protocol_version, recommended_protocol_version) = if versions.is_zero() {
            debug!(target: "runtime-config", "No protocol versions contract, skipping versions");
            (ProtocolVersion::default(), ProtocolVersion::default())
        } else {
            let required = self.slot(versions, PROTOCOL_VERSION_REQUIRED_SLOT, l1_ref).await?;
            let recommended =
                self.slot(versions, PROTOCOL_VERSION_RECOMMENDED_SLOT, l1_ref).await?;
            (ProtocolVersion::decode(required)?, ProtocolVersion::decode(recommended)?)
        };

        Ok(RuntimeSnapshot {
            p2p_block_signer,
            required_protocol_version,
            recommended_protocol_version,
            l1_ref,
        })
    }

    async fn slot(
        &self,
        address: Address,
        slot: B256,
        l1_ref: BlockInfo,
    ) -> Result<B256, RuntimeLoadError> {
        self.provider
            .storage_at(address, slot, l1_ref.hash)
            .await
            .map_err(|e| RuntimeLoadError::Storage { address, slot, message: e.to_string() })
    }
}
