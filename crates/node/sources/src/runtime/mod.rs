//! The runtime configuration store.

use alloy_primitives::Address;
use loam_protocol::{BlockInfo, ProtocolVersion};
use std::sync::Arc;

mod loader;
pub use loader::{
    L1StorageProvider, PROTOCOL_VERSION_RECOMMENDED_SLOT, PROTOCOL_VERSION_REQUIRED_SLOT,
    RuntimeLoadError, RuntimeLoader, UNSAFE_BLOCK_SIGNER_ADDRESS_SLOT,
};

/// One consistent set of runtime values, as read from a single L1 block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeSnapshot {
    /// The address allowed to sign unsafe blocks gossiped by the sequencer.
    pub p2p_block_signer: Address,
    /// The protocol version the node must support.
    pub required_protocol_version: ProtocolVersion,
    /// The protocol version the node should support.
    pub recommended_protocol_version: ProtocolVersion,
    /// The L1 block the values were read at.
    pub l1_ref: BlockInfo,
}

/// Shared runtime configuration, reloaded from L1 while the node runs.
///
/// Cloning returns another handle to the same store. [`RuntimeConfig::load`] replaces every
/// value under the write lock, so readers never see a mix of two loads. Before the first load
/// every accessor returns the zero value.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    inner: Arc<spin::RwLock<RuntimeSnapshot>>,
}

impl RuntimeConfig {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the stored values.
    pub fn load(
        &self,
        p2p_block_signer: Address,
        required_protocol_version: ProtocolVersion,
        recommended_protocol_version: ProtocolVersion,
        l1_ref: BlockInfo,
    ) {
        self.store(RuntimeSnapshot {
            p2p_block_signer,
            required_protocol_version,
            recommended_protocol_version,
            l1_ref,
        });
    }

    /// Replaces the stored values with a snapshot.
    pub fn store(&self, snapshot: RuntimeSnapshot) {
        *self.inner.write() = snapshot;
        info!(
            target: "runtime-config",
            signer = %snapshot.p2p_block_signer,
            required = %snapshot.required_protocol_version,
            recommended = %snapshot.recommended_protocol_version,
            l1 = %snapshot.l1_ref.number,
            "Loaded runtime config"
        );
    }

    /// Returns the address allowed to sign unsafe blocks.
    pub fn p2p_sequencer_address(&self) -> Address {
        self.inner.read().p2p_block_signer
    }

    /// Returns the required protocol version.
    pub fn required_protocol_version(&self) -> ProtocolVersion {
        self.inner.read().required_protocol_version
    }

    /// Returns the recommended protocol version.
    pub fn recommended_protocol_version(&self) -> ProtocolVersion {
        self.inner.read().recommended_protocol_version
    }

    /// Returns the L1 block of the last load.
    pub fn l1_ref(&self) -> BlockInfo {
        self.inner.read().l1_ref
    }

    /// Returns every value from the same load.
    pub fn snapshot(&self) -> RuntimeSnapshot {
        *self.inner.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use loam_protocol::ProtocolVersionFormatV0;

    fn version(major: u32) -> ProtocolVersion {
        ProtocolVersion::V0(ProtocolVersionFormatV0 { major, ..Default::default() })
    }

    #[test]
    fn test_zero_before_load() {
        let config = RuntimeConfig::new();
        assert_eq!(config.p2p_sequencer_address(), Address::ZERO);
        assert!(config.required_protocol_version().is_zero());
        assert!(config.recommended_protocol_version().is_zero());
        assert_eq!(config.l1_ref(), BlockInfo::default());
    }

    #[test]
    fn test_load_replaces_all_values() {
        let config = RuntimeConfig::new();
        let l1_ref = BlockInfo { hash: B256::with_last_byte(1), number: 1, ..Default::default() };
        config.load(Address::with_last_byte(1), version(2), version(3), l1_ref);

        assert_eq!(config.p2p_sequencer_address(), Address::with_last_byte(1));
        assert_eq!(config.required_protocol_version(), version(2));
        assert_eq!(config.recommended_protocol_version(), version(3));
        assert_eq!(config.l1_ref(), l1_ref);

        config.load(Address::with_last_byte(4), version(5), version(6), BlockInfo::default());
        assert_eq!(
            config.snapshot(),
            RuntimeSnapshot {
                p2p_block_signer: Address::with_last_byte(4),
                required_protocol_version: version(5),
                recommended_protocol_version: version(6),
                l1_ref: BlockInfo::default(),
            }
        );
    }

    #[test]
    fn test_clones_share_the_store() {
        let config = RuntimeConfig::new();
        let reader = config.clone();
        config.load(Address::with_last_byte(9), version(1), version(1), BlockInfo::default());
        assert_eq!(reader.p2p_sequencer_address(), Address::with_last_byte(9));
    }

    #[test]
    fn test_readers_never_see_partial_loads() {
        let config = RuntimeConfig::new();
        let writer = {
            let config = config.clone();
            std::thread::spawn(move || {
                for i in 1..=500u32 {
                    let l1_ref = BlockInfo { number: i as u64, ..Default::default() };
                    config.load(Address::with_last_byte(i as u8), version(i), version(i), l1_ref);
                }
            })
        };
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let config = config.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let snapshot = config.snapshot();
                        let major = snapshot.required_protocol_version.inner().major;
                        assert_eq!(snapshot.recommended_protocol_version.inner().major, major);
                        assert_eq!(snapshot.l1_ref.number, major as u64);
                        assert_eq!(snapshot.p2p_block_signer, Address::with_last_byte(major as u8));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        readers.into_iter().for_each(|r| r.join().unwrap());
        assert_eq!(config.l1_ref().number, 500);
    }
}
