//! Genesis types.

use alloy_eips::eip1898::BlockNumHash;

use crate::SystemConfig;

/// The L1 and L2 blocks a rollup is anchored to.
///
/// Every derivation run and every head reconciliation bottoms out at this pair; it never
/// changes for the lifetime of a chain.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct ChainGenesis {
    /// L1 genesis block
    pub l1: BlockNumHash,
    /// L2 genesis block
    pub l2: BlockNumHash,
    /// Timestamp of the L2 genesis block
    pub l2_time: u64,
    /// Optional System configuration
    pub system_config: Option<SystemConfig>,
}

impl ChainGenesis {
    /// Returns true if the given L2 block is the genesis block, by number and hash.
    pub fn is_l2_genesis(&self, block: BlockNumHash) -> bool {
        self.l2 == block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    #[test]
    fn test_is_l2_genesis() {
        let genesis = ChainGenesis {
            l2: BlockNumHash {
                number: 5,
                hash: b256!("dbf6a80fef073de06add9b0d14026d6e5a86c85f6d102c36d3d8e9cf89c2afd3"),
            },
            ..Default::default()
        };
        assert!(genesis.is_l2_genesis(genesis.l2));
        assert!(!genesis.is_l2_genesis(BlockNumHash { number: 5, hash: Default::default() }));
        assert!(!genesis.is_l2_genesis(BlockNumHash { number: 6, hash: genesis.l2.hash }));
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_genesis_serde() {
        use alloy_primitives::{address, uint};

        let genesis_str = r#"{
            "l1": {
              "hash": "0x438335a20d98863a4c0c97999eb2481921ccd28553eac6f913af7c12aec04108",
              "number": 17422590
            },
            "l2": {
              "hash": "0xdbf6a80fef073de06add9b0d14026d6e5a86c85f6d102c36d3d8e9cf89c2afd3",
              "number": 105235063
            },
            "l2_time": 1686068903,
            "system_config": {
              "batcherAddr": "0x6887246668a3b87F54DeB3b94Ba47a6f63F32985",
              "overhead": "0x00000000000000000000000000000000000000000000000000000000000000bc",
              "scalar": "0x00000000000000000000000000000000000000000000000000000000000a6fe0",
              "gasLimit": 30000000
            }
          }"#;
        let expected = ChainGenesis {
            l1: BlockNumHash {
                hash: b256!("438335a20d98863a4c0c97999eb2481921ccd28553eac6f913af7c12aec04108"),
                number: 17422590,
            },
            l2: BlockNumHash {
                hash: b256!("dbf6a80fef073de06add9b0d14026d6e5a86c85f6d102c36d3d8e9cf89c2afd3"),
                number: 105235063,
            },
            l2_time: 1686068903,
            system_config: Some(SystemConfig {
                batcher_address: address!("6887246668a3b87F54DeB3b94Ba47a6f63F32985"),
                overhead: uint!(0xbc_U256),
                scalar: uint!(0xa6fe0_U256),
                gas_limit: 30000000,
                ..Default::default()
            }),
        };

        let deserialized: ChainGenesis = serde_json::from_str(genesis_str).unwrap();
        assert_eq!(deserialized, expected);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn test_genesis_unknown_field() {
        let genesis_str = r#"{
            "l1": { "hash": "0x438335a20d98863a4c0c97999eb2481921ccd28553eac6f913af7c12aec04108", "number": 1 },
            "l2": { "hash": "0xdbf6a80fef073de06add9b0d14026d6e5a86c85f6d102c36d3d8e9cf89c2afd3", "number": 0 },
            "l2_time": 1,
            "system_config": null,
            "extra": true
          }"#;
        let err = serde_json::from_str::<ChainGenesis>(genesis_str).unwrap_err();
        assert_eq!(err.classify(), serde_json::error::Category::Data);
    }
}
