//! Shared decoding of the ABI `bytes` argument carried by every config update log.

use alloy_sol_types::{SolType, sol};

use crate::{SystemConfigLog, SystemConfigUpdateKind, UpdateDataError};

/// The offset of the payload's length word; the only pointer the contract emits.
const EXPECTED_POINTER: u64 = 32;

/// Returns the payload of a config update after checking the `(pointer, length)` header.
///
/// The log data must be exactly `64 + kind.payload_len()` bytes, with a pointer of 32 and a
/// length word equal to the payload length.
pub(crate) fn update_payload(
    log: &SystemConfigLog,
    kind: SystemConfigUpdateKind,
) -> Result<&[u8], UpdateDataError> {
    let data = &log.log.data.data;
    let payload_len = kind.payload_len();
    let expected = 64 + payload_len;
    if data.len() != expected {
        return Err(UpdateDataError::InvalidDataLen { expected, actual: data.len() });
    }

    let pointer = <sol!(uint64)>::abi_decode_validate(&data[0..32])
        .map_err(|_| UpdateDataError::PointerDecodingError)?;
    if pointer != EXPECTED_POINTER {
        return Err(UpdateDataError::InvalidDataPointer(pointer));
    }

    let length = <sol!(uint64)>::abi_decode_validate(&data[32..64])
        .map_err(|_| UpdateDataError::LengthDecodingError)?;
    if length != payload_len as u64 {
        return Err(UpdateDataError::InvalidDataLength(length));
    }

    Ok(&data[64..])
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{CONFIG_UPDATE_EVENT_VERSION_0, CONFIG_UPDATE_TOPIC};
    use alloc::vec;
    use alloy_primitives::{Address, B256, Bytes, Log, LogData, hex};
    use rstest::rstest;

    /// Builds a version-0 config update log of the given kind over raw data.
    pub(crate) fn log_of(kind: SystemConfigUpdateKind, data: &[u8], ecotone: bool) -> SystemConfigLog {
        let log = Log {
            address: Address::ZERO,
            data: LogData::new_unchecked(
                vec![
                    CONFIG_UPDATE_TOPIC,
                    CONFIG_UPDATE_EVENT_VERSION_0,
                    B256::with_last_byte(kind as u8),
                ],
                Bytes::copy_from_slice(data),
            ),
        };
        SystemConfigLog::new(log, ecotone)
    }

    #[rstest]
    #[case::empty(&[], UpdateDataError::InvalidDataLen { expected: 96, actual: 0 })]
    #[case::bad_pointer_word(
        &hex!("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF00000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000babe0000beef"),
        UpdateDataError::PointerDecodingError
    )]
    #[case::wrong_pointer(
        &hex!("000000000000000000000000000000000000000000000000000000000000002100000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000babe0000beef"),
        UpdateDataError::InvalidDataPointer(33)
    )]
    #[case::bad_length_word(
        &hex!("0000000000000000000000000000000000000000000000000000000000000020FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF0000000000000000000000000000000000000000000000000000babe0000beef"),
        UpdateDataError::LengthDecodingError
    )]
    #[case::wrong_length(
        &hex!("000000000000000000000000000000000000000000000000000000000000002000000000000000000000000000000000000000000000000000000000000000210000000000000000000000000000000000000000000000000000babe0000beef"),
        UpdateDataError::InvalidDataLength(33)
    )]
    fn test_update_payload_errors(#[case] data: &[u8], #[case] expected: UpdateDataError) {
        let log = log_of(SystemConfigUpdateKind::Batcher, data, false);
        assert_eq!(update_payload(&log, SystemConfigUpdateKind::Batcher), Err(expected));
    }

    #[test]
    fn test_update_payload_gas_config_length() {
        let data = hex!("000000000000000000000000000000000000000000000000000000000000002000000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000babe0000beef");
        let log = log_of(SystemConfigUpdateKind::GasConfig, &data, false);
        assert_eq!(
            update_payload(&log, SystemConfigUpdateKind::GasConfig),
            Err(UpdateDataError::InvalidDataLen { expected: 128, actual: 96 })
        );
    }

    #[test]
    fn test_update_payload_ok() {
        let data = hex!("000000000000000000000000000000000000000000000000000000000000002000000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000babe0000beef");
        let log = log_of(SystemConfigUpdateKind::Eip1559, &data, false);
        assert_eq!(update_payload(&log, SystemConfigUpdateKind::Eip1559).unwrap(), &data[64..]);
    }
}
