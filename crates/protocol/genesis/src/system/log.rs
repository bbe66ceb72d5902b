//! Contains the [`SystemConfigLog`].

use alloy_primitives::Log;

use crate::{
    BatcherUpdate, CONFIG_UPDATE_EVENT_VERSION_0, CONFIG_UPDATE_TOPIC, Eip1559Update,
    GasConfigUpdate, GasLimitUpdate, LogProcessingError, OperatorFeeUpdate, SystemConfigUpdate,
    SystemConfigUpdateError, SystemConfigUpdateKind, UnsafeBlockSignerUpdate,
};

/// An EVM log emitted by the system config contract to update the system config.
///
/// The log data is formatted as follows:
/// ```text
/// event ConfigUpdate(
///    uint256 indexed version,
///    UpdateType indexed updateType,
///    bytes data
/// );
/// ```
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct SystemConfigLog {
    /// The log.
    pub log: Log,
    /// Whether ecotone is active.
    pub ecotone_active: bool,
}

impl SystemConfigLog {
    /// Constructs a new system config update.
    pub const fn new(log: Log, ecotone_active: bool) -> Self {
        Self { log, ecotone_active }
    }

    /// Validate the log topic.
    pub fn validate_topic(&self) -> Result<(), LogProcessingError> {
        let topics = self.log.topics();
        if topics.len() < 3 {
            return Err(LogProcessingError::InvalidTopicLen(topics.len()));
        }
        if topics[0] != CONFIG_UPDATE_TOPIC {
            return Err(LogProcessingError::InvalidTopic);
        }
        Ok(())
    }

    /// Validate the config update version.
    pub fn validate_version(&self) -> Result<(), LogProcessingError> {
        let version = self.log.topics().get(1).copied().unwrap_or_default();
        if version != CONFIG_UPDATE_EVENT_VERSION_0 {
            return Err(LogProcessingError::UnsupportedVersion(version));
        }
        Ok(())
    }

    /// Extracts the update type from the third topic.
    ///
    /// The type is a `uint8` enum ABI-encoded into a word; the low eight bytes are read.
    pub fn update_type(&self) -> Result<SystemConfigUpdateKind, SystemConfigUpdateError> {
        let Some(topic) = self.log.topics().get(2) else {
            return Err(LogProcessingError::InvalidTopicLen(self.log.topics().len()).into());
        };
        let topic_bytes = <[u8; 8]>::try_from(&topic.as_slice()[24..])
            .map_err(|_| LogProcessingError::UpdateTypeDecodingError)?;
        SystemConfigUpdateKind::try_from(u64::from_be_bytes(topic_bytes))
    }

    /// Builds the [`SystemConfigUpdate`] from the log.
    pub fn build(&self) -> Result<SystemConfigUpdate, SystemConfigUpdateError> {
        self.validate_topic()?;
        self.validate_version()?;
        let kind = self.update_type()?;
        let wrap = |e| SystemConfigUpdateError::data(kind, e);
        let update = match kind {
            SystemConfigUpdateKind::Batcher => {
                SystemConfigUpdate::Batcher(BatcherUpdate::try_from(self).map_err(wrap)?)
            }
            SystemConfigUpdateKind::GasConfig => {
                SystemConfigUpdate::GasConfig(GasConfigUpdate::try_from(self).map_err(wrap)?)
            }
            SystemConfigUpdateKind::GasLimit => {
                SystemConfigUpdate::GasLimit(GasLimitUpdate::try_from(self).map_err(wrap)?)
            }
            SystemConfigUpdateKind::UnsafeBlockSigner => SystemConfigUpdate::UnsafeBlockSigner(
                UnsafeBlockSignerUpdate::try_from(self).map_err(wrap)?,
            ),
            SystemConfigUpdateKind::Eip1559 => {
                SystemConfigUpdate::Eip1559(Eip1559Update::try_from(self).map_err(wrap)?)
            }
            SystemConfigUpdateKind::OperatorFee => {
                SystemConfigUpdate::OperatorFee(OperatorFeeUpdate::try_from(self).map_err(wrap)?)
            }
        };
        Ok(update)
    }
}
