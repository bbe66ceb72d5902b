//! Protocol versions, as published by the protocol-versions L1 contract.

use alloc::{format, string::String};
use alloy_primitives::{B64, B256};
use derive_more::Display;

/// An error decoding a [`ProtocolVersion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolVersionError {
    /// The leading type byte names an unknown format.
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u8),
    /// A V0 version has non-zero reserved bytes.
    #[error("Non-zero reserved bytes")]
    NonZeroReserved,
}

/// A protocol version: a 32 byte word whose leading byte selects the format.
///
/// ```text
/// <version type (1)> <typed payload (31)>
/// ```
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ProtocolVersion {
    /// Version-type 0.
    #[display("{_0}")]
    V0(ProtocolVersionFormatV0),
}

impl Default for ProtocolVersion {
    fn default() -> Self {
        Self::V0(ProtocolVersionFormatV0::default())
    }
}

impl ProtocolVersion {
    /// Encodes the protocol version as a 32 byte word.
    pub fn encode(&self) -> B256 {
        let mut bytes = [0u8; 32];
        match self {
            Self::V0(value) => {
                bytes[1..].copy_from_slice(&value.encode());
            }
        }
        B256::from(bytes)
    }

    /// Decodes a protocol version from a 32 byte word.
    pub fn decode(value: B256) -> Result<Self, ProtocolVersionError> {
        match value[0] {
            0 => ProtocolVersionFormatV0::decode(&value[1..]).map(Self::V0),
            other => Err(ProtocolVersionError::UnsupportedVersion(other)),
        }
    }

    /// Returns the inner V0 value.
    pub const fn inner(&self) -> ProtocolVersionFormatV0 {
        match self {
            Self::V0(value) => *value,
        }
    }

    /// Returns `true` for the all-zero version, which means "unset".
    pub fn is_zero(&self) -> bool {
        self.encode() == B256::ZERO
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ProtocolVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.encode().serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ProtocolVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = B256::deserialize(deserializer)?;
        Self::decode(value).map_err(serde::de::Error::custom)
    }
}

/// The V0 protocol version format.
///
/// ```text
/// <reserved (7)> <build (8)> <major (4)> <minor (4)> <patch (4)> <pre-release (4)>
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProtocolVersionFormatV0 {
    /// Differentiates forks and custom builds of the protocol.
    pub build: B64,
    /// Incompatible API changes.
    pub major: u32,
    /// Identifies additional functionality in a backwards compatible manner.
    pub minor: u32,
    /// Identifies backward-compatible bug-fixes.
    pub patch: u32,
    /// Identifies unstable versions that may not satisfy the above.
    pub pre_release: u32,
}

impl core::fmt::Display for ProtocolVersionFormatV0 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let build_tag = if self.build.is_zero() {
            String::new()
        } else if is_readable_build(&self.build) {
            let tag = String::from_utf8_lossy(&self.build.0);
            format!("+{}", tag.trim_end_matches('\0'))
        } else {
            format!("+{}", self.build)
        };

        let pre_release_tag =
            if self.pre_release == 0 { String::new() } else { format!("-{}", self.pre_release) };

        write!(f, "v{}.{}.{}{}{}", self.major, self.minor, self.patch, pre_release_tag, build_tag)
    }
}

/// A build tag renders as text when it is semver-style ASCII (alphanumerics, `-`, and `.`
/// past the first byte) followed only by zero padding.
fn is_readable_build(build: &B64) -> bool {
    let text_len = build.iter().position(|b| *b == 0).unwrap_or(build.len());
    build[text_len..].iter().all(|b| *b == 0) &&
        build[..text_len]
            .iter()
            .enumerate()
            .all(|(i, c)| c.is_ascii_alphanumeric() || *c == b'-' || (*c == b'.' && i > 0))
}

impl ProtocolVersionFormatV0 {
    /// Encodes the 31 byte typed payload.
    pub fn encode(&self) -> [u8; 31] {
        let mut bytes = [0u8; 31];
        bytes[7..15].copy_from_slice(&self.build.0);
        bytes[15..19].copy_from_slice(&self.major.to_be_bytes());
        bytes[19..23].copy_from_slice(&self.minor.to_be_bytes());
        bytes[23..27].copy_from_slice(&self.patch.to_be_bytes());
        bytes[27..31].copy_from_slice(&self.pre_release.to_be_bytes());
        bytes
    }

    /// Decodes the 31 byte typed payload.
    fn decode(payload: &[u8]) -> Result<Self, ProtocolVersionError> {
        if payload[..7].iter().any(|b| *b != 0) {
            return Err(ProtocolVersionError::NonZeroReserved);
        }
        let word = |at: usize| u32::from_be_bytes([payload[at], payload[at + 1], payload[at + 2], payload[at + 3]]);
        Ok(Self {
            build: B64::from_slice(&payload[7..15]),
            major: word(15),
            minor: word(19),
            patch: word(23),
            pre_release: word(27),
        })
    }
}
