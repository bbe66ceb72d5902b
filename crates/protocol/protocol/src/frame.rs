//! Frames, the wire unit batch data is split into for L1 submission.

use alloc::vec::Vec;

use crate::ChannelId;

/// The version byte that prefixes frame-carrying L1 calldata.
pub const DERIVATION_VERSION_0: u8 = 0;

/// The per-frame overhead counted towards a channel's size for pruning.
pub const FRAME_OVERHEAD: usize = 200;

/// The largest frame payload accepted.
pub const MAX_FRAME_LEN: usize = 1_000_000;

/// The encoded length of a frame with an empty payload.
const BASE_FRAME_LEN: usize = 16 + 2 + 4 + 1;

/// A frame decoding error.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameDecodingError {
    /// The frame data is too large.
    #[error("Frame data too large: {0} bytes")]
    DataTooLarge(usize),
    /// The frame data is too short.
    #[error("Frame data too short: {0} bytes")]
    DataTooShort(usize),
    /// The `is_last` byte is neither 0 nor 1.
    #[error("Invalid is_last byte: {0}")]
    InvalidIsLast(u8),
}

/// Frame parsing error.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameParseError {
    /// Error parsing the frame data.
    #[error("Frame decoding error: {0}")]
    FrameDecodingError(FrameDecodingError),
    /// No frames to parse.
    #[error("No frames to parse")]
    NoFrames,
    /// Unsupported derivation version.
    #[error("Unsupported derivation version")]
    UnsupportedVersion,
}

/// A channel frame.
///
/// ```text
/// frame = channel_id (16) ++ frame_number (u16 BE) ++ frame_data_length (u32 BE)
///         ++ frame_data ++ is_last (u8)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    /// The channel this frame belongs to.
    pub id: ChannelId,
    /// The position of this frame within its channel, starting at 0.
    pub number: u16,
    /// The frame payload.
    pub data: Vec<u8>,
    /// Whether this is the final frame of its channel.
    pub is_last: bool,
}

impl Frame {
    /// Creates a new [`Frame`].
    pub const fn new(id: ChannelId, number: u16, data: Vec<u8>, is_last: bool) -> Self {
        Self { id, number, data, is_last }
    }

    /// Encode the frame into a byte vector.
    pub fn encode(&self) -> Vec<u8> {
        let mut encoded = Vec::with_capacity(BASE_FRAME_LEN + self.data.len());
        encoded.extend_from_slice(&self.id);
        encoded.extend_from_slice(&self.number.to_be_bytes());
        encoded.extend_from_slice(&(self.data.len() as u32).to_be_bytes());
        encoded.extend_from_slice(&self.data);
        encoded.push(self.is_last as u8);
        encoded
    }

    /// Decodes one frame from the front of `encoded`, returning the bytes consumed.
    pub fn decode(encoded: &[u8]) -> Result<(usize, Self), FrameDecodingError> {
        if encoded.len() < BASE_FRAME_LEN {
            return Err(FrameDecodingError::DataTooShort(encoded.len()));
        }

        let mut id = ChannelId::default();
        id.copy_from_slice(&encoded[..16]);
        let number = u16::from_be_bytes([encoded[16], encoded[17]]);
        let data_len =
            u32::from_be_bytes([encoded[18], encoded[19], encoded[20], encoded[21]]) as usize;

        if data_len > MAX_FRAME_LEN || data_len > encoded.len() - BASE_FRAME_LEN {
            return Err(FrameDecodingError::DataTooLarge(data_len));
        }

        let data = encoded[22..22 + data_len].to_vec();
        let is_last = match encoded[22 + data_len] {
            0 => false,
            1 => true,
            other => return Err(FrameDecodingError::InvalidIsLast(other)),
        };
        Ok((BASE_FRAME_LEN + data_len, Self { id, number, data, is_last }))
    }

    /// Parses all frames carried by a batcher transaction.
    ///
    /// The data is `DERIVATION_VERSION_0 ++ frame+`. Every byte must belong to a frame, and
    /// at least one frame must be present.
    pub fn parse_frames(encoded: &[u8]) -> Result<Vec<Self>, FrameParseError> {
        let Some((version, mut data)) = encoded.split_first() else {
            return Err(FrameParseError::NoFrames);
        };
        if *version != DERIVATION_VERSION_0 {
            return Err(FrameParseError::UnsupportedVersion);
        }
        if data.is_empty() {
            return Err(FrameParseError::NoFrames);
        }

        let mut frames = Vec::new();
        while !data.is_empty() {
            let (frame_length, frame) =
                Self::decode(data).map_err(FrameParseError::FrameDecodingError)?;
            frames.push(frame);
            data = &data[frame_length..];
        }
        Ok(frames)
    }

    /// The size of the frame plus overhead, as counted by the channel bank.
    pub const fn size(&self) -> usize {
        self.data.len() + FRAME_OVERHEAD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_encode_frame_roundtrip() {
        let frame = Frame { id: [0xFF; 16], number: 0xEE, data: vec![0xDD; 50], is_last: true };
        let (consumed, frame_decoded) = Frame::decode(&frame.encode()).unwrap();
        assert_eq!(frame, frame_decoded);
        assert_eq!(consumed, BASE_FRAME_LEN + 50);
    }

    #[test]
    fn test_data_too_short() {
        let frame = Frame { id: [0xFF; 16], number: 0xEE, data: vec![0xDD; 22], is_last: true };
        let err = Frame::decode(&frame.encode()[..22]).unwrap_err();
        assert_eq!(err, FrameDecodingError::DataTooShort(22));
    }

    #[test]
    fn test_decode_exceeds_max_data_len() {
        let frame = Frame {
            id: [0xFF; 16],
            number: 0xEE,
            data: vec![0xDD; MAX_FRAME_LEN + 1],
            is_last: true,
        };
        let err = Frame::decode(&frame.encode()).unwrap_err();
        assert_eq!(err, FrameDecodingError::DataTooLarge(MAX_FRAME_LEN + 1));
    }

    #[test]
    fn test_decode_length_past_end() {
        let frame = Frame { id: [0xFF; 16], number: 0xEE, data: vec![0xDD; 50], is_last: true };
        let mut encoded = frame.encode();
        encoded[18..22].copy_from_slice(&51u32.to_be_bytes());
        assert_eq!(Frame::decode(&encoded).unwrap_err(), FrameDecodingError::DataTooLarge(51));
    }

    #[test]
    fn test_decode_invalid_is_last() {
        let frame = Frame { id: [0xFF; 16], number: 1, data: vec![0xDD; 4], is_last: true };
        let mut encoded = frame.encode();
        let last = encoded.len() - 1;
        encoded[last] = 2;
        assert_eq!(Frame::decode(&encoded).unwrap_err(), FrameDecodingError::InvalidIsLast(2));
    }

    #[test]
    fn test_parse_many() {
        let frame = Frame { id: [0xFF; 16], number: 0xEE, data: vec![0xDD; 50], is_last: true };
        let mut bytes = vec![DERIVATION_VERSION_0];
        (0..5).for_each(|_| bytes.extend_from_slice(&frame.encode()));

        let frames = Frame::parse_frames(&bytes).unwrap();
        assert_eq!(frames, vec![frame; 5]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Frame::parse_frames(&[]), Err(FrameParseError::NoFrames));
        assert_eq!(Frame::parse_frames(&[DERIVATION_VERSION_0]), Err(FrameParseError::NoFrames));
        assert_eq!(Frame::parse_frames(&[1, 2, 3]), Err(FrameParseError::UnsupportedVersion));

        let frame = Frame { id: [0xAA; 16], number: 0, data: vec![1, 2, 3], is_last: false };
        let mut bytes = vec![DERIVATION_VERSION_0];
        bytes.extend_from_slice(&frame.encode());
        bytes.push(0xFF);
        assert_eq!(
            Frame::parse_frames(&bytes),
            Err(FrameParseError::FrameDecodingError(FrameDecodingError::DataTooShort(1)))
        );
    }

    proptest::proptest! {
        #[test]
        fn test_parse_frames_arbitrary_input(data in proptest::collection::vec(proptest::num::u8::ANY, 0..512)) {
            let _ = Frame::parse_frames(&data);
        }

        #[test]
        fn test_decode_consumes_whole_frame(
            number in proptest::num::u16::ANY,
            data in proptest::collection::vec(proptest::num::u8::ANY, 0..256),
            is_last in proptest::bool::ANY,
        ) {
            let frame = Frame::new([7; 16], number, data, is_last);
            let mut encoded = frame.encode();
            encoded.extend_from_slice(&[0xAB; 3]);
            let (consumed, decoded) = Frame::decode(&encoded).unwrap();
            proptest::prop_assert_eq!(consumed, encoded.len() - 3);
            proptest::prop_assert_eq!(decoded, frame);
        }
    }
}
