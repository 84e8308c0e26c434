//! 802.11 frame adapter for FCS-less payloads
//!
//! CAPWAP and LWAPP tunnel 802.11 frames with the trailing frame check
//! sequence already stripped. Generic 802.11 decoders expect an
//! FCS-terminated frame, so this adapter synthesizes a correct CRC-32 on
//! decode and strips it again on encode.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{LayerError, Result};
use crate::layer::LayerType;
use crate::wire::SerializeBuffer;

/// CRC-32 (IEEE polynomial) over `data`, as used for the 802.11 FCS.
pub fn fcs(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// An 802.11 frame missing its FCS.
///
/// Decode never rejects input: the payload is the input with a freshly
/// computed little-endian FCS appended, so it always passes a downstream
/// 802.11 decoder's checksum gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dot11NoFcs {
    pub contents: Bytes,
    pub payload: Bytes,
}

impl Dot11NoFcs {
    pub fn decode(data: &Bytes) -> Result<Self> {
        let mut payload = Vec::with_capacity(data.len() + 4);
        payload.extend_from_slice(data);
        payload.extend_from_slice(&fcs(data).to_le_bytes());
        Ok(Self {
            contents: Bytes::new(),
            payload: Bytes::from(payload),
        })
    }

    pub fn next_layer_type(&self) -> LayerType {
        LayerType::Dot11
    }

    /// Drop the trailing 4 FCS bytes from the frame serialized so far,
    /// reversing the synthesis done on decode.
    pub fn serialize(&self, buf: &mut SerializeBuffer) -> Result<()> {
        if buf.len() < 4 {
            return Err(LayerError::BufferTooShort {
                needed: 4,
                available: buf.len(),
            });
        }
        let frame = buf.bytes().to_vec();
        buf.clear();
        let stripped = frame.len() - 4;
        buf.append_bytes(stripped).copy_from_slice(&frame[..stripped]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_appends_valid_fcs() {
        let data = Bytes::from_static(&[0x08, 0x01, 0x00, 0x00, 1, 2, 3, 4, 5, 6]);
        let layer = Dot11NoFcs::decode(&data).unwrap();
        assert_eq!(layer.payload.len(), data.len() + 4);
        assert_eq!(&layer.payload[..data.len()], &data[..]);
        let trailer = u32::from_le_bytes(layer.payload[data.len()..].try_into().unwrap());
        assert_eq!(trailer, fcs(&data));
        assert_eq!(layer.next_layer_type(), LayerType::Dot11);
    }

    #[test]
    fn test_decode_empty_input() {
        let layer = Dot11NoFcs::decode(&Bytes::new()).unwrap();
        assert_eq!(layer.payload.len(), 4);
        assert_eq!(&layer.payload[..], &fcs(&[]).to_le_bytes());
    }

    #[test]
    fn test_serialize_strips_fcs() {
        let data = Bytes::from_static(&[0xaa, 0xbb, 0xcc]);
        let layer = Dot11NoFcs::decode(&data).unwrap();
        let mut buf = SerializeBuffer::new();
        let n = layer.payload.len();
        buf.append_bytes(n).copy_from_slice(&layer.payload);
        layer.serialize(&mut buf).unwrap();
        assert_eq!(buf.bytes(), &data[..]);
    }

    #[test]
    fn test_serialize_short_buffer() {
        let layer = Dot11NoFcs::decode(&Bytes::new()).unwrap();
        let mut buf = SerializeBuffer::new();
        buf.append_bytes(3);
        assert_eq!(
            layer.serialize(&mut buf),
            Err(LayerError::BufferTooShort {
                needed: 4,
                available: 3
            })
        );
    }
}
