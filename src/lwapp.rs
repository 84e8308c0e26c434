//! LWAPP transport and control header codecs
//!
//! LWAPP is the CAPWAP predecessor. The 6-byte transport header decides the
//! next layer from its flag bits: fragments stop structured parsing, control
//! packets carry an 8-byte control sub-header, anything else is an 802.11
//! frame with its FCS stripped.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{LayerError, Result};
use crate::layer::LayerType;
use crate::wire::SerializeBuffer;

/// Size of the LWAPP transport header.
pub const LWAPP_HEADER_LEN: usize = 6;
/// Size of the LWAPP control sub-header.
pub const LWAPP_CONTROL_LEN: usize = 8;

/// The packed LWAPP flags byte: version, radio id and the C/F/L bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LwappFlags(pub u8);

impl LwappFlags {
    /// Build a flags byte from its sub-fields.
    pub fn new(version: u8, radio_id: u8, control: bool, fragment: bool, more_fragments: bool) -> Self {
        let mut raw = (version & 0x03) << 6 | (radio_id & 0x07) << 3;
        if control {
            raw |= 0x04;
        }
        if fragment {
            raw |= 0x02;
        }
        if more_fragments {
            raw |= 0x01;
        }
        Self(raw)
    }

    /// Protocol version, 2 bits.
    pub fn version(self) -> u8 {
        self.0 >> 6
    }

    /// Radio id, 3 bits.
    pub fn radio_id(self) -> u8 {
        (self.0 & 0x38) >> 3
    }

    /// C bit: the packet is a control message.
    pub fn is_control(self) -> bool {
        self.0 & 0x04 != 0
    }

    /// F bit: the packet is a fragment.
    pub fn is_fragment(self) -> bool {
        self.0 & 0x02 != 0
    }

    /// L bit: the packet is NOT the last fragment.
    pub fn more_fragments(self) -> bool {
        self.0 & 0x01 != 0
    }
}

/// LWAPP transport header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LwappHeader {
    pub flags: LwappFlags,
    pub frag_id: u8,
    /// Payload length as seen on the wire. Recomputed from the serialized
    /// payload on encode, never copied back out.
    pub length: u16,
    pub status_wlans: u16,
    pub contents: Bytes,
    pub payload: Bytes,
}

impl LwappHeader {
    /// Decode the 6-byte transport header from the front of `data`.
    pub fn decode(data: &Bytes) -> Result<Self> {
        if data.len() < LWAPP_HEADER_LEN {
            return Err(LayerError::TruncatedHeader {
                needed: LWAPP_HEADER_LEN,
                available: data.len(),
            });
        }
        Ok(Self {
            flags: LwappFlags(data[0]),
            frag_id: data[1],
            length: u16::from_be_bytes([data[2], data[3]]),
            status_wlans: u16::from_be_bytes([data[4], data[5]]),
            contents: data.slice(..LWAPP_HEADER_LEN),
            payload: data.slice(LWAPP_HEADER_LEN..),
        })
    }

    pub fn next_layer_type(&self) -> LayerType {
        if self.flags.is_fragment() {
            LayerType::Fragment
        } else if self.flags.is_control() {
            LayerType::LwappControl
        } else {
            LayerType::Dot11NoFcs
        }
    }

    /// Prepend the transport header. The length field is taken from the
    /// serialized payload currently in `buf`, not from `self.length`.
    pub fn serialize(&self, buf: &mut SerializeBuffer) -> Result<()> {
        let payload_len = buf.len() as u16;
        let bytes = buf.prepend_bytes(LWAPP_HEADER_LEN);
        bytes[0] = self.flags.0;
        bytes[1] = self.frag_id;
        bytes[2..4].copy_from_slice(&payload_len.to_be_bytes());
        bytes[4..6].copy_from_slice(&self.status_wlans.to_be_bytes());
        Ok(())
    }
}

/// LWAPP control sub-header, following a transport header with the C bit set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LwappControlHeader {
    pub message_type: u8,
    pub seq_num: u8,
    /// Recomputed from the serialized payload on encode.
    pub msg_element_length: u16,
    pub session_id: u32,
    pub contents: Bytes,
    pub payload: Bytes,
}

impl LwappControlHeader {
    pub fn decode(data: &Bytes) -> Result<Self> {
        if data.len() < LWAPP_CONTROL_LEN {
            return Err(LayerError::TruncatedHeader {
                needed: LWAPP_CONTROL_LEN,
                available: data.len(),
            });
        }
        Ok(Self {
            message_type: data[0],
            seq_num: data[1],
            msg_element_length: u16::from_be_bytes([data[2], data[3]]),
            session_id: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            contents: data.slice(..LWAPP_CONTROL_LEN),
            payload: data.slice(LWAPP_CONTROL_LEN..),
        })
    }

    pub fn next_layer_type(&self) -> LayerType {
        LayerType::Payload
    }

    pub fn serialize(&self, buf: &mut SerializeBuffer) -> Result<()> {
        let payload_len = buf.len() as u16;
        let bytes = buf.prepend_bytes(LWAPP_CONTROL_LEN);
        bytes[0] = self.message_type;
        bytes[1] = self.seq_num;
        bytes[2..4].copy_from_slice(&payload_len.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.session_id.to_be_bytes());
        Ok(())
    }
}
