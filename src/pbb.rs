//! Provider Backbone Bridge (IEEE 802.1ah) I-TAG codec
//!
//! PBB is a MAC-in-MAC encapsulation: the 18-byte backbone tag carries a
//! 24-bit service identifier, the encapsulated customer MAC pair and the
//! ethertype of the inner frame.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{LayerError, Result};
use crate::layer::LayerType;
use crate::registry::LayerRegistry;
use crate::wire::SerializeBuffer;

/// Fixed size of the 802.1ah backbone tag.
pub const PBB_TAG_LEN: usize = 18;

/// Decoded 802.1ah I-TAG.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PbbTag {
    /// I-PCP, 3 bits.
    pub priority: u8,
    /// I-DEI drop-eligible indicator.
    pub drop_eligible: bool,
    /// UCA bit: customer addresses are in use.
    pub use_customer_address: bool,
    /// I-SID, 24 bits; the top byte is always zero.
    pub service_identifier: u32,
    pub dst_mac: [u8; 6],
    pub src_mac: [u8; 6],
    /// Ethertype of the encapsulated frame.
    pub ether_type: u16,
    pub contents: Bytes,
    pub payload: Bytes,
}

impl PbbTag {
    /// Decode an I-TAG from the front of `data`.
    ///
    /// Rejects frames whose two low-order reserved bits of the first tag
    /// byte are nonzero.
    pub fn decode(data: &Bytes) -> Result<Self> {
        if data.len() < PBB_TAG_LEN {
            return Err(LayerError::TruncatedHeader {
                needed: PBB_TAG_LEN,
                available: data.len(),
            });
        }
        if data[0] & 0x03 != 0 {
            return Err(LayerError::MalformedHeader {
                reason: "I-TAG TCI Res2 bits must be zero",
            });
        }
        let mut dst_mac = [0u8; 6];
        let mut src_mac = [0u8; 6];
        dst_mac.copy_from_slice(&data[4..10]);
        src_mac.copy_from_slice(&data[10..16]);
        Ok(Self {
            priority: data[0] >> 5,
            drop_eligible: data[0] & 0x10 != 0,
            use_customer_address: data[0] & 0x08 != 0,
            service_identifier: u32::from(data[1]) << 16
                | u32::from(data[2]) << 8
                | u32::from(data[3]),
            dst_mac,
            src_mac,
            ether_type: u16::from_be_bytes([data[16], data[17]]),
            contents: data.slice(..PBB_TAG_LEN),
            payload: data.slice(PBB_TAG_LEN..),
        })
    }

    /// Next layer is whatever the registry maps the inner ethertype to.
    pub fn next_layer_type(&self, registry: &LayerRegistry) -> LayerType {
        registry.layer_for_ethertype(self.ether_type)
    }

    /// Prepend the 18-byte tag in front of the already-serialized payload.
    pub fn serialize(&self, buf: &mut SerializeBuffer) -> Result<()> {
        let bytes = buf.prepend_bytes(PBB_TAG_LEN);
        let mut first = self.priority << 5;
        if self.drop_eligible {
            first |= 0x10;
        }
        if self.use_customer_address {
            first |= 0x08;
        }
        bytes[0] = first;
        bytes[1] = (self.service_identifier >> 16) as u8;
        bytes[2] = (self.service_identifier >> 8) as u8;
        bytes[3] = self.service_identifier as u8;
        bytes[4..10].copy_from_slice(&self.dst_mac);
        bytes[10..16].copy_from_slice(&self.src_mac);
        bytes[16..18].copy_from_slice(&self.ether_type.to_be_bytes());
        Ok(())
    }
}
