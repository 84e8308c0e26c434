//! Layer registry and decode-chain driver
//!
//! The registry maps ethertypes to layer types. It is built once at startup
//! and never mutated afterwards; the host passes it by reference wherever a
//! lookup is needed. The chain driver walks a byte buffer layer by layer
//! until it reaches a type owned by the host pipeline or a decode fails.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::{debug, trace};

use crate::capwap::{CapwapChannel, CapwapControlHeader, CapwapDataKeepAlive, CapwapHeader};
use crate::dot11::Dot11NoFcs;
use crate::error::{LayerError, Result};
use crate::layer::{Layer, LayerType};
use crate::lwapp::{LwappControlHeader, LwappHeader};
use crate::pbb::PbbTag;

/// 802.1Q C-TAG.
pub const ETHERTYPE_DOT1Q: u16 = 0x8100;
/// 802.1ad S-TAG, decoded like an 802.1Q tag.
pub const ETHERTYPE_DOT1Q_STAG: u16 = 0x88a8;
/// 802.1ah I-TAG (PBB).
pub const ETHERTYPE_DOT1Q_ITAG: u16 = 0x88e7;
/// LWAPP over Ethernet.
pub const ETHERTYPE_LWAPP: u16 = 0x88bb;

/// Immutable ethertype-to-layer table.
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    ethertypes: HashMap<u16, LayerType>,
}

impl LayerRegistry {
    /// Build the registry with the standard entries installed.
    pub fn new() -> Self {
        let mut ethertypes = HashMap::new();
        ethertypes.insert(ETHERTYPE_DOT1Q, LayerType::Dot1Q);
        ethertypes.insert(ETHERTYPE_DOT1Q_STAG, LayerType::Dot1Q);
        ethertypes.insert(ETHERTYPE_DOT1Q_ITAG, LayerType::Pbb);
        ethertypes.insert(ETHERTYPE_LWAPP, LayerType::Lwapp);
        Self { ethertypes }
    }

    /// The layer following a given ethertype; unknown ethertypes are opaque
    /// payload.
    pub fn layer_for_ethertype(&self, ether_type: u16) -> LayerType {
        self.ethertypes
            .get(&ether_type)
            .copied()
            .unwrap_or(LayerType::Payload)
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a single layer of the given type from `data`.
///
/// Terminal layer types have no decoder here and are reported as malformed;
/// the chain driver never asks for them.
pub fn decode_layer(layer_type: LayerType, data: &Bytes) -> Result<Layer> {
    match layer_type {
        LayerType::Pbb => Ok(Layer::Pbb(PbbTag::decode(data)?)),
        LayerType::Lwapp => Ok(Layer::Lwapp(LwappHeader::decode(data)?)),
        LayerType::LwappControl => Ok(Layer::LwappControl(LwappControlHeader::decode(data)?)),
        LayerType::CapwapControl => Ok(Layer::CapwapControl(CapwapHeader::decode(
            data,
            CapwapChannel::Control,
        )?)),
        LayerType::CapwapData => Ok(Layer::CapwapData(CapwapHeader::decode(
            data,
            CapwapChannel::Data,
        )?)),
        LayerType::CapwapControlHeader => Ok(Layer::CapwapControlHeader(
            CapwapControlHeader::decode(data)?,
        )),
        LayerType::CapwapDataKeepAlive => Ok(Layer::CapwapDataKeepAlive(
            CapwapDataKeepAlive::decode(data)?,
        )),
        LayerType::Dot11NoFcs => Ok(Layer::Dot11NoFcs(Dot11NoFcs::decode(data)?)),
        _ => Err(LayerError::MalformedHeader {
            reason: "layer type has no decoder in this crate",
        }),
    }
}

/// Result of walking a decode chain.
#[derive(Debug, Clone)]
pub struct DecodedPacket {
    /// Successfully decoded layers, outermost first.
    pub layers: Vec<Layer>,
    /// Bytes left over when the walk stopped.
    pub trailing: Bytes,
    /// The layer type the trailing bytes belong to.
    pub trailing_type: LayerType,
    /// Set when the walk stopped on a decode failure rather than a handoff.
    pub error: Option<LayerError>,
}

impl DecodedPacket {
    /// First decoded layer of the given type, if any.
    pub fn layer(&self, layer_type: LayerType) -> Option<&Layer> {
        self.layers.iter().find(|l| l.layer_type() == layer_type)
    }
}

/// Walk the decode chain starting at `first` until a terminal type or a
/// decode failure. A failure is recorded, not propagated: the layers
/// decoded before it are kept, matching per-frame error semantics.
pub fn decode_chain(registry: &LayerRegistry, first: LayerType, data: Bytes) -> DecodedPacket {
    let mut layers = Vec::new();
    let mut layer_type = first;
    let mut rest = data;
    while !layer_type.is_terminal() {
        match decode_layer(layer_type, &rest) {
            Ok(layer) => {
                trace!(?layer_type, consumed = layer.contents().len(), "decoded layer");
                let next = layer.next_layer_type(registry);
                rest = layer.payload().clone();
                layers.push(layer);
                layer_type = next;
            }
            Err(error) => {
                debug!(?layer_type, %error, "decode failed");
                return DecodedPacket {
                    layers,
                    trailing: rest,
                    trailing_type: layer_type,
                    error: Some(error),
                };
            }
        }
    }
    DecodedPacket {
        layers,
        trailing: rest,
        trailing_type: layer_type,
        error: None,
    }
}
