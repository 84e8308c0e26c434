//! Closed set of decodable layers
//!
//! The seven header kinds this crate decodes form a fixed set, so dispatch
//! is a tagged enum with one `match` per operation rather than open-ended
//! trait objects.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::capwap::{CapwapControlHeader, CapwapDataKeepAlive, CapwapHeader};
use crate::dot11::Dot11NoFcs;
use crate::error::Result;
use crate::lwapp::{LwappControlHeader, LwappHeader};
use crate::pbb::PbbTag;
use crate::registry::LayerRegistry;
use crate::wire::SerializeBuffer;

/// Identifier for every layer this crate can decode or hand off to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerType {
    Pbb,
    Lwapp,
    LwappControl,
    CapwapControl,
    CapwapData,
    CapwapControlHeader,
    CapwapDataKeepAlive,
    Dot11NoFcs,
    /// 802.1Q / 802.1ad tag; decoded by the host pipeline.
    Dot1Q,
    /// Generic 802.11 frame; decoded by the host pipeline.
    Dot11,
    /// Opaque bytes for the host pipeline.
    Payload,
    /// Fragment payload; reassembly happens outside this crate.
    Fragment,
}

impl LayerType {
    /// True for layer types this crate hands off rather than decodes.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LayerType::Dot1Q | LayerType::Dot11 | LayerType::Payload | LayerType::Fragment
        )
    }
}

/// A decoded layer, one variant per header kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layer {
    Pbb(PbbTag),
    Lwapp(LwappHeader),
    LwappControl(LwappControlHeader),
    CapwapControl(CapwapHeader),
    CapwapData(CapwapHeader),
    CapwapControlHeader(CapwapControlHeader),
    CapwapDataKeepAlive(CapwapDataKeepAlive),
    Dot11NoFcs(Dot11NoFcs),
}

impl Layer {
    pub fn layer_type(&self) -> LayerType {
        match self {
            Layer::Pbb(_) => LayerType::Pbb,
            Layer::Lwapp(_) => LayerType::Lwapp,
            Layer::LwappControl(_) => LayerType::LwappControl,
            Layer::CapwapControl(_) => LayerType::CapwapControl,
            Layer::CapwapData(_) => LayerType::CapwapData,
            Layer::CapwapControlHeader(_) => LayerType::CapwapControlHeader,
            Layer::CapwapDataKeepAlive(_) => LayerType::CapwapDataKeepAlive,
            Layer::Dot11NoFcs(_) => LayerType::Dot11NoFcs,
        }
    }

    /// The header bytes this layer consumed.
    pub fn contents(&self) -> &Bytes {
        match self {
            Layer::Pbb(l) => &l.contents,
            Layer::Lwapp(l) => &l.contents,
            Layer::LwappControl(l) => &l.contents,
            Layer::CapwapControl(l) | Layer::CapwapData(l) => &l.contents,
            Layer::CapwapControlHeader(l) => &l.contents,
            Layer::CapwapDataKeepAlive(l) => &l.contents,
            Layer::Dot11NoFcs(l) => &l.contents,
        }
    }

    /// The bytes left for the next layer.
    pub fn payload(&self) -> &Bytes {
        match self {
            Layer::Pbb(l) => &l.payload,
            Layer::Lwapp(l) => &l.payload,
            Layer::LwappControl(l) => &l.payload,
            Layer::CapwapControl(l) | Layer::CapwapData(l) => &l.payload,
            Layer::CapwapControlHeader(l) => &l.payload,
            Layer::CapwapDataKeepAlive(l) => &l.payload,
            Layer::Dot11NoFcs(l) => &l.payload,
        }
    }

    /// What decodes after this layer. Only PBB consults the registry (its
    /// next layer comes from the inner ethertype).
    pub fn next_layer_type(&self, registry: &LayerRegistry) -> LayerType {
        match self {
            Layer::Pbb(l) => l.next_layer_type(registry),
            Layer::Lwapp(l) => l.next_layer_type(),
            Layer::LwappControl(l) => l.next_layer_type(),
            Layer::CapwapControl(l) | Layer::CapwapData(l) => l.next_layer_type(),
            Layer::CapwapControlHeader(l) => l.next_layer_type(),
            Layer::CapwapDataKeepAlive(l) => l.next_layer_type(),
            Layer::Dot11NoFcs(l) => l.next_layer_type(),
        }
    }

    /// Prepend this layer's header in front of the payload already in `buf`.
    pub fn serialize(&self, buf: &mut SerializeBuffer) -> Result<()> {
        match self {
            Layer::Pbb(l) => l.serialize(buf),
            Layer::Lwapp(l) => l.serialize(buf),
            Layer::LwappControl(l) => l.serialize(buf),
            Layer::CapwapControl(l) | Layer::CapwapData(l) => l.serialize(buf),
            Layer::CapwapControlHeader(l) => l.serialize(buf),
            Layer::CapwapDataKeepAlive(l) => l.serialize(buf),
            Layer::Dot11NoFcs(l) => l.serialize(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_classification() {
        assert!(LayerType::Payload.is_terminal());
        assert!(LayerType::Fragment.is_terminal());
        assert!(LayerType::Dot11.is_terminal());
        assert!(!LayerType::Lwapp.is_terminal());
        assert!(!LayerType::CapwapData.is_terminal());
    }

    #[test]
    fn test_layer_type_matches_variant() {
        let layer = Layer::Dot11NoFcs(Dot11NoFcs::decode(&Bytes::from_static(&[1, 2])).unwrap());
        assert_eq!(layer.layer_type(), LayerType::Dot11NoFcs);
        assert!(layer.contents().is_empty());
        assert_eq!(layer.payload().len(), 6);
    }
}
