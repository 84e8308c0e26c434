//! # capwap-layers
//!
//! Codecs for the chain of wireless tunneling and bridging headers carried
//! over Ethernet/IP links: the Provider Backbone Bridge (802.1ah) I-TAG, the
//! legacy LWAPP transport and control headers, the CAPWAP control/data
//! transport header with its DTLS-wrapped and fragmented variants, the
//! CAPWAP data-channel keep-alive and control-message envelope, and an
//! adapter that recovers a bare 802.11 frame from either a radiotap capture
//! or an FCS-stripped tunnel payload.
//!
//! ## Architecture
//!
//! - `pbb`, `lwapp`, `capwap`, `dot11`: one codec module per protocol family
//! - `radiotap`: capture-artifact removal (alignment padding, trailing FCS)
//! - `layer`: the closed [`Layer`]/[`LayerType`] set the codecs decode into
//! - `registry`: ethertype table and the decode-chain driver
//! - `wire`: back-to-front serialize buffer and bytewise mask operations
//! - `error`: per-frame error kinds
//!
//! Every operation is a pure, synchronous single-frame transformation with
//! no shared mutable state; decoding independent frames concurrently needs
//! no locking. Decode slices a header prefix off an immutable buffer and
//! names the next layer; encode prepends header bytes in front of an
//! already-serialized payload, recomputing length and checksum fields from
//! it.

pub mod capwap;
pub mod dot11;
pub mod error;
pub mod layer;
pub mod lwapp;
pub mod pbb;
pub mod radiotap;
pub mod registry;
pub mod wire;

pub use capwap::{
    CapwapChannel, CapwapControlHeader, CapwapDataKeepAlive, CapwapHeader, CapwapPreamble,
    WirelessInfo,
};
pub use dot11::Dot11NoFcs;
pub use error::{LayerError, Result};
pub use layer::{Layer, LayerType};
pub use lwapp::{LwappControlHeader, LwappFlags, LwappHeader};
pub use pbb::PbbTag;
pub use radiotap::{extract_dot11, CaptureFlags};
pub use registry::{decode_chain, decode_layer, DecodedPacket, LayerRegistry};
pub use wire::SerializeBuffer;
