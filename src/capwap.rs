//! CAPWAP transport header codecs
//!
//! Covers the 4-byte preamble (shared by the control and data channels), the
//! flag-driven optional fields that follow it, the data-channel keep-alive
//! message and the control-message envelope.
//!
//! Optional-field parsing is an ordered cursor walk: each field's presence is
//! decided by a flag read earlier in the same header, each variable-length
//! field is followed by zero padding up to the next 4-byte boundary, and
//! every read is preceded by a remaining-bytes check. The walk is written as
//! an explicit state machine so each transition's precondition is visible.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::{LayerError, Result};
use crate::layer::LayerType;
use crate::wire::SerializeBuffer;

/// Size of the fixed preamble.
pub const CAPWAP_PREAMBLE_LEN: usize = 4;
/// Size of the preamble plus the fragment id/offset fields (plaintext type).
pub const CAPWAP_FIXED_LEN: usize = 8;
/// Size of the control-message envelope.
pub const CAPWAP_CONTROL_HEADER_LEN: usize = 8;

/// Preamble flag bits (T/F/L/W/M/K), in wire position.
pub mod preamble_flags {
    /// Payload is a native 802.11 frame.
    pub const T: u32 = 0x0100;
    /// Packet is a fragment.
    pub const F: u32 = 0x0080;
    /// Packet is the last fragment.
    pub const L: u32 = 0x0040;
    /// Wireless-specific-information field is present.
    pub const W: u32 = 0x0020;
    /// Radio MAC address field is present.
    pub const M: u32 = 0x0010;
    /// Data channel keep-alive.
    pub const K: u32 = 0x0008;
}

/// The packed 32-bit CAPWAP preamble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapwapPreamble(pub u32);

impl CapwapPreamble {
    /// Pack a preamble from its sub-fields. `flags` is an OR of
    /// [`preamble_flags`] constants; out-of-range sub-fields are masked.
    pub fn from_parts(
        version: u8,
        wire_type: u8,
        header_length: u8,
        radio_id: u8,
        wireless_binding_id: u8,
        flags: u32,
    ) -> Self {
        Self(
            (u32::from(version) & 0x0f) << 28
                | (u32::from(wire_type) & 0x0f) << 24
                | (u32::from(header_length) & 0x1f) << 19
                | (u32::from(radio_id) & 0x1f) << 14
                | (u32::from(wireless_binding_id) & 0x1f) << 9
                | (flags & 0x01ff),
        )
    }

    /// Protocol version, 4 bits.
    pub fn version(self) -> u8 {
        (self.0 >> 28) as u8
    }

    /// Payload type, 4 bits: 0 = plaintext, 1 = DTLS.
    pub fn wire_type(self) -> u8 {
        (self.0 >> 24) as u8 & 0x0f
    }

    /// Header length in 4-byte words, 5 bits.
    pub fn header_length(self) -> u8 {
        (self.0 >> 19) as u8 & 0x1f
    }

    /// Radio id, 5 bits.
    pub fn radio_id(self) -> u8 {
        (self.0 >> 14) as u8 & 0x1f
    }

    /// Wireless binding id, 5 bits.
    pub fn wireless_binding_id(self) -> u8 {
        (self.0 >> 9) as u8 & 0x1f
    }

    pub fn native_frame(self) -> bool {
        self.0 & preamble_flags::T != 0
    }

    pub fn is_fragment(self) -> bool {
        self.0 & preamble_flags::F != 0
    }

    pub fn last_fragment(self) -> bool {
        self.0 & preamble_flags::L != 0
    }

    pub fn has_wireless_info(self) -> bool {
        self.0 & preamble_flags::W != 0
    }

    pub fn has_radio_mac(self) -> bool {
        self.0 & preamble_flags::M != 0
    }

    pub fn keep_alive(self) -> bool {
        self.0 & preamble_flags::K != 0
    }

    /// The 3 reserved flag bits.
    pub fn reserved(self) -> u8 {
        (self.0 & 0x07) as u8
    }

    /// Copy of the preamble with the header-length field replaced.
    pub fn with_header_length(self, words: u8) -> Self {
        Self(self.0 & !(0x1f << 19) | (u32::from(words) & 0x1f) << 19)
    }
}

/// Which CAPWAP channel a header was received on. The wire layout is the
/// same; the channel decides what decodes after the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapwapChannel {
    Control,
    Data,
}

/// Wireless-specific-information field, selected by its leading subtype byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WirelessInfo {
    /// Subtype 1: old-draft IEEE 802.11 format with an explicit length byte.
    Draft80211(Bytes),
    /// Subtype 4: fixed 4-byte payload (RFC 5416 binding).
    Rfc5415([u8; 4]),
}

/// States of the optional-field cursor walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Preamble,
    FragmentFields,
    MacField,
    WirelessField,
    Done,
}

fn align4(n: usize) -> usize {
    (n + 3) & !3
}

fn need(data: &Bytes, n: usize) -> Result<()> {
    if data.len() < n {
        return Err(LayerError::TruncatedHeader {
            needed: n,
            available: data.len(),
        });
    }
    Ok(())
}

/// Decoded CAPWAP transport header, control or data channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapwapHeader {
    pub channel: CapwapChannel,
    pub preamble: CapwapPreamble,
    /// Only meaningful when the preamble type is 0 (plaintext).
    pub fragment_id: u16,
    /// Fragment offset in 8-byte units (the wire field shifted right by 3).
    pub frag_offset: u16,
    /// Present iff the M flag is set.
    pub radio_mac_address: Option<Bytes>,
    /// Present iff the W flag is set.
    pub wireless_specific_info: Option<WirelessInfo>,
    pub contents: Bytes,
    pub payload: Bytes,
}

impl CapwapHeader {
    /// Decode a CAPWAP header from the front of `data`.
    ///
    /// Plaintext fragments stop after the fragment fields and leave the
    /// remainder as opaque fragment payload. DTLS-wrapped packets keep only
    /// the 4-byte preamble.
    pub fn decode(data: &Bytes, channel: CapwapChannel) -> Result<Self> {
        let mut state = ParseState::Preamble;
        let mut cur = 0usize;
        let mut preamble = CapwapPreamble::default();
        let mut fragment_id = 0u16;
        let mut frag_offset = 0u16;
        let mut radio_mac_address = None;
        let mut wireless_specific_info = None;

        while state != ParseState::Done {
            state = match state {
                ParseState::Preamble => {
                    need(data, CAPWAP_PREAMBLE_LEN)?;
                    preamble = CapwapPreamble(u32::from_be_bytes([
                        data[0], data[1], data[2], data[3],
                    ]));
                    cur = CAPWAP_PREAMBLE_LEN;
                    match preamble.wire_type() {
                        0 => ParseState::FragmentFields,
                        // DTLS: the header is the bare preamble.
                        1 => ParseState::Done,
                        t => return Err(LayerError::UnknownCapwapType(t)),
                    }
                }
                ParseState::FragmentFields => {
                    need(data, CAPWAP_FIXED_LEN)?;
                    fragment_id = u16::from_be_bytes([data[4], data[5]]);
                    frag_offset = u16::from_be_bytes([data[6], data[7]]) >> 3;
                    cur = CAPWAP_FIXED_LEN;
                    if preamble.is_fragment() {
                        // No optional fields on fragments; the rest is
                        // opaque until reassembly.
                        ParseState::Done
                    } else {
                        ParseState::MacField
                    }
                }
                ParseState::MacField => {
                    if preamble.has_radio_mac() {
                        need(data, cur + 1)?;
                        let mac_len = data[cur] as usize;
                        need(data, cur + 1 + mac_len)?;
                        radio_mac_address = Some(data.slice(cur + 1..cur + 1 + mac_len));
                        cur = align4(cur + 1 + mac_len);
                    }
                    ParseState::WirelessField
                }
                ParseState::WirelessField => {
                    if preamble.has_wireless_info() {
                        need(data, cur + 1)?;
                        match data[cur] {
                            1 => {
                                need(data, cur + 2)?;
                                let len = data[cur + 1] as usize;
                                need(data, cur + 2 + len)?;
                                wireless_specific_info = Some(WirelessInfo::Draft80211(
                                    data.slice(cur + 2..cur + 2 + len),
                                ));
                                cur = align4(cur + 2 + len);
                            }
                            4 => {
                                need(data, cur + 5)?;
                                let mut info = [0u8; 4];
                                info.copy_from_slice(&data[cur + 1..cur + 5]);
                                wireless_specific_info = Some(WirelessInfo::Rfc5415(info));
                                cur = align4(cur + 5);
                            }
                            sub => return Err(LayerError::UnknownWirelessInfo(sub)),
                        }
                    }
                    ParseState::Done
                }
                ParseState::Done => unreachable!(),
            };
        }

        // Alignment padding after the last optional field must be on the wire.
        need(data, cur)?;
        Ok(Self {
            channel,
            preamble,
            fragment_id,
            frag_offset,
            radio_mac_address,
            wireless_specific_info,
            contents: data.slice(..cur),
            payload: data.slice(cur..),
        })
    }

    pub fn next_layer_type(&self) -> LayerType {
        if self.preamble.wire_type() == 1 {
            // Payload is a DTLS record.
            return LayerType::Payload;
        }
        if self.preamble.is_fragment() {
            return LayerType::Fragment;
        }
        match self.channel {
            CapwapChannel::Control => LayerType::CapwapControlHeader,
            CapwapChannel::Data if self.preamble.keep_alive() => LayerType::CapwapDataKeepAlive,
            // Payload format depends on the WTP frame tunnel mode.
            CapwapChannel::Data => LayerType::Payload,
        }
    }

    /// Prepend the header. Optional fields are emitted per the preamble's M
    /// and W flags; alignment padding is zero-filled. The header-length
    /// field is recomputed from the serialized header size.
    pub fn serialize(&self, buf: &mut SerializeBuffer) -> Result<()> {
        let mut hdr = vec![0u8; CAPWAP_PREAMBLE_LEN];
        match self.preamble.wire_type() {
            0 => {
                hdr.extend_from_slice(&self.fragment_id.to_be_bytes());
                hdr.extend_from_slice(&((self.frag_offset & 0x1fff) << 3).to_be_bytes());
                if !self.preamble.is_fragment() {
                    if self.preamble.has_radio_mac() {
                        let mac = self.radio_mac_address.as_ref().ok_or(
                            LayerError::MalformedHeader {
                                reason: "M flag set without a radio MAC address",
                            },
                        )?;
                        if mac.len() > 255 {
                            return Err(LayerError::MalformedHeader {
                                reason: "radio MAC address exceeds 255 bytes",
                            });
                        }
                        hdr.push(mac.len() as u8);
                        hdr.extend_from_slice(mac);
                        hdr.resize(align4(hdr.len()), 0);
                    }
                    if self.preamble.has_wireless_info() {
                        let info = self.wireless_specific_info.as_ref().ok_or(
                            LayerError::MalformedHeader {
                                reason: "W flag set without wireless specific information",
                            },
                        )?;
                        match info {
                            WirelessInfo::Draft80211(bytes) => {
                                if bytes.len() > 255 {
                                    return Err(LayerError::MalformedHeader {
                                        reason: "wireless specific information exceeds 255 bytes",
                                    });
                                }
                                hdr.push(1);
                                hdr.push(bytes.len() as u8);
                                hdr.extend_from_slice(bytes);
                            }
                            WirelessInfo::Rfc5415(bytes) => {
                                hdr.push(4);
                                hdr.extend_from_slice(bytes);
                            }
                        }
                        hdr.resize(align4(hdr.len()), 0);
                    }
                }
            }
            1 => {}
            t => return Err(LayerError::UnknownCapwapType(t)),
        }
        let preamble = self.preamble.with_header_length((hdr.len() / 4) as u8);
        hdr[..CAPWAP_PREAMBLE_LEN].copy_from_slice(&preamble.0.to_be_bytes());
        buf.prepend_bytes(hdr.len()).copy_from_slice(&hdr);
        Ok(())
    }
}

/// CAPWAP data-channel keep-alive message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapwapDataKeepAlive {
    /// Total length of the message elements including this field.
    pub message_element_length: u16,
    pub contents: Bytes,
    pub payload: Bytes,
}

impl CapwapDataKeepAlive {
    pub fn decode(data: &Bytes) -> Result<Self> {
        need(data, 2)?;
        let length = u16::from_be_bytes([data[0], data[1]]) as usize;
        if length < 2 {
            return Err(LayerError::MalformedHeader {
                reason: "keep-alive message element length below 2",
            });
        }
        need(data, length)?;
        Ok(Self {
            message_element_length: length as u16,
            contents: data.slice(..2),
            payload: data.slice(2..length),
        })
    }

    pub fn next_layer_type(&self) -> LayerType {
        LayerType::Payload
    }

    pub fn serialize(&self, buf: &mut SerializeBuffer) -> Result<()> {
        let total = buf.len() as u16 + 2;
        buf.prepend_bytes(2).copy_from_slice(&total.to_be_bytes());
        Ok(())
    }
}

/// CAPWAP control-message envelope, decoded from a fully-reassembled control
/// packet.
///
/// The wire-format message element length counts from byte 5 of the header,
/// so the payload ends `5 + msg_element_length` bytes in - it overlaps the
/// length field's own three preceding bytes by definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapwapControlHeader {
    pub message_type: u32,
    pub seq_num: u8,
    pub msg_element_length: u16,
    pub contents: Bytes,
    pub payload: Bytes,
}

impl CapwapControlHeader {
    pub fn decode(data: &Bytes) -> Result<Self> {
        need(data, CAPWAP_CONTROL_HEADER_LEN)?;
        let msg_element_length = u16::from_be_bytes([data[5], data[6]]);
        if msg_element_length < 3 {
            return Err(LayerError::MalformedHeader {
                reason: "control message element length below 3",
            });
        }
        let end = 5 + msg_element_length as usize;
        need(data, end)?;
        Ok(Self {
            message_type: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            seq_num: data[4],
            msg_element_length,
            contents: data.slice(..CAPWAP_CONTROL_HEADER_LEN),
            payload: data.slice(CAPWAP_CONTROL_HEADER_LEN..end),
        })
    }

    pub fn next_layer_type(&self) -> LayerType {
        LayerType::Payload
    }

    pub fn serialize(&self, buf: &mut SerializeBuffer) -> Result<()> {
        let msg_element_length = buf.len() as u16 + 3;
        let bytes = buf.prepend_bytes(CAPWAP_CONTROL_HEADER_LEN);
        bytes[0..4].copy_from_slice(&self.message_type.to_be_bytes());
        bytes[4] = self.seq_num;
        bytes[5..7].copy_from_slice(&msg_element_length.to_be_bytes());
        // byte 7 is the flags field, reserved as zero
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preamble_pack_unpack() {
        let pre = CapwapPreamble::from_parts(
            1,
            0,
            4,
            9,
            1,
            preamble_flags::T | preamble_flags::M | preamble_flags::K,
        );
        assert_eq!(pre.version(), 1);
        assert_eq!(pre.wire_type(), 0);
        assert_eq!(pre.header_length(), 4);
        assert_eq!(pre.radio_id(), 9);
        assert_eq!(pre.wireless_binding_id(), 1);
        assert!(pre.native_frame());
        assert!(pre.has_radio_mac());
        assert!(pre.keep_alive());
        assert!(!pre.is_fragment());
        assert!(!pre.has_wireless_info());
        assert_eq!(pre.reserved(), 0);
    }

    fn header_with_mac_and_info() -> Vec<u8> {
        let pre =
            CapwapPreamble::from_parts(0, 0, 6, 0, 1, preamble_flags::M | preamble_flags::W);
        let mut data = pre.0.to_be_bytes().to_vec();
        data.extend_from_slice(&[0x00, 0x07]); // fragment id 7
        data.extend_from_slice(&[0x00, 0x00]); // offset 0
        data.push(6); // MAC length
        data.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
        data.push(0); // pad 15 -> 16
        data.push(4); // wireless info subtype
        data.extend_from_slice(&[0xaa, 0xbb, 0xcc, 0xdd]);
        data.extend_from_slice(&[0, 0, 0]); // pad 21 -> 24
        data.extend_from_slice(&[0xfe, 0xed]); // payload
        data
    }

    #[test]
    fn test_decode_optional_fields_aligned_split() {
        let data = Bytes::from(header_with_mac_and_info());
        let hdr = CapwapHeader::decode(&data, CapwapChannel::Data).unwrap();
        assert_eq!(hdr.fragment_id, 7);
        assert_eq!(hdr.frag_offset, 0);
        assert_eq!(
            hdr.radio_mac_address.as_deref(),
            Some(&[1u8, 2, 3, 4, 5, 6][..])
        );
        assert_eq!(
            hdr.wireless_specific_info,
            Some(WirelessInfo::Rfc5415([0xaa, 0xbb, 0xcc, 0xdd]))
        );
        // cursor lands on the 4-byte boundary past the padded info field
        assert_eq!(hdr.contents.len(), 24);
        assert_eq!(hdr.contents.len() % 4, 0);
        assert_eq!(&hdr.payload[..], &[0xfe, 0xed]);
        assert_eq!(hdr.next_layer_type(), LayerType::Payload);
    }

    #[test]
    fn test_decode_draft_wireless_info() {
        let pre = CapwapPreamble::from_parts(0, 0, 4, 0, 1, preamble_flags::W);
        let mut data = pre.0.to_be_bytes().to_vec();
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.push(1); // old-draft subtype
        data.push(2); // explicit length
        data.extend_from_slice(&[0x11, 0x22]);
        // 12 bytes total, already aligned
        data.extend_from_slice(&[9, 9]);
        let hdr = CapwapHeader::decode(&Bytes::from(data), CapwapChannel::Data).unwrap();
        assert_eq!(
            hdr.wireless_specific_info,
            Some(WirelessInfo::Draft80211(Bytes::from_static(&[0x11, 0x22])))
        );
        assert_eq!(hdr.contents.len(), 12);
        assert_eq!(&hdr.payload[..], &[9, 9]);
    }

    #[test]
    fn test_unknown_wireless_subtype() {
        let pre = CapwapPreamble::from_parts(0, 0, 3, 0, 1, preamble_flags::W);
        let mut data = pre.0.to_be_bytes().to_vec();
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.push(7);
        let err = CapwapHeader::decode(&Bytes::from(data), CapwapChannel::Data).unwrap_err();
        assert_eq!(err, LayerError::UnknownWirelessInfo(7));
    }

    #[test]
    fn test_fragment_skips_optional_fields() {
        // M is set but must be ignored: fragments carry no optional fields.
        let pre = CapwapPreamble::from_parts(
            0,
            0,
            2,
            0,
            1,
            preamble_flags::F | preamble_flags::M,
        );
        let mut data = pre.0.to_be_bytes().to_vec();
        data.extend_from_slice(&[0x00, 0x01]); // fragment id
        data.extend_from_slice(&[0x00, 0x50]); // raw offset 0x50 -> 10
        data.extend_from_slice(&[1, 2, 3]);
        let hdr = CapwapHeader::decode(&Bytes::from(data), CapwapChannel::Data).unwrap();
        assert_eq!(hdr.frag_offset, 10);
        assert!(hdr.radio_mac_address.is_none());
        assert_eq!(hdr.contents.len(), 8);
        assert_eq!(&hdr.payload[..], &[1, 2, 3]);
        assert_eq!(hdr.next_layer_type(), LayerType::Fragment);
    }

    #[test]
    fn test_dtls_header_is_bare_preamble() {
        let pre = CapwapPreamble::from_parts(0, 1, 1, 0, 0, 0);
        let mut data = pre.0.to_be_bytes().to_vec();
        data.extend_from_slice(&[0x16, 0xfe, 0xfd]); // DTLS record start
        let hdr = CapwapHeader::decode(&Bytes::from(data), CapwapChannel::Control).unwrap();
        assert_eq!(hdr.contents.len(), 4);
        assert_eq!(&hdr.payload[..], &[0x16, 0xfe, 0xfd]);
        assert_eq!(hdr.next_layer_type(), LayerType::Payload);
    }

    #[test]
    fn test_unknown_preamble_type() {
        let pre = CapwapPreamble::from_parts(0, 3, 1, 0, 0, 0);
        let data = Bytes::from(pre.0.to_be_bytes().to_vec());
        let err = CapwapHeader::decode(&data, CapwapChannel::Data).unwrap_err();
        assert_eq!(err, LayerError::UnknownCapwapType(3));
    }

    #[test]
    fn test_truncated_mac_field() {
        let pre = CapwapPreamble::from_parts(0, 0, 4, 0, 1, preamble_flags::M);
        let mut data = pre.0.to_be_bytes().to_vec();
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.push(6); // claims 6 MAC bytes
        data.extend_from_slice(&[1, 2, 3]); // only 3 present
        let err = CapwapHeader::decode(&Bytes::from(data), CapwapChannel::Data).unwrap_err();
        assert_eq!(
            err,
            LayerError::TruncatedHeader {
                needed: 15,
                available: 12
            }
        );
    }

    #[test]
    fn test_control_next_layer() {
        let pre = CapwapPreamble::from_parts(0, 0, 2, 0, 1, 0);
        let mut data = pre.0.to_be_bytes().to_vec();
        data.extend_from_slice(&[0, 0, 0, 0]);
        let hdr = CapwapHeader::decode(&Bytes::from(data.clone()), CapwapChannel::Control).unwrap();
        assert_eq!(hdr.next_layer_type(), LayerType::CapwapControlHeader);

        let pre = CapwapPreamble::from_parts(0, 0, 2, 0, 1, preamble_flags::K);
        data[..4].copy_from_slice(&pre.0.to_be_bytes());
        let hdr = CapwapHeader::decode(&Bytes::from(data), CapwapChannel::Data).unwrap();
        assert_eq!(hdr.next_layer_type(), LayerType::CapwapDataKeepAlive);
    }

    #[test]
    fn test_header_round_trip() {
        let data = Bytes::from(header_with_mac_and_info());
        let hdr = CapwapHeader::decode(&data, CapwapChannel::Data).unwrap();
        let mut buf = SerializeBuffer::new();
        buf.append_bytes(2).copy_from_slice(&hdr.payload);
        hdr.serialize(&mut buf).unwrap();
        assert_eq!(buf.bytes(), &data[..]);

        let redecoded = CapwapHeader::decode(&Bytes::copy_from_slice(buf.bytes()), CapwapChannel::Data).unwrap();
        assert_eq!(redecoded.preamble, hdr.preamble);
        assert_eq!(redecoded.preamble.header_length(), 6);
        assert_eq!(redecoded.radio_mac_address, hdr.radio_mac_address);
        assert_eq!(redecoded.wireless_specific_info, hdr.wireless_specific_info);
    }

    #[test]
    fn test_serialize_flag_without_field() {
        let pre = CapwapPreamble::from_parts(0, 0, 2, 0, 1, preamble_flags::M);
        let hdr = CapwapHeader {
            channel: CapwapChannel::Data,
            preamble: pre,
            fragment_id: 0,
            frag_offset: 0,
            radio_mac_address: None,
            wireless_specific_info: None,
            contents: Bytes::new(),
            payload: Bytes::new(),
        };
        let mut buf = SerializeBuffer::new();
        assert_eq!(
            hdr.serialize(&mut buf),
            Err(LayerError::MalformedHeader {
                reason: "M flag set without a radio MAC address"
            })
        );
    }

    #[test]
    fn test_keep_alive_decode() {
        let data = Bytes::from_static(&[0x00, 0x06, 1, 2, 3, 4, 0xff, 0xff]);
        let ka = CapwapDataKeepAlive::decode(&data).unwrap();
        assert_eq!(ka.message_element_length, 6);
        assert_eq!(&ka.payload[..], &[1, 2, 3, 4]);
        assert_eq!(ka.next_layer_type(), LayerType::Payload);
    }

    #[test]
    fn test_keep_alive_truncated() {
        let data = Bytes::from_static(&[0x00, 0x08, 1, 2]);
        assert_eq!(
            CapwapDataKeepAlive::decode(&data),
            Err(LayerError::TruncatedHeader {
                needed: 8,
                available: 4
            })
        );
    }

    #[test]
    fn test_keep_alive_round_trip() {
        let ka = CapwapDataKeepAlive::decode(&Bytes::from_static(&[0x00, 0x05, 7, 8, 9])).unwrap();
        let mut buf = SerializeBuffer::new();
        buf.append_bytes(3).copy_from_slice(&ka.payload);
        ka.serialize(&mut buf).unwrap();
        assert_eq!(buf.bytes(), &[0x00, 0x05, 7, 8, 9]);
    }

    #[test]
    fn test_control_header_length_overlap() {
        // msg element length 10 counts from byte 5, so the payload runs
        // from byte 8 up to byte 15.
        let mut data = vec![
            0x00, 0x00, 0x00, 0x02, // message type 2
            0x03, // seq
            0x00, 0x0a, // msg element length 10
            0x00, // flags
        ];
        data.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7]);
        data.extend_from_slice(&[0xee]); // beyond the envelope
        let hdr = CapwapControlHeader::decode(&Bytes::from(data)).unwrap();
        assert_eq!(hdr.message_type, 2);
        assert_eq!(hdr.seq_num, 3);
        assert_eq!(hdr.msg_element_length, 10);
        assert_eq!(&hdr.payload[..], &[1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_control_header_truncated() {
        let data = Bytes::from_static(&[
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x20, 0x00, 1, 2,
        ]);
        assert_eq!(
            CapwapControlHeader::decode(&data),
            Err(LayerError::TruncatedHeader {
                needed: 37,
                available: 10
            })
        );
    }

    #[test]
    fn test_control_header_round_trip() {
        let mut data = vec![0x00, 0x00, 0x00, 0x02, 0x03, 0x00, 0x08, 0x00];
        data.extend_from_slice(&[1, 2, 3, 4, 5]);
        let hdr = CapwapControlHeader::decode(&Bytes::from(data.clone())).unwrap();
        let mut buf = SerializeBuffer::new();
        buf.append_bytes(5).copy_from_slice(&hdr.payload);
        hdr.serialize(&mut buf).unwrap();
        assert_eq!(buf.bytes(), &data[..]);
    }
}
