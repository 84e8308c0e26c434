//! Recovery of bare 802.11 frames from radiotap captures
//!
//! Wireless capture drivers prepend a radiotap metadata header and may both
//! insert alignment padding inside data frames and leave the trailing FCS in
//! place. This module undoes those capture-time artifacts so the result can
//! be fed to a generic 802.11 decoder.

use serde::{Deserialize, Serialize};

use crate::dot11::fcs;
use crate::error::{LayerError, Result};

/// Capture-time flags carried by the radiotap header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureFlags {
    /// The capture layer already failed the FCS check.
    pub bad_fcs: bool,
    /// Frame bodies are padded to 4-byte alignment after the MAC header.
    pub data_pad: bool,
    /// The trailing 4-byte FCS is present in the capture.
    pub has_fcs: bool,
}

/// Recover the bare 802.11 frame from a radiotap capture payload.
///
/// Alignment padding is removed from data frames when `data_pad` is set.
/// FCS policy: the trailing FCS is validated and stripped only when
/// `has_fcs` is set; with the flag clear the payload is returned unmodified.
pub fn extract_dot11(flags: CaptureFlags, payload: &[u8]) -> Result<Vec<u8>> {
    if flags.bad_fcs {
        return Err(LayerError::CorruptFrame);
    }
    let mut frame = payload.to_vec();
    if flags.data_pad && payload.len() > 2 && payload[0] & 0x0f == 0x08 {
        // Data frame: figure out where the driver put the padding.
        let mut hdr_len = 24;
        if payload[1] & 0x03 == 0x03 {
            // ToDS and FromDS both set: four-address format
            hdr_len = 30;
        }
        if payload[0] & 0x80 == 0x80 {
            hdr_len += 2; // QoS control field
            if payload[1] & 0x80 == 0x80 {
                hdr_len += 4; // HT control follows QoS when Order is set
            }
        }
        if hdr_len % 4 != 0 {
            let pad = 4 - hdr_len % 4;
            if payload.len() < hdr_len + pad {
                return Err(LayerError::TruncatedHeader {
                    needed: hdr_len + pad,
                    available: payload.len(),
                });
            }
            frame = Vec::with_capacity(payload.len() - pad);
            frame.extend_from_slice(&payload[..hdr_len]);
            frame.extend_from_slice(&payload[hdr_len + pad..]);
        }
    }
    if flags.has_fcs {
        if frame.len() < 4 {
            return Err(LayerError::TruncatedHeader {
                needed: 4,
                available: frame.len(),
            });
        }
        let body = frame.len() - 4;
        let expected = u32::from_le_bytes([
            frame[body],
            frame[body + 1],
            frame[body + 2],
            frame[body + 3],
        ]);
        let computed = fcs(&frame[..body]);
        if expected != computed {
            return Err(LayerError::FcsMismatch { expected, computed });
        }
        frame.truncate(body);
    }
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_fcs(body: &[u8]) -> Vec<u8> {
        let mut out = body.to_vec();
        out.extend_from_slice(&fcs(body).to_le_bytes());
        out
    }

    #[test]
    fn test_bad_fcs_flag_rejects() {
        let flags = CaptureFlags {
            bad_fcs: true,
            ..Default::default()
        };
        assert_eq!(
            extract_dot11(flags, &[1, 2, 3]),
            Err(LayerError::CorruptFrame)
        );
    }

    #[test]
    fn test_no_flags_passes_through() {
        let payload = [0x08, 0x01, 5, 6, 7];
        assert_eq!(
            extract_dot11(CaptureFlags::default(), &payload).unwrap(),
            payload.to_vec()
        );
    }

    #[test]
    fn test_fcs_validated_and_stripped() {
        let body = [0x48u8, 0x00, 1, 2, 3, 4, 5, 6, 7, 8];
        let flags = CaptureFlags {
            has_fcs: true,
            ..Default::default()
        };
        assert_eq!(extract_dot11(flags, &with_fcs(&body)).unwrap(), body.to_vec());
    }

    #[test]
    fn test_fcs_mismatch_detected() {
        let body = [0x48u8, 0x00, 1, 2, 3, 4, 5, 6, 7, 8];
        let mut capture = with_fcs(&body);
        capture[3] ^= 0x01; // corrupt one body byte
        let flags = CaptureFlags {
            has_fcs: true,
            ..Default::default()
        };
        assert!(matches!(
            extract_dot11(flags, &capture),
            Err(LayerError::FcsMismatch { .. })
        ));
    }

    #[test]
    fn test_qos_data_padding_removed() {
        // QoS data frame, single-address direction: header 24 + 2 = 26,
        // so two padding bytes sit between header and body.
        let mut capture = vec![0x88u8, 0x01];
        capture.extend_from_slice(&[0x11; 24]); // rest of the 26-byte header
        capture.extend_from_slice(&[0xde, 0xad]); // alignment padding
        capture.extend_from_slice(&[0x77, 0x78, 0x79]); // body
        let flags = CaptureFlags {
            data_pad: true,
            ..Default::default()
        };
        let frame = extract_dot11(flags, &capture).unwrap();
        assert_eq!(frame.len(), capture.len() - 2);
        assert_eq!(&frame[..26], &capture[..26]);
        assert_eq!(&frame[26..], &[0x77, 0x78, 0x79]);
    }

    #[test]
    fn test_four_address_qos_needs_no_padding() {
        // ToDS+FromDS QoS data: header 30 + 2 = 32, already aligned.
        let mut capture = vec![0x88u8, 0x03];
        capture.extend_from_slice(&[0x22; 34]);
        let flags = CaptureFlags {
            data_pad: true,
            ..Default::default()
        };
        assert_eq!(extract_dot11(flags, &capture).unwrap(), capture);
    }

    #[test]
    fn test_padding_then_fcs() {
        // Padded QoS data frame whose FCS covers the de-padded bytes.
        let mut body = vec![0x88u8, 0x01];
        body.extend_from_slice(&[0x33; 24]);
        body.extend_from_slice(&[0x55, 0x56]);
        let mut capture = body[..26].to_vec();
        capture.extend_from_slice(&[0, 0]); // padding
        capture.extend_from_slice(&body[26..]);
        capture.extend_from_slice(&fcs(&body).to_le_bytes());
        let flags = CaptureFlags {
            data_pad: true,
            has_fcs: true,
            bad_fcs: false,
        };
        assert_eq!(extract_dot11(flags, &capture).unwrap(), body);
    }

    #[test]
    fn test_non_data_frame_not_depadded() {
        // Management frame (subtype nibble != 0x8) is left alone.
        let capture = [0x80u8, 0x00, 1, 2, 3, 4, 5];
        let flags = CaptureFlags {
            data_pad: true,
            ..Default::default()
        };
        assert_eq!(extract_dot11(flags, &capture).unwrap(), capture.to_vec());
    }
}
