//! Keyframe packets
//!
//! Two capture modes share one tagged union; the discriminant is the wire
//! header byte.
//!
//! Near field (0x10):
//! - Byte 0: header
//! - Byte 1: view index
//! - Bytes 2-49: 12 x f32, row-major 3x4 camera-to-world transform with the
//!   translation already expressed relative to the reconstruction origin
//! - dense color sample, `w*h*1.5` bytes (planar luma + half-res chroma)
//! - full-resolution depth sample, `w*h*4` bytes of confidence-filtered
//!   little-endian float32
//!
//! Far field (0x11):
//! - Byte 0: header
//! - Bytes 1-36: 9 x f32, row-major 3x3 rotation (translation is irrelevant
//!   at far field and dropped)
//! - sparse color sample, `w*h*1.5` bytes

use bytes::{BufMut, Bytes, BytesMut};
use lumar_sampler::{ColorSample, DepthSample};

use crate::PacketHeader;

const VIEW_INDEX_SIZE: usize = 1;
const TRANSFORM_3X4_SIZE: usize = 12 * 4;
const ROTATION_3X3_SIZE: usize = 9 * 4;

/// One keyframe observation bound for the reconstruction service
#[derive(Debug, Clone)]
pub enum KeyframePacket {
    /// Anchored multi-view capture; produced when the reconstruction origin
    /// is inside the view volume
    NearField {
        view_index: u8,
        /// Row-major 3x4, translation relative to the reconstruction origin
        transform: [f32; 12],
        color: ColorSample,
        depth: DepthSample,
    },
    /// Ambient/background capture; produced when the origin is out of view
    FarField {
        /// Row-major 3x3 rotation
        rotation: [f32; 9],
        color: ColorSample,
    },
}

impl KeyframePacket {
    /// Wire header for this packet
    pub fn header(&self) -> PacketHeader {
        match self {
            KeyframePacket::NearField { .. } => PacketHeader::NearFieldKeyframe,
            KeyframePacket::FarField { .. } => PacketHeader::FarFieldKeyframe,
        }
    }

    /// Total encoded size in bytes
    pub fn encoded_len(&self) -> usize {
        match self {
            KeyframePacket::NearField { color, depth, .. } => {
                1 + VIEW_INDEX_SIZE + TRANSFORM_3X4_SIZE + color.len() + depth.len()
            }
            KeyframePacket::FarField { color, .. } => 1 + ROTATION_3X3_SIZE + color.len(),
        }
    }

    /// Serialize to the wire layout
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        buf.put_u8(self.header().to_byte());

        match self {
            KeyframePacket::NearField {
                view_index,
                transform,
                color,
                depth,
            } => {
                buf.put_u8(*view_index);
                for value in transform {
                    buf.put_f32_le(*value);
                }
                buf.put_slice(color.as_bytes());
                buf.put_slice(depth.as_bytes());
            }
            KeyframePacket::FarField { rotation, color } => {
                for value in rotation {
                    buf.put_f32_le(*value);
                }
                buf.put_slice(color.as_bytes());
            }
        }

        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumar_core::ImageDimensions;
    use lumar_sampler::{ColorFrame, DepthFrame};

    fn color_sample(dims: ImageDimensions) -> ColorSample {
        let frame = ColorFrame {
            dims,
            luma: vec![128; dims.pixel_count()],
            chroma: vec![64; dims.pixel_count() / 2],
        };
        ColorSample::take(&frame, dims)
    }

    fn depth_sample(dims: ImageDimensions) -> DepthSample {
        let frame = DepthFrame {
            dims,
            depth: vec![2.0; dims.pixel_count()],
            confidence: vec![2; dims.pixel_count()],
        };
        DepthSample::take(&frame, 2)
    }

    #[test]
    fn test_near_field_layout() {
        let dims = ImageDimensions::new(8, 6);
        let mut transform = [0.0f32; 12];
        transform[3] = 1.25; // relative tx

        let packet = KeyframePacket::NearField {
            view_index: 3,
            transform,
            color: color_sample(dims),
            depth: depth_sample(dims),
        };

        let bytes = packet.encode();
        let expected = 1 + 1 + 48 + (8 * 6 * 3 / 2) + (8 * 6 * 4);
        assert_eq!(bytes.len(), expected);
        assert_eq!(bytes.len(), packet.encoded_len());

        assert_eq!(bytes[0], 0x10);
        assert_eq!(bytes[1], 3);
        // transform row 0, element 3 sits at bytes 2 + 3*4
        assert_eq!(
            f32::from_le_bytes(bytes[14..18].try_into().unwrap()),
            1.25
        );
    }

    #[test]
    fn test_far_field_layout() {
        let dims = ImageDimensions::new(32, 24);
        let rotation = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];

        let packet = KeyframePacket::FarField {
            rotation,
            color: color_sample(dims),
        };

        let bytes = packet.encode();
        assert_eq!(bytes.len(), 1 + 36 + 32 * 24 * 3 / 2);
        assert_eq!(bytes[0], 0x11);
        // r00
        assert_eq!(f32::from_le_bytes(bytes[1..5].try_into().unwrap()), 1.0);
        // r11 at 1 + 4*4
        assert_eq!(f32::from_le_bytes(bytes[17..21].try_into().unwrap()), 1.0);
    }

    #[test]
    fn test_headers_match_discriminant() {
        let dims = ImageDimensions::new(4, 2);
        let near = KeyframePacket::NearField {
            view_index: 0,
            transform: [0.0; 12],
            color: color_sample(dims),
            depth: depth_sample(dims),
        };
        let far = KeyframePacket::FarField {
            rotation: [0.0; 9],
            color: color_sample(dims),
        };

        assert_eq!(near.header(), PacketHeader::NearFieldKeyframe);
        assert_eq!(far.header(), PacketHeader::FarFieldKeyframe);
    }
}
