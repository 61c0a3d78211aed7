//! Confidence-filtered depth sampling
//!
//! The depth plane crosses the wire at native resolution. The only
//! transformation is the confidence filter: samples the sensor is not sure
//! about are replaced with a sentinel the reconstruction stage discounts.

use bytes::{BufMut, Bytes, BytesMut};
use lumar_core::ImageDimensions;

use crate::DepthFrame;

/// Sentinel written over low-confidence depth samples; discounted by the
/// service during reconstruction
pub const INVALID_DEPTH: f32 = 1000.0;

/// Minimum per-pixel confidence for a depth sample to survive filtering
pub const DEFAULT_MIN_CONFIDENCE: u8 = 2;

/// A confidence-filtered depth image ready for packet encoding
#[derive(Debug, Clone)]
pub struct DepthSample {
    pub dims: ImageDimensions,
    data: Bytes,
}

impl DepthSample {
    /// Copy the native depth plane, overwriting any sample whose confidence
    /// is below `min_confidence` with [`INVALID_DEPTH`]
    ///
    /// Output is exactly `dims.depth_len()` bytes of little-endian float32.
    pub fn take(frame: &DepthFrame, min_confidence: u8) -> DepthSample {
        let mut buf = BytesMut::with_capacity(frame.dims.depth_len());

        for (i, &d) in frame.depth.iter().enumerate() {
            if frame.confidence[i] < min_confidence {
                buf.put_f32_le(INVALID_DEPTH);
            } else {
                buf.put_f32_le(d);
            }
        }

        DepthSample {
            dims: frame.dims,
            data: buf.freeze(),
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(dims: ImageDimensions, depth: Vec<f32>, confidence: Vec<u8>) -> DepthFrame {
        DepthFrame {
            dims,
            depth,
            confidence,
        }
    }

    #[test]
    fn test_output_len_is_four_per_pixel() {
        let dims = ImageDimensions::new(4, 2);
        let f = frame(dims, vec![1.0; 8], vec![2; 8]);
        let sample = DepthSample::take(&f, DEFAULT_MIN_CONFIDENCE);

        assert_eq!(sample.len(), dims.depth_len());
    }

    #[test]
    fn test_low_confidence_becomes_sentinel() {
        let dims = ImageDimensions::new(2, 2);
        let f = frame(dims, vec![0.5, 1.5, 2.5, 3.5], vec![2, 0, 1, 2]);
        let sample = DepthSample::take(&f, 2);

        let out = sample.as_bytes();
        // Indices 1 and 2 fall below confidence 2
        assert_eq!(&out[4..8], &1000.0f32.to_le_bytes());
        assert_eq!(&out[8..12], &1000.0f32.to_le_bytes());
        // Surviving samples are copied verbatim
        assert_eq!(&out[0..4], &0.5f32.to_le_bytes());
        assert_eq!(&out[12..16], &3.5f32.to_le_bytes());
    }

    #[test]
    fn test_sentinel_bytes_exact() {
        // The wire bytes for 1000.0 are fixed; the service matches on them
        assert_eq!(1000.0f32.to_le_bytes(), [0, 0, 122, 68]);
    }

    #[test]
    fn test_zero_threshold_keeps_everything() {
        let dims = ImageDimensions::new(2, 1);
        let f = frame(dims, vec![7.25, -0.5], vec![0, 0]);
        let sample = DepthSample::take(&f, 0);

        let out = sample.as_bytes();
        assert_eq!(&out[0..4], &7.25f32.to_le_bytes());
        assert_eq!(&out[4..8], &(-0.5f32).to_le_bytes());
    }
}
