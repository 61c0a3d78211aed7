//! Nearest-neighbor color downsampling
//!
//! Sampling stays in the planar 4:2:0 layout of the native frame: a full
//! luma plane followed by an interleaved UV plane at half resolution in
//! both axes. The scale factor is taken from the width ratio alone.

use bytes::{BufMut, Bytes, BytesMut};
use lumar_core::ImageDimensions;

use crate::ColorFrame;

/// A downsampled color image ready for packet encoding
#[derive(Debug, Clone)]
pub struct ColorSample {
    pub dims: ImageDimensions,
    data: Bytes,
}

impl ColorSample {
    /// Nearest-neighbor downsample of `frame` to `target` resolution
    ///
    /// Output is exactly `target.luma_chroma_len()` bytes: the sampled luma
    /// plane, then the sampled interleaved chroma plane.
    // TODO: bilinear taps would anti-alias the dense tier; nearest matches
    // the current service-side projection.
    pub fn take(frame: &ColorFrame, target: ImageDimensions) -> ColorSample {
        let scale = target.width as f32 / frame.dims.width as f32;
        let native_w = frame.dims.width as usize;
        let sw = target.width as usize;
        let sh = target.height as usize;

        let mut buf = BytesMut::with_capacity(target.luma_chroma_len());

        for v in 0..sh {
            let iv = (v as f32 / scale) as usize;
            for u in 0..sw {
                let iu = (u as f32 / scale) as usize;
                buf.put_u8(frame.luma[iv * native_w + iu]);
            }
        }

        // Chroma rows are sw/2 UV pairs, sw bytes each
        for v in 0..sh / 2 {
            let iv = (v as f32 / scale) as usize;
            for u in 0..sw / 2 {
                let iu = (u as f32 / scale) as usize;
                let native_offset = iv * native_w + iu * 2;
                buf.put_u8(frame.chroma[native_offset]);
                buf.put_u8(frame.chroma[native_offset + 1]);
            }
        }

        ColorSample {
            dims: target,
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
