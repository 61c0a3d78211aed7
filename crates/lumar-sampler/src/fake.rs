//! Deterministic fake frame source
//!
//! Stand-in for the device camera/depth capability. Produces gradient
//! planes that are stable across calls, and can be switched unavailable to
//! exercise the skip-capture paths.

use lumar_core::{CameraIntrinsics, ImageDimensions};

use crate::{ColorFrame, DepthFrame, FrameSource};

/// Fake sensor rig yielding deterministic planes
#[derive(Debug, Clone)]
pub struct FakeFrameSource {
    pub color_dims: ImageDimensions,
    pub depth_dims: ImageDimensions,
    pub intrinsics: CameraIntrinsics,
    /// Depth value filled into every sample
    pub depth_value: f32,
    /// Confidence byte filled into every sample
    pub confidence_value: u8,
    available: bool,
}

impl FakeFrameSource {
    pub fn new(color_dims: ImageDimensions, depth_dims: ImageDimensions) -> Self {
        let k = CameraIntrinsics::new(
            color_dims.width as f32,
            color_dims.width as f32,
            color_dims.width as f32 / 2.0,
            color_dims.height as f32 / 2.0,
        );
        FakeFrameSource {
            color_dims,
            depth_dims,
            intrinsics: k,
            depth_value: 1.5,
            confidence_value: 2,
            available: true,
        }
    }

    /// Toggle sensor availability (tracking lost)
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

impl FrameSource for FakeFrameSource {
    fn acquire_color(&mut self) -> Option<ColorFrame> {
        if !self.available {
            return None;
        }
        let n = self.color_dims.pixel_count();
        Some(ColorFrame {
            dims: self.color_dims,
            luma: (0..n).map(|i| (i % 256) as u8).collect(),
            chroma: (0..n / 2).map(|i| (i % 256) as u8).collect(),
        })
    }

    fn acquire_depth(&mut self) -> Option<DepthFrame> {
        if !self.available {
            return None;
        }
        let n = self.depth_dims.pixel_count();
        Some(DepthFrame {
            dims: self.depth_dims,
            depth: vec![self.depth_value; n],
            confidence: vec![self.confidence_value; n],
        })
    }

    fn intrinsics(&self) -> Option<CameraIntrinsics> {
        self.available.then_some(self.intrinsics)
    }
}
