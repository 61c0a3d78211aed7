//! Frame source capability
//!
//! Hardware camera/depth access sits behind this trait so the gating and
//! codec layers can run against fake planes under test. `None` from any
//! acquire method means the sensor cannot currently produce a frame (for
//! example, tracking was lost); there is no richer failure model.

use lumar_core::{CameraIntrinsics, ImageDimensions};

/// One raw color frame in a planar luma + interleaved-chroma layout (4:2:0)
///
/// The luma plane is `width * height` bytes. The chroma plane holds
/// interleaved UV pairs at half resolution in both axes, so
/// `width * height / 2` bytes.
#[derive(Debug, Clone)]
pub struct ColorFrame {
    pub dims: ImageDimensions,
    pub luma: Vec<u8>,
    pub chroma: Vec<u8>,
}

/// One raw depth frame with a per-pixel confidence plane
///
/// Depth is native-resolution float32 meters; confidence is one byte per
/// depth sample.
#[derive(Debug, Clone)]
pub struct DepthFrame {
    pub dims: ImageDimensions,
    pub depth: Vec<f32>,
    pub confidence: Vec<u8>,
}

/// Capability for acquiring raw frames from the device
///
/// Plane buffers come from a small platform image pool; callers must sample
/// and encode immediately after acquiring and drop the frame on every exit
/// path.
pub trait FrameSource {
    /// Latest CPU-side color frame, or `None` if unavailable
    fn acquire_color(&mut self) -> Option<ColorFrame>;

    /// Latest CPU-side depth frame with confidence, or `None` if unavailable
    fn acquire_depth(&mut self) -> Option<DepthFrame>;

    /// Current camera intrinsics in native color pixel units
    fn intrinsics(&self) -> Option<CameraIntrinsics>;
}
