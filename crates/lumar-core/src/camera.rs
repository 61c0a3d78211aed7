//! Camera intrinsics and image dimensions
//!
//! Intrinsics are kept in native-resolution pixel units and rescaled at the
//! codec boundary so the service projects with sample-space coordinates.

use crate::geom::Vec3;

/// Pinhole camera intrinsics, native-resolution pixel units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    /// Focal length
    pub fx: f32,
    pub fy: f32,
    /// Principal point
    pub cx: f32,
    pub cy: f32,
}

impl CameraIntrinsics {
    pub fn new(fx: f32, fy: f32, cx: f32, cy: f32) -> Self {
        CameraIntrinsics { fx, fy, cx, cy }
    }

    /// Uniformly rescale for a resampled image
    pub fn scaled(&self, factor: f32) -> CameraIntrinsics {
        CameraIntrinsics {
            fx: self.fx * factor,
            fy: self.fy * factor,
            cx: self.cx * factor,
            cy: self.cy * factor,
        }
    }

    /// Project a camera-space point onto the normalized viewport of an image
    /// with these intrinsics. Returns (u, v, depth); depth is the view-space
    /// z and is meaningful regardless of whether (u, v) land on screen.
    pub fn viewport_point(&self, dims: ImageDimensions, p_cam: &Vec3) -> (f32, f32, f32) {
        let z = p_cam.z;
        let u = (self.fx * p_cam.x / z + self.cx) / dims.width as f32;
        let v = (self.fy * p_cam.y / z + self.cy) / dims.height as f32;
        (u, v, z)
    }
}

/// Width x height of one image resolution tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        ImageDimensions { width, height }
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte length of a planar 4:2:0 buffer: full luma plane plus an
    /// interleaved chroma plane at half resolution in both axes
    #[inline]
    pub fn luma_chroma_len(&self) -> usize {
        let w = self.width as usize;
        let h = self.height as usize;
        w * h + (w / 2) * (h / 2) * 2
    }

    /// Byte length of a float32 depth plane
    #[inline]
    pub fn depth_len(&self) -> usize {
        self.pixel_count() * 4
    }

    /// Multiply both axes (dense color tiers are integer multiples of the
    /// depth resolution)
    pub fn scaled(&self, factor: u32) -> ImageDimensions {
        ImageDimensions {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}
