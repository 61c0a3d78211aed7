//! Session configuration and quality presets
//!
//! A `SessionConfig` is assembled once per session from the current device
//! intrinsics, the latest ambient light sample, and a quality preset. It is
//! immutable for the life of the session.

use crate::camera::{CameraIntrinsics, ImageDimensions};
use crate::light::AmbientLightSample;

/// Capture quality tier
///
/// The tier fixes the view count and the dense color resolution (an integer
/// multiple of the native depth resolution). The sparse far-field sample and
/// the exposure window are the same across tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityPreset {
    #[default]
    High,
    Medium,
    Low,
}

impl QualityPreset {
    /// Number of near-field view slots
    pub fn num_views(self) -> u32 {
        match self {
            QualityPreset::High => 5,
            QualityPreset::Medium => 4,
            QualityPreset::Low => 3,
        }
    }

    /// Dense color resolution as a multiple of the depth resolution
    pub fn dense_scale(self) -> u32 {
        match self {
            QualityPreset::High => 4,
            QualityPreset::Medium => 2,
            QualityPreset::Low => 1,
        }
    }

    /// Minimum spacing between automatic captures, milliseconds
    pub fn exp_time_window_ms(self) -> u32 {
        300
    }

    /// Near-field radius, millimeters
    pub fn near_field_size_mm(self) -> u32 {
        200
    }

    /// Sparse color sample resolution for far-field keyframes
    pub fn sparse_sample(self) -> ImageDimensions {
        ImageDimensions::new(32, 24)
    }
}

/// Immutable per-session configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Near-field view slot count V
    pub num_views: u32,
    /// Minimum spacing between automatic captures, milliseconds
    pub exp_time_window_ms: u32,
    /// Near-field radius, millimeters (transmitted, unused downstream)
    pub near_field_size_mm: u32,
    /// Ambient light at session creation
    pub ambient: AmbientLightSample,
    /// Camera intrinsics, native color pixel units
    pub intrinsics: CameraIntrinsics,
    /// Native color resolution
    pub color_native: ImageDimensions,
    /// Native depth resolution
    pub depth_native: ImageDimensions,
    /// Dense color sample resolution (near field)
    pub dense_sample: ImageDimensions,
    /// Sparse color sample resolution (far field)
    pub sparse_sample: ImageDimensions,
}

impl SessionConfig {
    /// Assemble a config from a quality preset and the current device state
    pub fn from_preset(
        preset: QualityPreset,
        ambient: AmbientLightSample,
        intrinsics: CameraIntrinsics,
        color_native: ImageDimensions,
        depth_native: ImageDimensions,
    ) -> Self {
        SessionConfig {
            num_views: preset.num_views(),
            exp_time_window_ms: preset.exp_time_window_ms(),
            near_field_size_mm: preset.near_field_size_mm(),
            ambient,
            intrinsics,
            color_native,
            depth_native,
            dense_sample: depth_native.scaled(preset.dense_scale()),
            sparse_sample: preset.sparse_sample(),
        }
    }

    /// Intrinsics rescale factor from native color space into dense sample
    /// space
    #[inline]
    pub fn sample_to_native_ratio(&self) -> f32 {
        self.dense_sample.width as f32 / self.color_native.width as f32
    }
}
