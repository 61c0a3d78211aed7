//! Session initialization packet
//!
//! Fixed 61-byte layout:
//! - Byte 0: header (0x00)
//! - Bytes 1-12: 3 x i32 (numViews, expTimeWindowMs, nearFieldSizeMm)
//! - Bytes 13-20: 2 x f32 (ambient color temperature, ambient brightness)
//! - Bytes 21-36: 4 x f32 (fx, fy, cx, cy, rescaled into dense sample space)
//! - Bytes 37-60: 6 x i32 (depth native w,h; dense sample w,h; sparse
//!   sample w,h)

use bytes::{BufMut, Bytes, BytesMut};
use lumar_core::SessionConfig;

use crate::PacketHeader;

/// Encoded size of a session-init packet
pub const SESSION_INIT_PACKET_SIZE: usize = 1 + 12 + 8 + 16 + 24;

/// Session initialization packet
///
/// Intrinsics are stored already rescaled by
/// `denseSampleWidth / nativeColorWidth` so the service can project with
/// sample-space pixel coordinates directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionInitPacket {
    pub num_views: i32,
    pub exp_time_window_ms: i32,
    pub near_field_size_mm: i32,
    pub ambient_color_temperature: f32,
    pub ambient_brightness: f32,
    /// Rescaled intrinsics, dense-sample pixel units
    pub fx: f32,
    pub fy: f32,
    pub cx: f32,
    pub cy: f32,
    pub depth_native_w: i32,
    pub depth_native_h: i32,
    pub dense_sample_w: i32,
    pub dense_sample_h: i32,
    pub sparse_sample_w: i32,
    pub sparse_sample_h: i32,
}

impl SessionInitPacket {
    /// Build the packet from a session config, rescaling intrinsics into
    /// dense sample space
    pub fn from_config(config: &SessionConfig) -> Self {
        let ratio = config.sample_to_native_ratio();
        let k = config.intrinsics.scaled(ratio);

        SessionInitPacket {
            num_views: config.num_views as i32,
            exp_time_window_ms: config.exp_time_window_ms as i32,
            near_field_size_mm: config.near_field_size_mm as i32,
            ambient_color_temperature: config.ambient.color_temperature,
            ambient_brightness: config.ambient.brightness,
            fx: k.fx,
            fy: k.fy,
            cx: k.cx,
            cy: k.cy,
            depth_native_w: config.depth_native.width as i32,
            depth_native_h: config.depth_native.height as i32,
            dense_sample_w: config.dense_sample.width as i32,
            dense_sample_h: config.dense_sample.height as i32,
            sparse_sample_w: config.sparse_sample.width as i32,
            sparse_sample_h: config.sparse_sample.height as i32,
        }
    }

    /// Serialize to the fixed wire layout
    pub fn encode(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(SESSION_INIT_PACKET_SIZE);

        buf.put_u8(PacketHeader::SessionInit.to_byte());

        buf.put_i32_le(self.num_views);
        buf.put_i32_le(self.exp_time_window_ms);
        buf.put_i32_le(self.near_field_size_mm);

        buf.put_f32_le(self.ambient_color_temperature);
        buf.put_f32_le(self.ambient_brightness);

        buf.put_f32_le(self.fx);
        buf.put_f32_le(self.fy);
        buf.put_f32_le(self.cx);
        buf.put_f32_le(self.cy);

        buf.put_i32_le(self.depth_native_w);
        buf.put_i32_le(self.depth_native_h);
        buf.put_i32_le(self.dense_sample_w);
        buf.put_i32_le(self.dense_sample_h);
        buf.put_i32_le(self.sparse_sample_w);
        buf.put_i32_le(self.sparse_sample_h);

        buf.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumar_core::{
        AmbientLightSample, CameraIntrinsics, ImageDimensions, QualityPreset, SessionConfig,
    };
    use proptest::prelude::*;

    fn config(preset: QualityPreset) -> SessionConfig {
        SessionConfig::from_preset(
            preset,
            AmbientLightSample::new(0.75, 5100.0),
            CameraIntrinsics::new(1400.0, 1395.0, 958.0, 542.0),
            ImageDimensions::new(1920, 1440),
            ImageDimensions::new(256, 192),
        )
    }

    #[test]
    fn test_init_packet_size_and_header() {
        let packet = SessionInitPacket::from_config(&config(QualityPreset::High));
        let bytes = packet.encode();

        assert_eq!(bytes.len(), SESSION_INIT_PACKET_SIZE);
        assert_eq!(bytes.len(), 61);
        assert_eq!(bytes[0], 0x00);
    }

    #[test]
    fn test_init_packet_field_order() {
        let packet = SessionInitPacket::from_config(&config(QualityPreset::High));
        let bytes = packet.encode();

        // numViews at bytes 1-4
        assert_eq!(i32::from_le_bytes(bytes[1..5].try_into().unwrap()), 5);
        // expTimeWindow at bytes 5-8
        assert_eq!(i32::from_le_bytes(bytes[5..9].try_into().unwrap()), 300);
        // nearFieldSize at bytes 9-12
        assert_eq!(i32::from_le_bytes(bytes[9..13].try_into().unwrap()), 200);
        // color temperature precedes brightness
        assert_eq!(
            f32::from_le_bytes(bytes[13..17].try_into().unwrap()),
            5100.0
        );
        assert_eq!(f32::from_le_bytes(bytes[17..21].try_into().unwrap()), 0.75);
        // trailing image sizes: depth native first
        assert_eq!(i32::from_le_bytes(bytes[37..41].try_into().unwrap()), 256);
        assert_eq!(i32::from_le_bytes(bytes[41..45].try_into().unwrap()), 192);
        // sparse sample last
        assert_eq!(i32::from_le_bytes(bytes[53..57].try_into().unwrap()), 32);
        assert_eq!(i32::from_le_bytes(bytes[57..61].try_into().unwrap()), 24);
    }

    #[test]
    fn test_intrinsics_rescaled_into_sample_space() {
        let cfg = config(QualityPreset::High);
        let packet = SessionInitPacket::from_config(&cfg);

        // dense = 256*4 = 1024 wide, native color 1920 wide
        let ratio = 1024.0 / 1920.0;
        assert!((packet.fx - 1400.0 * ratio).abs() < 1e-3);
        assert!((packet.cx - 958.0 * ratio).abs() < 1e-3);
    }

    proptest! {
        #[test]
        fn prop_init_packet_always_61_bytes(
            brightness in 0.0f32..10.0,
            temperature in 1000.0f32..10000.0,
            fx in 100.0f32..4000.0,
            depth_w in 1u32..512,
            depth_h in 1u32..512,
        ) {
            let cfg = SessionConfig::from_preset(
                QualityPreset::Medium,
                AmbientLightSample::new(brightness, temperature),
                CameraIntrinsics::new(fx, fx, fx / 2.0, fx / 2.0),
                ImageDimensions::new(1920, 1440),
                ImageDimensions::new(depth_w, depth_h),
            );
            let bytes = SessionInitPacket::from_config(&cfg).encode();

            prop_assert_eq!(bytes.len(), 61);
            prop_assert_eq!(bytes[0], 0x00);
        }
    }
}
