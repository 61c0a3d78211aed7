//! Capture gating state machine
//!
//! One controller per capture session. Every camera frame event lands in
//! [`CaptureController::evaluate_frame`], which runs the stability, cadence,
//! and visibility tests in order; the first failing test ends the evaluation
//! with no packet. The session's enabled flag is the sole gate on whether
//! evaluation happens at all.
//!
//! Manual capture entry points bypass all three gates and use a plain
//! round-robin view index instead of the slot tracker.

use std::time::Duration;

use lumar_core::{FrameTime, Pose, SessionConfig, Vec3};
use lumar_sampler::{ColorSample, DepthSample, FrameSource, DEFAULT_MIN_CONFIDENCE};
use lumar_wire::KeyframePacket;

use crate::{StabilityWindow, ViewSlotTracker};

/// Per-session capture gating state
#[derive(Debug)]
pub struct CaptureController {
    config: SessionConfig,
    /// Reconstruction origin; near-field poses are expressed relative to it
    origin: Vec3,
    /// Sole gate on automatic evaluation. Cleared by the session manager
    /// after each dispatched keyframe, restored when the service reports a
    /// completed reconstruction pass.
    enabled: bool,
    last_capture: FrameTime,
    stability: StabilityWindow,
    slots: ViewSlotTracker,
    /// Round-robin cursor for the manual override path
    manual_view_cursor: u32,
}

impl CaptureController {
    pub fn new(config: SessionConfig, origin: Vec3) -> Self {
        let slots = ViewSlotTracker::new(config.num_views as usize);
        CaptureController {
            config,
            origin,
            enabled: false,
            last_capture: FrameTime::ZERO,
            stability: StabilityWindow::new(),
            slots,
            manual_view_cursor: 0,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn view_slots(&self) -> &ViewSlotTracker {
        &self.slots
    }

    /// Evaluate one camera frame event
    ///
    /// Returns a keyframe packet when all gates pass and the sensors can
    /// produce frames; `None` otherwise. Sensor unavailability abandons the
    /// evaluation silently - no partial packet is ever built.
    pub fn evaluate_frame(
        &mut self,
        pose: &Pose,
        now: FrameTime,
        source: &mut dyn FrameSource,
    ) -> Option<KeyframePacket> {
        if !self.enabled {
            return None;
        }

        // The window records the pose even when the test fails
        if !self.stability.observe(pose) {
            return None;
        }

        if !self.test_cadence(now) {
            return None;
        }

        if self.origin_visible(pose) {
            self.build_near_field(pose, now, source)
        } else {
            let packet = self.build_far_field(pose, source)?;
            tracing::debug!("far-field keyframe ready");
            Some(packet)
        }
    }

    /// Force a near-field capture, bypassing every gate
    ///
    /// The view index is a plain round-robin over `[0, V)`, independent of
    /// the slot tracker.
    pub fn capture_near_field(
        &mut self,
        pose: &Pose,
        source: &mut dyn FrameSource,
    ) -> Option<KeyframePacket> {
        let view_index = (self.manual_view_cursor % self.config.num_views) as u8;
        self.manual_view_cursor = self.manual_view_cursor.wrapping_add(1);

        let color = ColorSample::take(&source.acquire_color()?, self.config.dense_sample);
        let depth = DepthSample::take(&source.acquire_depth()?, DEFAULT_MIN_CONFIDENCE);

        Some(KeyframePacket::NearField {
            view_index,
            transform: pose.to_rows_relative(&self.origin),
            color,
            depth,
        })
    }

    /// Force a far-field capture, bypassing every gate
    pub fn capture_far_field(
        &mut self,
        pose: &Pose,
        source: &mut dyn FrameSource,
    ) -> Option<KeyframePacket> {
        self.build_far_field(pose, source)
    }

    /// Minimum-interval throttle; refreshes the timestamp on pass
    fn test_cadence(&mut self, now: FrameTime) -> bool {
        let window = Duration::from_millis(self.config.exp_time_window_ms as u64);
        if now - self.last_capture > window {
            self.last_capture = now;
            true
        } else {
            false
        }
    }

    /// Project the reconstruction origin into the view volume
    ///
    /// Visible iff the view-space depth is positive and both normalized
    /// viewport coordinates lie strictly inside (0, 1).
    fn origin_visible(&self, pose: &Pose) -> bool {
        let p_cam = pose.world_to_camera(&self.origin);
        let (u, v, z) = self
            .config
            .intrinsics
            .viewport_point(self.config.color_native, &p_cam);

        z > 0.0 && u > 0.0 && u < 1.0 && v > 0.0 && v < 1.0
    }

    fn build_near_field(
        &mut self,
        pose: &Pose,
        now: FrameTime,
        source: &mut dyn FrameSource,
    ) -> Option<KeyframePacket> {
        let color = ColorSample::take(&source.acquire_color()?, self.config.dense_sample);
        let depth = DepthSample::take(&source.acquire_depth()?, DEFAULT_MIN_CONFIDENCE);
        let view_index = self.slots.assign(pose, now) as u8;
        tracing::debug!(view = view_index, "near-field keyframe ready");

        Some(KeyframePacket::NearField {
            view_index,
            transform: pose.to_rows_relative(&self.origin),
            color,
            depth,
        })
    }

    fn build_far_field(&self, pose: &Pose, source: &mut dyn FrameSource) -> Option<KeyframePacket> {
        let color = ColorSample::take(&source.acquire_color()?, self.config.sparse_sample);

        Some(KeyframePacket::FarField {
            rotation: pose.rotation_rows(),
            color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumar_core::{
        AmbientLightSample, CameraIntrinsics, ImageDimensions, Quat, QualityPreset, SessionConfig,
    };
    use lumar_sampler::FakeFrameSource;

    fn test_config() -> SessionConfig {
        SessionConfig::from_preset(
            QualityPreset::High,
            AmbientLightSample::new(0.8, 4800.0),
            CameraIntrinsics::new(64.0, 64.0, 32.0, 24.0),
            ImageDimensions::new(64, 48),
            ImageDimensions::new(16, 12),
        )
    }

    fn test_source() -> FakeFrameSource {
        FakeFrameSource::new(ImageDimensions::new(64, 48), ImageDimensions::new(16, 12))
    }

    /// Identity pose at the world origin, looking down +z
    fn still_pose() -> Pose {
        Pose::default()
    }

    /// Origin straight ahead of the still pose
    fn visible_origin() -> Vec3 {
        Vec3::new(0.0, 0.0, 2.0)
    }

    fn t(ms: u64) -> FrameTime {
        FrameTime::from_millis(ms)
    }

    #[test]
    fn test_disabled_controller_is_noop() {
        let mut controller = CaptureController::new(test_config(), visible_origin());
        let mut source = test_source();

        assert!(controller
            .evaluate_frame(&still_pose(), t(10_000), &mut source)
            .is_none());
    }

    #[test]
    fn test_cadence_gates_first_captures() {
        let mut controller = CaptureController::new(test_config(), visible_origin());
        controller.set_enabled(true);
        let mut source = test_source();
        let pose = still_pose();

        // 100ms spacing against a 300ms window: three no-ops, then capture
        assert!(controller.evaluate_frame(&pose, t(100), &mut source).is_none());
        assert!(controller.evaluate_frame(&pose, t(200), &mut source).is_none());
        assert!(controller.evaluate_frame(&pose, t(300), &mut source).is_none());

        let packet = controller.evaluate_frame(&pose, t(400), &mut source);
        assert!(matches!(packet, Some(KeyframePacket::NearField { .. })));
    }

    #[test]
    fn test_unstable_device_is_gated() {
        let mut controller = CaptureController::new(test_config(), visible_origin());
        controller.set_enabled(true);
        let mut source = test_source();

        // Sweep the device fast enough to break the stability window
        for i in 0..5u64 {
            let pose = Pose::new(Vec3::new(i as f32 * 0.2, 0.0, 0.0), Quat::IDENTITY);
            assert!(controller
                .evaluate_frame(&pose, t(1000 + i * 100), &mut source)
                .is_none());
        }
    }

    #[test]
    fn test_out_of_view_origin_produces_far_field() {
        // Origin far above the viewport (v > 1)
        let mut controller =
            CaptureController::new(test_config(), Vec3::new(0.0, 10.0, 2.0));
        controller.set_enabled(true);
        let mut source = test_source();

        let packet = controller.evaluate_frame(&still_pose(), t(1000), &mut source);
        match packet {
            Some(KeyframePacket::FarField { color, .. }) => {
                // Far field carries the sparse tier
                assert_eq!(color.dims, ImageDimensions::new(32, 24));
            }
            other => panic!("expected far field, got {:?}", other.map(|p| p.header())),
        }
    }

    #[test]
    fn test_origin_behind_camera_is_far_field() {
        let mut controller =
            CaptureController::new(test_config(), Vec3::new(0.0, 0.0, -2.0));
        controller.set_enabled(true);
        let mut source = test_source();

        let packet = controller.evaluate_frame(&still_pose(), t(1000), &mut source);
        assert!(matches!(packet, Some(KeyframePacket::FarField { .. })));
    }

    #[test]
    fn test_sensor_unavailable_abandons_capture() {
        let mut controller = CaptureController::new(test_config(), visible_origin());
        controller.set_enabled(true);
        let mut source = test_source();
        source.set_available(false);

        assert!(controller
            .evaluate_frame(&still_pose(), t(1000), &mut source)
            .is_none());
    }

    #[test]
    fn test_near_field_transform_is_origin_relative() {
        let origin = Vec3::new(1.0, 0.0, 5.0);
        let mut controller = CaptureController::new(test_config(), origin);
        controller.set_enabled(true);
        let mut source = test_source();

        // Camera two units behind the origin on z, origin in view
        let pose = Pose::new(Vec3::new(1.0, 0.0, 3.0), Quat::IDENTITY);
        let packet = controller.evaluate_frame(&pose, t(1000), &mut source);

        match packet {
            Some(KeyframePacket::NearField { transform, .. }) => {
                assert_eq!(transform[3], 0.0);
                assert_eq!(transform[7], 0.0);
                assert_eq!(transform[11], -2.0);
            }
            other => panic!("expected near field, got {:?}", other.map(|p| p.header())),
        }
    }

    #[test]
    fn test_manual_capture_round_robin() {
        let mut controller = CaptureController::new(test_config(), visible_origin());
        let mut source = test_source();
        let pose = still_pose();

        // Works while disabled, cycles modulo V=5
        let mut indices = Vec::new();
        for _ in 0..7 {
            match controller.capture_near_field(&pose, &mut source) {
                Some(KeyframePacket::NearField { view_index, .. }) => indices.push(view_index),
                other => panic!("expected near field, got {:?}", other.map(|p| p.header())),
            }
        }
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 0, 1]);
    }

    #[test]
    fn test_manual_far_field_ignores_gates() {
        let mut controller = CaptureController::new(test_config(), visible_origin());
        let mut source = test_source();

        // Origin is visible, but the manual far-field path never checks
        let packet = controller.capture_far_field(&still_pose(), &mut source);
        assert!(matches!(packet, Some(KeyframePacket::FarField { .. })));
    }

    #[test]
    fn test_capture_disables_nothing_by_itself() {
        // Disabling after a dispatched keyframe is the session manager's
        // job; the controller stays enabled
        let mut controller = CaptureController::new(test_config(), visible_origin());
        controller.set_enabled(true);
        let mut source = test_source();

        let packet = controller.evaluate_frame(&still_pose(), t(1000), &mut source);
        assert!(packet.is_some());
        assert!(controller.is_enabled());
    }
}
