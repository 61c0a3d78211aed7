//! Device stability window
//!
//! A bounded ring of the most recent poses. The device counts as stable
//! when the current pose sits within tight position and angle tolerances of
//! every pose in the window. The window always absorbs the current pose,
//! pass or fail - it is a recent-history record, not only a gate.

use std::collections::VecDeque;
use std::f32::consts::PI;

use lumar_core::Pose;

/// Poses held in the window
pub const STABILITY_WINDOW_CAPACITY: usize = 5;

/// Maximum position drift for stability, position units
pub const STABLE_POSITION_TOLERANCE: f32 = 0.05;

/// Maximum orientation drift for stability, radians
pub const STABLE_ANGLE_TOLERANCE: f32 = PI / 36.0;

/// Ring buffer of recent device poses with a stability test
#[derive(Debug, Clone, Default)]
pub struct StabilityWindow {
    poses: VecDeque<Pose>,
}

impl StabilityWindow {
    pub fn new() -> Self {
        StabilityWindow {
            poses: VecDeque::with_capacity(STABILITY_WINDOW_CAPACITY),
        }
    }

    /// Test the current pose against the window, then record it
    ///
    /// Stable iff every held pose is within both tolerances of `pose`. An
    /// empty window is stable. The pose is pushed regardless of the
    /// outcome; the oldest entry is evicted past capacity.
    pub fn observe(&mut self, pose: &Pose) -> bool {
        let stable = self.poses.iter().all(|held| {
            held.position.distance(&pose.position) < STABLE_POSITION_TOLERANCE
                && held.rotation.angle_to(&pose.rotation) < STABLE_ANGLE_TOLERANCE
        });

        self.poses.push_back(*pose);
        if self.poses.len() > STABILITY_WINDOW_CAPACITY {
            self.poses.pop_front();
        }

        stable
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.poses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumar_core::{Quat, Vec3};

    fn pose_at(x: f32) -> Pose {
        Pose::new(Vec3::new(x, 0.0, 0.0), Quat::IDENTITY)
    }

    #[test]
    fn test_empty_window_is_stable() {
        let mut window = StabilityWindow::new();
        assert!(window.observe(&pose_at(0.0)));
        assert_eq!(window.len(), 1);
    }

    #[test]
    fn test_stationary_pose_stays_stable() {
        let mut window = StabilityWindow::new();
        for _ in 0..10 {
            assert!(window.observe(&pose_at(0.0)));
        }
        assert_eq!(window.len(), STABILITY_WINDOW_CAPACITY);
    }

    #[test]
    fn test_small_jitter_within_tolerance() {
        let mut window = StabilityWindow::new();
        window.observe(&pose_at(0.0));
        window.observe(&pose_at(0.02));
        assert!(window.observe(&pose_at(0.01)));
    }

    #[test]
    fn test_position_outlier_breaks_stability() {
        let mut window = StabilityWindow::new();
        for _ in 0..5 {
            window.observe(&pose_at(0.0));
        }
        // 0.1 units from every held pose
        assert!(!window.observe(&pose_at(0.1)));
    }

    #[test]
    fn test_rotation_outlier_breaks_stability() {
        let mut window = StabilityWindow::new();
        for _ in 0..5 {
            window.observe(&Pose::default());
        }

        let turned = Pose::new(
            Vec3::ZERO,
            Quat::from_axis_angle(Vec3::new(0.0, 1.0, 0.0), PI / 18.0),
        );
        assert!(!window.observe(&turned));
    }

    #[test]
    fn test_outlier_is_recorded_anyway() {
        let mut window = StabilityWindow::new();
        for _ in 0..5 {
            window.observe(&pose_at(0.0));
        }
        assert!(!window.observe(&pose_at(10.0)));

        // The outlier now poisons the window for a pose near the old spot
        assert!(!window.observe(&pose_at(0.0)));
    }

    #[test]
    fn test_outlier_ages_out() {
        let mut window = StabilityWindow::new();
        window.observe(&pose_at(10.0));

        // Five in-tolerance poses evict the outlier
        for _ in 0..5 {
            window.observe(&pose_at(0.0));
        }
        assert!(window.observe(&pose_at(0.0)));
        assert_eq!(window.len(), STABILITY_WINDOW_CAPACITY);
    }
}
