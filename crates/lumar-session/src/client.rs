//! Reconstruction client - session lifecycle manager
//!
//! Holds the explicit session registry (identifier -> gating controller)
//! plus the one pending, not-yet-acknowledged session. A controller enters
//! the registry only when the service's init-ack arrives, and only then can
//! it be enabled; automatic capture against an unacknowledged session is
//! therefore structurally impossible (register-then-enable ordering).

use std::collections::HashMap;

use bytes::Bytes;
use lumar_capture::CaptureController;
use lumar_core::{
    AmbientLightSample, FrameTime, LumarError, LumarResult, Pose, QualityPreset, SessionConfig,
    SessionId, Vec3,
};
use lumar_sampler::FrameSource;
use lumar_wire::{InboundMessage, KeyframePacket, SessionInitPacket};

use crate::{StatusLog, Uplink};

/// One camera frame event as delivered by the device
#[derive(Debug, Clone, Copy)]
pub struct FrameSample {
    pub pose: Pose,
    pub time: FrameTime,
    /// Light estimation for this frame; absent until the sensor reports
    pub ambient: Option<AmbientLightSample>,
}

/// What an inbound service message meant for the caller
#[derive(Debug, Clone)]
pub enum ServiceEvent {
    /// The service acknowledged session creation under this identifier
    SessionInitialized(SessionId),
    /// A reconstruction pass finished; the map is consumed by the external
    /// renderer
    EnvironmentMapReceived(Bytes),
}

/// Session lifecycle manager
///
/// Thin orchestration over the gating machine, the codec, and the uplink.
/// All methods assume one logical thread of control; see the crate docs.
pub struct ReconstructionClient<S: FrameSource, U: Uplink> {
    source: S,
    uplink: U,
    /// Policy applied whenever a session (re-)arms: automatic gating off by
    /// default, leaving only the manual capture paths
    auto_capture: bool,
    ambient: Option<AmbientLightSample>,
    last_pose: Option<Pose>,
    pending: Option<CaptureController>,
    sessions: HashMap<SessionId, CaptureController>,
    status: StatusLog,
}

impl<S: FrameSource, U: Uplink> ReconstructionClient<S, U> {
    pub fn new(source: S, uplink: U) -> Self {
        ReconstructionClient {
            source,
            uplink,
            auto_capture: false,
            ambient: None,
            last_pose: None,
            pending: None,
            sessions: HashMap::new(),
            status: StatusLog::new(),
        }
    }

    /// Set the auto-capture policy applied on init-ack and reconstruction
    /// completion
    pub fn set_auto_capture_policy(&mut self, enabled: bool) {
        self.auto_capture = enabled;
    }

    #[inline]
    pub fn status(&self) -> &StatusLog {
        &self.status
    }

    /// Mutable access to the injected frame source
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    #[inline]
    pub fn ambient(&self) -> Option<AmbientLightSample> {
        self.ambient
    }

    #[inline]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    #[inline]
    pub fn has_pending_session(&self) -> bool {
        self.pending.is_some()
    }

    /// Registered session identifiers
    pub fn session_ids(&self) -> impl Iterator<Item = &SessionId> {
        self.sessions.keys()
    }

    /// Create a capture session anchored at `origin`
    ///
    /// Fails fast if any session exists (confirmed or pending), if no
    /// ambient light sample has been observed yet, or if the sensors cannot
    /// currently report intrinsics and frame dimensions. On success the
    /// encoded init packet is dispatched and the unconfirmed session waits
    /// for the service's acknowledgement.
    pub fn create_session(&mut self, origin: Vec3, preset: QualityPreset) -> LumarResult<()> {
        if !self.sessions.is_empty() || self.pending.is_some() {
            self.status.log("Session rejected: one is already active");
            return Err(LumarError::SessionAlreadyActive);
        }

        let Some(ambient) = self.ambient else {
            self.status.log("Session rejected: no ambient light data yet");
            return Err(LumarError::AmbientLightUnavailable);
        };

        let intrinsics = self.source.intrinsics().ok_or(LumarError::SensorUnavailable)?;
        let color = self
            .source
            .acquire_color()
            .ok_or(LumarError::SensorUnavailable)?;
        let depth = self
            .source
            .acquire_depth()
            .ok_or(LumarError::SensorUnavailable)?;

        let config =
            SessionConfig::from_preset(preset, ambient, intrinsics, color.dims, depth.dims);

        let controller = CaptureController::new(config, origin);
        self.uplink
            .send(SessionInitPacket::from_config(&config).encode());
        self.pending = Some(controller);

        self.status.log("Session init dispatched, awaiting ack");
        Ok(())
    }

    /// Route one camera frame event through every registered session
    ///
    /// Frames without a complete light estimation are skipped entirely.
    /// A session that produces a keyframe is disabled until the service
    /// signals the next reconstruction pass.
    pub fn on_frame(&mut self, sample: &FrameSample) {
        self.last_pose = Some(sample.pose);

        let Some(ambient) = sample.ambient else {
            return;
        };
        self.ambient = Some(ambient);

        for controller in self.sessions.values_mut() {
            let Some(packet) = controller.evaluate_frame(&sample.pose, sample.time, &mut self.source)
            else {
                continue;
            };

            controller.set_enabled(false);
            self.status.log("Sending a keyframe...");
            self.uplink.send(packet.encode());
        }
    }

    /// Handle one whole inbound service message
    ///
    /// Messages with an unrecognized header are logged and ignored.
    pub fn on_message(&mut self, data: &[u8]) -> Option<ServiceEvent> {
        let message = match InboundMessage::parse(data) {
            Ok(message) => message,
            Err(error) => {
                tracing::warn!(%error, "ignoring inbound message");
                return None;
            }
        };

        match message {
            InboundMessage::InitAck { session_id } => {
                let Some(mut controller) = self.pending.take() else {
                    self.status.log("Init-ack without a pending session, ignored");
                    return None;
                };

                controller.set_enabled(self.auto_capture);
                self.status
                    .log(format!("Session init finished, id {session_id}"));
                self.sessions.insert(session_id.clone(), controller);
                Some(ServiceEvent::SessionInitialized(session_id))
            }
            InboundMessage::ReconstructionResult { environment_map } => {
                // A finished pass re-arms every session per the policy
                for controller in self.sessions.values_mut() {
                    controller.set_enabled(self.auto_capture);
                }
                self.status.log("Environment map received");
                Some(ServiceEvent::EnvironmentMapReceived(environment_map))
            }
        }
    }

    /// Remove one session from the registry
    pub fn destroy_session(&mut self, id: &SessionId) -> LumarResult<()> {
        if self.sessions.remove(id).is_none() {
            return Err(LumarError::SessionNotFound(id.clone()));
        }
        self.status.log(format!("Session {id} destroyed"));
        Ok(())
    }

    /// Drop every session (confirmed and pending) and re-establish the
    /// uplink connection
    pub fn reset_all(&mut self) {
        self.sessions.clear();
        self.pending = None;
        self.uplink.reconnect();
        self.status.log("All sessions reset");
    }

    /// Force a near-field capture on every registered session
    pub fn manually_capture_near_field(&mut self) {
        self.status.log("Capturing a near field...");
        self.manual_capture(|controller, pose, source| {
            controller.capture_near_field(pose, source)
        });
    }

    /// Force a far-field capture on every registered session
    pub fn manually_capture_far_field(&mut self) {
        self.status.log("Capturing a far field...");
        self.manual_capture(|controller, pose, source| {
            controller.capture_far_field(pose, source)
        });
    }

    fn manual_capture<F>(&mut self, capture: F)
    where
        F: Fn(&mut CaptureController, &Pose, &mut dyn FrameSource) -> Option<KeyframePacket>,
    {
        let Some(pose) = self.last_pose else {
            self.status.log("No device pose observed yet, capture skipped");
            return;
        };

        for controller in self.sessions.values_mut() {
            let Some(packet) = capture(controller, &pose, &mut self.source) else {
                // Sensor unavailable: abandon silently, keep the session
                continue;
            };
            self.uplink.send(packet.encode());
        }
    }
}
