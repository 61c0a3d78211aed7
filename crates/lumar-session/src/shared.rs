//! Shared client handle
//!
//! The frame callback and the inbound-message callback arrive from two
//! different delivery mechanisms. When they cannot be driven from one
//! logical thread, this handle serializes them behind a lock so the
//! registry and the per-session enabled flags are never raced.

use std::sync::Arc;

use lumar_core::{LumarResult, QualityPreset, SessionId, Vec3};
use lumar_sampler::FrameSource;
use parking_lot::Mutex;

use crate::{FrameSample, ReconstructionClient, ServiceEvent, Uplink};

/// Cloneable, lock-serialized handle over a [`ReconstructionClient`]
pub struct SharedClient<S: FrameSource, U: Uplink> {
    inner: Arc<Mutex<ReconstructionClient<S, U>>>,
}

impl<S: FrameSource, U: Uplink> Clone for SharedClient<S, U> {
    fn clone(&self) -> Self {
        SharedClient {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: FrameSource, U: Uplink> SharedClient<S, U> {
    pub fn new(client: ReconstructionClient<S, U>) -> Self {
        SharedClient {
            inner: Arc::new(Mutex::new(client)),
        }
    }

    pub fn create_session(&self, origin: Vec3, preset: QualityPreset) -> LumarResult<()> {
        self.inner.lock().create_session(origin, preset)
    }

    /// Frame callback entry point
    pub fn on_frame(&self, sample: &FrameSample) {
        self.inner.lock().on_frame(sample);
    }

    /// Inbound-message callback entry point
    pub fn on_message(&self, data: &[u8]) -> Option<ServiceEvent> {
        self.inner.lock().on_message(data)
    }

    pub fn destroy_session(&self, id: &SessionId) -> LumarResult<()> {
        self.inner.lock().destroy_session(id)
    }

    pub fn reset_all(&self) {
        self.inner.lock().reset_all();
    }

    pub fn manually_capture_near_field(&self) {
        self.inner.lock().manually_capture_near_field();
    }

    pub fn manually_capture_far_field(&self) {
        self.inner.lock().manually_capture_far_field();
    }

    pub fn set_auto_capture_policy(&self, enabled: bool) {
        self.inner.lock().set_auto_capture_policy(enabled);
    }

    /// Run `f` with the locked client; for inspection from tests and debug
    /// surfaces
    pub fn with<R>(&self, f: impl FnOnce(&mut ReconstructionClient<S, U>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
