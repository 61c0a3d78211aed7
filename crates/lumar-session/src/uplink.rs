//! Reconstruction service uplink
//!
//! The duplex connection itself is external; it is assumed to deliver whole
//! messages reliably and in order once connected. This module only models
//! the seam: fire-and-forget sends out, with inbound messages arriving on
//! the caller's own separate callback path. A packet handed to the uplink
//! is not recallable and is never retried.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;

/// Outbound half of the duplex connection
pub trait Uplink {
    /// Hand one whole encoded packet to the transport without blocking
    fn send(&self, packet: Bytes);

    /// Re-establish the duplex connection
    fn reconnect(&self);
}

/// Channel-backed uplink
///
/// Feeds packets into a tokio unbounded channel whose receiving end stands
/// in for the network; used by tests and local demos.
#[derive(Clone)]
pub struct ChannelUplink {
    tx: mpsc::UnboundedSender<Bytes>,
    reconnects: Arc<AtomicUsize>,
}

impl ChannelUplink {
    /// Create an uplink and the receiver standing in for the service
    pub fn pair() -> (ChannelUplink, mpsc::UnboundedReceiver<Bytes>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            ChannelUplink {
                tx,
                reconnects: Arc::new(AtomicUsize::new(0)),
            },
            rx,
        )
    }

    /// How many times `reconnect` was requested
    pub fn reconnect_count(&self) -> usize {
        self.reconnects.load(Ordering::Relaxed)
    }
}

impl Uplink for ChannelUplink {
    fn send(&self, packet: Bytes) {
        if self.tx.send(packet).is_err() {
            tracing::warn!("uplink receiver dropped; packet lost");
        }
    }

    fn reconnect(&self) {
        self.reconnects.fetch_add(1, Ordering::Relaxed);
    }
}
