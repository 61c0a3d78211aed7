//! LUMAR Session Lifecycle
//!
//! Owns the active capture session: builds and dispatches the init packet,
//! binds the server-assigned identifier, routes frame samples into the
//! gating machine, and tears sessions down.
//!
//! # Concurrency model
//!
//! Everything here is single-threaded and event-driven. Two callback paths
//! mutate shared state - the per-frame evaluation and the inbound message
//! handler - and they must not race. Either drive both from one logical
//! thread of control, or go through [`SharedClient`], which serializes them
//! behind a lock. Outbound sends are fire-and-forget and never block the
//! frame loop.

pub mod client;
pub mod shared;
pub mod status;
pub mod uplink;

pub use client::*;
pub use shared::*;
pub use status::*;
pub use uplink::*;
