//! LUMAR Wire Format
//!
//! Binary encoding for the client side of the reconstruction protocol:
//! session-init and keyframe packets out, init-ack and reconstruction
//! results in. All multi-byte fields are little-endian; floats are IEEE-754.
//!
//! Encoders here are pure functions of well-formed inputs. Validation
//! (ambient data present, sensor frames acquired) happens before a packet
//! value is ever constructed, so the codec carries no error path of its own.

pub mod header;
pub mod inbound;
pub mod init;
pub mod keyframe;

pub use header::*;
pub use inbound::*;
pub use init::*;
pub use keyframe::*;
