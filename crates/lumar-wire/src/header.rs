//! Packet header bytes
//!
//! Every message begins with a single identifying byte. Outbound and inbound
//! header spaces are independent: 0x10 means a near-field keyframe on the
//! way out and a reconstruction result on the way in.

/// Header byte of a client-to-service packet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketHeader {
    /// Session initialization
    SessionInit = 0x00,
    /// Near-field keyframe (dense color + filtered depth)
    NearFieldKeyframe = 0x10,
    /// Far-field keyframe (sparse color only)
    FarFieldKeyframe = 0x11,
}

impl PacketHeader {
    /// Parse from wire byte
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x00 => Some(PacketHeader::SessionInit),
            0x10 => Some(PacketHeader::NearFieldKeyframe),
            0x11 => Some(PacketHeader::FarFieldKeyframe),
            _ => None,
        }
    }

    /// Convert to wire byte
    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

/// Header byte of a service-to-client message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InboundHeader {
    /// Session initialization acknowledgement, body is the UTF-8 session id
    InitAck = 0x01,
    /// Completed reconstruction pass, body is an opaque environment map
    ReconstructionResult = 0x10,
}

impl InboundHeader {
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0x01 => Some(InboundHeader::InitAck),
            0x10 => Some(InboundHeader::ReconstructionResult),
            _ => None,
        }
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}
