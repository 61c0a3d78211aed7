//! Inbound message parsing
//!
//! The service speaks two messages back over the duplex connection. Both are
//! dispatched on the leading header byte; a header the client does not
//! recognize is surfaced as an error the caller ignores.

use bytes::Bytes;
use lumar_core::{LumarError, LumarResult, SessionId};

use crate::InboundHeader;

/// A parsed service-to-client message
#[derive(Debug, Clone)]
pub enum InboundMessage {
    /// The service registered the session and assigned its identifier
    InitAck { session_id: SessionId },
    /// A reconstruction pass completed; the body is an encoded environment
    /// map owned by the external renderer
    ReconstructionResult { environment_map: Bytes },
}

impl InboundMessage {
    /// Parse a whole inbound message
    pub fn parse(data: &[u8]) -> LumarResult<InboundMessage> {
        if data.is_empty() {
            return Err(LumarError::BufferTooShort {
                expected: 1,
                actual: 0,
            });
        }

        let header = InboundHeader::from_byte(data[0])
            .ok_or(LumarError::UnknownMessageHeader(data[0]))?;
        let body = &data[1..];

        match header {
            InboundHeader::InitAck => {
                let id = std::str::from_utf8(body)
                    .map_err(|_| {
                        LumarError::InvalidMessage("init-ack id is not UTF-8".into())
                    })?;
                Ok(InboundMessage::InitAck {
                    session_id: SessionId::new(id),
                })
            }
            InboundHeader::ReconstructionResult => Ok(InboundMessage::ReconstructionResult {
                environment_map: Bytes::copy_from_slice(body),
            }),
        }
    }
}
