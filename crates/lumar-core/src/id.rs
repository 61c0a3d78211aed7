//! Identity types for the LUMAR client
//!
//! The reconstruction service assigns session identifiers; the client never
//! mints them. The identifier is opaque UTF-8 carried verbatim on the wire.

use std::fmt;

/// Session identity - assigned by the reconstruction service on init-ack
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        SessionId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        SessionId(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        SessionId(s.to_string())
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_roundtrip() {
        let id = SessionId::new("a1b2c3");
        assert_eq!(id.as_str(), "a1b2c3");
        assert_eq!(id, SessionId::from("a1b2c3"));
    }

    #[test]
    fn test_session_id_display() {
        let id = SessionId::new("edge-07");
        assert_eq!(id.to_string(), "edge-07");
        assert_eq!(format!("{:?}", id), "Session(edge-07)");
    }
}
