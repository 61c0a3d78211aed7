//! User-visible status log
//!
//! All user-facing failures and lifecycle milestones land here as plain
//! append-only text; nothing is ever removed. Each entry is mirrored to
//! `tracing` for structured consumers.

/// Append-only status log
#[derive(Debug, Default)]
pub struct StatusLog {
    entries: Vec<String>,
}

impl StatusLog {
    pub fn new() -> Self {
        StatusLog::default()
    }

    /// Append one entry
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "lumar::status", "{message}");
        self.entries.push(message);
    }

    #[inline]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_appends_in_order() {
        let mut log = StatusLog::new();
        log.log("first");
        log.log(format!("second {}", 2));

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0], "first");
        assert_eq!(log.last(), Some("second 2"));
    }
}
