//! Log sink for accessory events.
//!
//! The accessory reports human-readable lines and remote failures through
//! [`EventSink`]. [`TracingSink`] forwards them to `tracing`; tests and
//! hosts with their own log plumbing implement the trait themselves.

use tracing::{info, warn};

use crate::error::CoreError;

pub trait EventSink: Send + Sync {
    /// A human-readable status line.
    fn line(&self, message: &str);

    /// A failed remote call or a rejected host write.
    fn error(&self, err: &CoreError);
}

/// Adapter that writes every event to the `tracing` subscriber.
#[derive(Debug, Clone)]
pub struct TracingSink {
    accessory: String,
}

impl TracingSink {
    pub fn new(accessory: impl Into<String>) -> Self {
        Self {
            accessory: accessory.into(),
        }
    }
}

impl EventSink for TracingSink {
    fn line(&self, message: &str) {
        info!(accessory = %self.accessory, "{message}");
    }

    fn error(&self, err: &CoreError) {
        warn!(accessory = %self.accessory, error = %err, "accessory error");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let out = Captured::default();
        let writer = out.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        String::from_utf8(out.0.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn rejected_write_is_not_reported_as_a_remote_failure() {
        let sink = TracingSink::new("Left Bay");
        let logged = capture(|| sink.error(&CoreError::InvalidTarget { value: 7 }));

        assert!(logged.contains("WARN"), "{logged}");
        assert!(logged.contains("accessory error"), "{logged}");
        assert!(logged.contains("Value 7 is not a valid target door state"), "{logged}");
        assert!(!logged.contains("remote call"), "{logged}");
    }

    #[test]
    fn lines_are_logged_at_info_with_the_accessory_name() {
        let sink = TracingSink::new("Left Bay");
        let logged = capture(|| sink.line("doorstate changed from closed to opening"));

        assert!(logged.contains("INFO"), "{logged}");
        assert!(logged.contains("Left Bay"), "{logged}");
        assert!(logged.contains("doorstate changed from closed to opening"), "{logged}");
    }
}
