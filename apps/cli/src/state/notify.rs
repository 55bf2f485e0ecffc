//! # Notifier
//!
//! Where cart notices go. Fire-and-forget: a notifier never fails and the
//! store never waits on it.
//!
//! ```text
//! CartStore ──► Notifier::error("Requested quantity out of stock")
//!                   │
//!                   ├── ConsoleNotifier  → stderr (CLI)
//!                   ├── TracingNotifier  → warn! event
//!                   └── RecordingNotifier → Vec<String> (tests, embedding)
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Sink for user-facing error notices.
pub trait Notifier: Send + Sync {
    /// Shows `message` to the user.
    fn error(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn error(&self, message: &str) {
        (**self).error(message)
    }
}

/// Prints notices to stderr and counts them so the CLI can pick its exit
/// status.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    raised: AtomicUsize,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notices printed so far.
    pub fn raised(&self) -> usize {
        self.raised.load(Ordering::Relaxed)
    }
}

impl Notifier for ConsoleNotifier {
    fn error(&self, message: &str) {
        self.raised.fetch_add(1, Ordering::Relaxed);
        eprintln!("{}", message);
    }
}

/// Emits notices as `warn!` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::warn!(notice = %message, "Cart notice");
    }
}

/// Keeps every notice in memory.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the notices received so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns the notices received so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_console_notifier_counts() {
        let notifier = ConsoleNotifier::new();
        assert_eq!(notifier.raised(), 0);

        notifier.error("Error removing product");
        notifier.error("Error removing product");
        assert_eq!(notifier.raised(), 2);
    }

    /// Collects formatted log output.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_tracing_notifier_emits_warn_event() {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingNotifier.error("Error adding product");
        });

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("Cart notice"));
        assert!(output.contains("notice=Error adding product"));
    }

    #[test]
    fn test_recording_notifier_through_arc() {
        let notifier = Arc::new(RecordingNotifier::new());
        let shared = Arc::clone(&notifier);

        shared.error("Requested quantity out of stock");
        assert_eq!(notifier.messages(), vec!["Requested quantity out of stock"]);

        assert_eq!(notifier.take().len(), 1);
        assert!(notifier.messages().is_empty());
    }
}
