//! The notification port.
//!
//! Purely advisory: the service calls it after mutations land, and a
//! notifier that fails or does nothing must never block or roll back the
//! mutation it reports on. Implementations therefore return nothing and
//! must not panic.

/// Sink for user-facing notifications at defined mutation points.
pub trait Notifier: Send + Sync {
    /// A mutation succeeded (plant added, system assigned, ...).
    fn success(&self, message: &str);

    /// Neutral information (plant removed, signed out, ...).
    fn info(&self, message: &str);
}

/// Notifier that forwards to the `tracing` log stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!(kind = "success", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(kind = "info", "{message}");
    }
}

/// Notifier that drops everything. For tests and headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}

    fn info(&self, _message: &str) {}
}

// Compile-time assertion: Notifier must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn Notifier) {}
};
