//! Side-effect services used by operations: toasts and navigation.

use std::sync::{Arc, Mutex, PoisonError};

/// A toast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) | Notice::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Shows toasts to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Moves the user to another route.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// The services an operation may use after its network call settles.
#[derive(Clone)]
pub struct Effects {
    pub notifier: Arc<dyn Notifier>,
    pub navigator: Arc<dyn Navigator>,
}

impl Effects {
    pub fn new(notifier: Arc<dyn Notifier>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            notifier,
            navigator,
        }
    }

    /// Toasts become log events; navigation is only recorded.
    pub fn headless() -> Self {
        Self::new(Arc::new(TracingNotifier), Arc::new(HistoryNavigator::new()))
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notifier.notify(Notice::Success(message.into()));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notifier.notify(Notice::Error(message.into()));
    }
}

/// Notifier that writes toasts to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success(message) => tracing::info!(%message, "toast"),
            Notice::Error(message) => tracing::warn!(%message, "error toast"),
        }
    }
}

/// Notifier that keeps every toast, for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages of the error toasts, oldest first.
    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(Notice::is_error)
            .map(|notice| notice.message().to_string())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

/// Navigator that keeps the visited routes.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Route of the last navigation.
    pub fn current(&self) -> Option<String> {
        self.history().last().cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str) {
        tracing::debug!(path, "navigate");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier() {
        let notifier = Arc::new(RecordingNotifier::new());
        let effects = Effects::new(notifier.clone(), Arc::new(HistoryNavigator::new()));

        effects.success("Order placed");
        effects.error("Network Error");

        assert_eq!(notifier.notices().len(), 2);
        assert_eq!(notifier.errors(), vec!["Network Error".to_string()]);
    }

    #[test]
    fn test_history_navigator() {
        let navigator = HistoryNavigator::new();
        assert_eq!(navigator.current(), None);
        navigator.navigate("/products");
        navigator.navigate("/");
        assert_eq!(navigator.current().as_deref(), Some("/"));
        assert_eq!(navigator.history().len(), 2);
    }
}
