//! User-facing toast notifications

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Outcome message shown after a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toast {
    Success(String),
    Error(String),
}

impl Toast {
    pub fn message(&self) -> &str {
        match self {
            Toast::Success(m) | Toast::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Toast::Error(_))
    }
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toast::Success(m) => write!(f, "✔ {}", m),
            Toast::Error(m) => write!(f, "✘ {}", m),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

impl dyn Notifier + '_ {
    pub fn success(&self, message: &str) {
        self.notify(Toast::Success(message.to_string()));
    }

    pub fn error(&self, message: &str) {
        self.notify(Toast::Error(message.to_string()));
    }
}

/// Prints toasts to the terminal; errors go to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    errors: AtomicUsize,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of error toasts shown so far
    pub fn errors_shown(&self) -> usize {
        self.errors.load(Ordering::Relaxed)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) {
        if toast.is_error() {
            self.errors.fetch_add(1, Ordering::Relaxed);
            eprintln!("{}", toast);
        } else {
            println!("{}", toast);
        }
    }
}
