use crate::utils::logger::{LogLevel, Logger};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Spinner for long waits. Draws nothing when stderr is not a terminal,
/// which is the case on hosted runners, so the log stays clean there.
pub struct Spinner {
    bar: ProgressBar,
    active: AtomicBool,
}

impl Spinner {
    pub fn new(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner} {msg} ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
        bar.set_style(style);
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(80));

        Spinner {
            bar,
            active: AtomicBool::new(true),
        }
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.bar.set_message(message.into());
    }

    pub fn succeed(&self, message: impl Into<String>) {
        if self.active.swap(false, Ordering::Relaxed) {
            self.bar.finish_and_clear();
            Logger::new().log_message(LogLevel::Success, &message.into());
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if self.active.swap(false, Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}
