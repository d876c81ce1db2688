//! Progress reporting for screening requests

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rapport_application::{FlowProgress, NoProgress, RequestKind};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Spinner shown while a request is in flight
///
/// Doubles as the typing indicator for chat turns.
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowProgress for ProgressReporter {
    fn on_request_start(&self, kind: RequestKind) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(kind.pending_label().to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_request_end(&self, _kind: RequestKind, _success: bool) {
        // Failures are reported by the caller; the spinner only disappears
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Simple text-based progress (no spinner)
pub struct SimpleProgress;

impl FlowProgress for SimpleProgress {
    fn on_request_start(&self, kind: RequestKind) {
        println!("{} {}", "->".cyan(), kind.pending_label().dimmed());
    }

    fn on_request_end(&self, _kind: RequestKind, _success: bool) {}
}

/// How in-flight requests are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    Hidden,
    /// Animated spinner, needs a terminal on stderr
    Spinner,
    /// One line per request, for redirected output
    Plain,
}

impl ProgressMode {
    pub fn select(show_progress: bool, is_terminal: bool) -> Self {
        match (show_progress, is_terminal) {
            (false, _) => ProgressMode::Hidden,
            (true, true) => ProgressMode::Spinner,
            (true, false) => ProgressMode::Plain,
        }
    }

    pub fn reporter(self) -> Arc<dyn FlowProgress> {
        match self {
            ProgressMode::Hidden => Arc::new(NoProgress),
            ProgressMode::Spinner => Arc::new(ProgressReporter::new()),
            ProgressMode::Plain => Arc::new(SimpleProgress),
        }
    }
}
