//! Spinner shown while a request is in flight.

use crate::tui::settings;
use crossterm::style::Stylize;
use std::io::{self, IsTerminal, Write};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::{Duration, Instant};

static PROGRESS_ENABLED: AtomicBool = AtomicBool::new(true);

/// RAII handle for an active spinner.
pub struct ProgressHandle {
    stop: Arc<AtomicBool>,
    /// Background writer thread, present only when the spinner is drawn.
    thread: Option<thread::JoinHandle<()>>,
}

impl ProgressHandle {
    /// No-op handle used when progress output is disabled.
    pub(crate) fn disabled() -> Self {
        Self {
            stop: Arc::new(AtomicBool::new(true)),
            thread: None,
        }
    }

    #[cfg(test)]
    fn is_visible(&self) -> bool {
        self.thread.is_some()
    }

    /// Stop the spinner and clear its line.
    pub fn finish(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Globally enable/disable live progress rendering.
pub fn set_progress_enabled(enabled: bool) {
    PROGRESS_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Start a spinner on stderr. Returns a disabled handle when stderr is not a
/// terminal or spinners are switched off.
pub fn start_progress(label: impl Into<String>, color: bool) -> ProgressHandle {
    if !PROGRESS_ENABLED.load(Ordering::Relaxed) || !io::stderr().is_terminal() {
        return ProgressHandle::disabled();
    }

    let label = label.into();
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);

    let thread = thread::spawn(move || {
        let start = Instant::now();
        let mut idx = 0usize;

        while !stop_flag.load(Ordering::Relaxed) {
            let frame = settings::PROGRESS_FRAMES[idx % settings::PROGRESS_FRAMES.len()];
            let line = progress_line(frame, &label, start.elapsed(), color);
            let mut err = io::stderr();
            let _ = write!(err, "{line}");
            let _ = err.flush();
            idx += 1;
            thread::sleep(Duration::from_millis(settings::PROGRESS_TICK_MS));
        }

        let mut err = io::stderr();
        let _ = write!(err, "{}", settings::PROGRESS_CLEAR_LINE);
        let _ = err.flush();
    });

    ProgressHandle {
        stop,
        thread: Some(thread),
    }
}

fn progress_line(frame: char, label: &str, elapsed: Duration, color: bool) -> String {
    let elapsed_s = elapsed.as_millis() as f64 / 1000.0;
    if color {
        format!(
            "{}{} {} {}",
            settings::PROGRESS_CLEAR_LINE,
            format!("[{frame}]").with(settings::COLOR_PROGRESS_FRAME),
            label.with(settings::COLOR_PROGRESS_LABEL),
            format!("({elapsed_s:.1}s)").with(settings::COLOR_PROGRESS_ELAPSED),
        )
    } else {
        format!(
            "{}[{frame}] {label} ({elapsed_s:.1}s)",
            settings::PROGRESS_CLEAR_LINE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_contains_frame_label_and_elapsed() {
        let out = progress_line('|', "loading agents", Duration::from_millis(1500), false);
        assert!(out.ends_with("[|] loading agents (1.5s)"));
    }

    #[test]
    fn disabled_handle_finishes_cleanly() {
        let mut handle = ProgressHandle::disabled();
        assert!(!handle.is_visible());
        handle.finish();
    }
}
