//! Wall-clock timing of a scope.
//!
//! [`ScopeTimer`] records when it was started and reports the elapsed time
//! through `tracing` at each checkpoint and when it is dropped.
//!
//! # Examples
//!
//! ```rust
//! use idiomata::timing::ScopeTimer;
//!
//! let timer = ScopeTimer::start("lazy value");
//! timer.checkpoint("before first use");
//! assert!(timer.elapsed().as_secs() < 60);
//! // "end" is reported when `timer` goes out of scope
//! ```

use std::time::{Duration, Instant};

use tracing::info;

/// Reports the time elapsed since it was started.
#[derive(Debug)]
pub struct ScopeTimer {
    label: String,
    started: Instant,
}

impl ScopeTimer {
    /// Starts a timer identified by `label` in its reports.
    pub fn start(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            started: Instant::now(),
        }
    }

    /// Returns the time elapsed since the timer was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Returns the label given at start.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Emits an info event with the elapsed milliseconds.
    pub fn checkpoint(&self, message: &str) {
        info!(
            timer = %self.label,
            elapsed_ms = u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX),
            "time elapsed since start ({message})"
        );
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        self.checkpoint("end");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buffer);
            Ok(buffer.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(body: impl FnOnce()) -> String {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, body);
        log.contents()
    }

    #[rstest]
    fn test_elapsed_grows() {
        let timer = ScopeTimer::start("grows");
        thread::sleep(Duration::from_millis(5));
        assert!(timer.elapsed() >= Duration::from_millis(5));
        assert_eq!(timer.label(), "grows");
    }

    #[rstest]
    fn test_checkpoint_emits_info_event() {
        let output = capture(|| {
            let timer = ScopeTimer::start("lazy value");
            timer.checkpoint("before first use");
        });

        let line = output
            .lines()
            .find(|line| line.contains("time elapsed since start (before first use)"))
            .unwrap_or_else(|| panic!("no checkpoint event in {output:?}"));
        assert!(line.contains("INFO"));
        assert!(line.contains("timer=lazy value"));
        assert!(line.contains("elapsed_ms="));
    }

    #[rstest]
    fn test_drop_emits_end_after_checkpoints() {
        let output = capture(|| {
            let timer = ScopeTimer::start("lazy value");
            timer.checkpoint("before first use");
            drop(timer);
        });

        let checkpoint = output
            .find("time elapsed since start (before first use)")
            .unwrap_or_else(|| panic!("no checkpoint event in {output:?}"));
        let end = output
            .find("time elapsed since start (end)")
            .unwrap_or_else(|| panic!("no end event in {output:?}"));
        assert!(checkpoint < end);
        assert_eq!(output.matches("(end)").count(), 1);
    }
}
