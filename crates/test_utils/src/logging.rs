//! Log capture for asserting on `tracing` output

use std::io;
use std::sync::{Arc, Mutex};

/// Shared buffer the capturing subscriber writes into
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        let bytes = self.0.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local subscriber and returns its result plus the
/// plain-text log lines it emitted at INFO and above
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_warnings_with_fields() {
        let ((), logs) = capture_logs(|| {
            tracing::warn!(table = "tariff400ng_zip3s", matches = 2usize, "Duplicate rows");
            tracing::debug!("not captured");
        });

        assert!(logs.contains("WARN"));
        assert!(logs.contains("Duplicate rows"));
        assert!(logs.contains("matches=2"));
        assert!(!logs.contains("not captured"));
    }
}
