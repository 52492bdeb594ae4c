//! Capped on-device error log
//!
//! One record per diagnosis, at most one diagnosis per session. The
//! writer deliberately declines to append to a log that already has
//! content below the rotation threshold: the file holds the first fault
//! of a session until it grows past the cap, at which point the next
//! write truncates and starts over. Nothing in here may fail loudly; a
//! device without a writable log still gets its console diagnosis.

use std::path::Path;
use std::sync::Arc;

use crate::fs::FileSystem;

/// One diagnosis record, rendered and written at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Local timestamp, already formatted.
    pub stamp: String,
    /// Category banner title.
    pub title: &'static str,
    /// Best-known `file:line`, with `?` placeholders.
    pub source: String,
    /// Argument summary, when the fault carried arguments.
    pub message: Option<String>,
    /// Full rendered traceback text.
    pub trace_text: String,
}

impl LogRecord {
    /// Render the record in the on-device log layout.
    pub fn render(&self) -> String {
        let mut text = format!("==== {} ====", self.stamp);
        text.push_str(&format!("\nType: {}", self.title));
        text.push_str(&format!("\nSource: {}", self.source));
        if let Some(message) = &self.message {
            text.push_str(&format!("\nMessage: {}", message));
        }
        text.push_str(&format!("\nTraceback:\n{}", self.trace_text));
        text.push_str("\n\n");
        text
    }
}

enum OpenMode {
    Append,
    Truncate,
}

/// Appends diagnosis records to a size-capped log file.
pub struct LogWriter {
    fs: Arc<dyn FileSystem>,
    path: String,
    max_bytes: u64,
}

impl LogWriter {
    /// Create a writer for the given log path and rotation threshold.
    pub fn new(fs: Arc<dyn FileSystem>, path: impl Into<String>, max_bytes: u64) -> Self {
        Self {
            fs,
            path: path.into(),
            max_bytes,
        }
    }

    /// Decide how (or whether) to open the log.
    ///
    /// A failing size pre-check counts as an empty file and still writes.
    fn open_mode(&self) -> Option<OpenMode> {
        let current_size = self.fs.file_size(Path::new(&self.path)).unwrap_or(0);
        if current_size >= self.max_bytes {
            Some(OpenMode::Truncate)
        } else if current_size > 0 {
            // One record per session: the log already holds a fault.
            None
        } else {
            Some(OpenMode::Append)
        }
    }

    /// Write a record, best-effort. Declined writes and write failures
    /// are both silent; the diagnosis path never observes them.
    pub fn write(&self, record: &LogRecord) {
        let Some(mode) = self.open_mode() else {
            tracing::debug!(path = %self.path, "log already holds a record; write declined");
            return;
        };

        let text = record.render();
        let result = match mode {
            OpenMode::Append => self.fs.append_file(Path::new(&self.path), text.as_bytes()),
            OpenMode::Truncate => self.fs.write_file(Path::new(&self.path), text.as_bytes()),
        };
        if let Err(error) = result {
            tracing::debug!(path = %self.path, %error, "log write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::InMemoryFs;
    use pretty_assertions::assert_eq;

    fn record(stamp: &str) -> LogRecord {
        LogRecord {
            stamp: stamp.to_string(),
            title: "NAME ERROR",
            source: "v02.py:12".to_string(),
            message: Some("(\"name 'x' isn't defined\",)".to_string()),
            trace_text: "Traceback (most recent call last):\n".to_string(),
        }
    }

    fn log_content(fs: &InMemoryFs) -> String {
        String::from_utf8(fs.read_file(Path::new("/error_log.txt")).unwrap()).unwrap()
    }

    #[test]
    fn test_record_layout() {
        let text = record("2026-08-08 10:30:00").render();
        assert_eq!(
            text,
            "==== 2026-08-08 10:30:00 ====\n\
             Type: NAME ERROR\n\
             Source: v02.py:12\n\
             Message: (\"name 'x' isn't defined\",)\n\
             Traceback:\nTraceback (most recent call last):\n\n\n"
        );
    }

    #[test]
    fn test_record_without_message() {
        let mut rec = record("now");
        rec.message = None;
        assert!(!rec.render().contains("Message:"));
    }

    #[test]
    fn test_first_write_appends_to_empty_log() {
        let fs = Arc::new(InMemoryFs::new());
        let writer = LogWriter::new(fs.clone(), "/error_log.txt", 1024);
        writer.write(&record("first"));
        assert!(log_content(&fs).starts_with("==== first ===="));
    }

    #[test]
    fn test_second_write_is_declined() {
        let fs = Arc::new(InMemoryFs::new());
        let writer = LogWriter::new(fs.clone(), "/error_log.txt", 1024);
        writer.write(&record("first"));
        writer.write(&record("second"));
        let content = log_content(&fs);
        assert!(content.contains("first"));
        assert!(!content.contains("second"));
    }

    #[test]
    fn test_write_at_threshold_truncates() {
        let fs = Arc::new(InMemoryFs::new());
        fs.add_file("/error_log.txt", &"x".repeat(64));
        let writer = LogWriter::new(fs.clone(), "/error_log.txt", 64);
        writer.write(&record("rotated"));
        let content = log_content(&fs);
        assert!(content.starts_with("==== rotated ===="));
        assert!(!content.contains('x'));
    }

    #[test]
    fn test_write_over_threshold_truncates() {
        let fs = Arc::new(InMemoryFs::new());
        fs.add_file("/error_log.txt", &"x".repeat(4096));
        let writer = LogWriter::new(fs.clone(), "/error_log.txt", 64);
        writer.write(&record("rotated"));
        assert!(log_content(&fs).starts_with("==== rotated ===="));
    }

    #[test]
    fn test_below_threshold_nonempty_declines() {
        let fs = Arc::new(InMemoryFs::new());
        fs.add_file("/error_log.txt", "existing record");
        let writer = LogWriter::new(fs.clone(), "/error_log.txt", 1024);
        writer.write(&record("new"));
        assert_eq!(log_content(&fs), "existing record");
    }

    #[test]
    fn test_missing_log_counts_as_empty() {
        // file_size fails on a missing file; the pre-check treats that
        // as size zero and the write proceeds
        let fs = Arc::new(InMemoryFs::new());
        let writer = LogWriter::new(fs.clone(), "/error_log.txt", 1024);
        writer.write(&record("fresh"));
        assert!(log_content(&fs).contains("fresh"));
    }
}
