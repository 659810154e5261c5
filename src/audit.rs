//! Audit log — durable, append-only record of in-scope messages
//!
//! `AuditSink` is the persistence seam: the file implementation appends
//! one formatted record per line to a plain-text log that outside
//! consumers read for audit purposes; the in-memory implementation
//! backs tests. The log is never rewritten, only appended.

use crate::error::{AuditError, Result};
use crate::types::LogRecord;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Trait for audit record sinks
pub trait AuditSink: Send + Sync {
    /// Append one record to the sink, creating the resource if absent
    ///
    /// Ordering of appended records is the call order.
    fn append(&self, record: &LogRecord) -> Result<()>;
}

impl<T: AuditSink + ?Sized> AuditSink for std::sync::Arc<T> {
    fn append(&self, record: &LogRecord) -> Result<()> {
        (**self).append(record)
    }
}

/// Plain-text, append-only audit log file
///
/// Each append opens the file in append mode, writes one line, and
/// releases the handle before returning — on every path, success or
/// failure. An internal mutex serializes appends so concurrent callers
/// cannot interleave partial lines.
pub struct FileAuditLog {
    path: PathBuf,
    write_lock: std::sync::Mutex<()>,
}

impl FileAuditLog {
    /// Create a new file audit log at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: std::sync::Mutex::new(()),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditLog {
    fn append(&self, record: &LogRecord) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| AuditError::LogWrite(format!("Failed to acquire log lock: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AuditError::LogWrite(format!(
                    "Failed to create log directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                AuditError::LogWrite(format!(
                    "Failed to open log file {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        let line = format!("{}\n", record.log_line());
        file.write_all(line.as_bytes()).map_err(|e| {
            AuditError::LogWrite(format!(
                "Failed to append to log file {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            conversation = %record.conversation_id,
            "Audit record appended"
        );
        Ok(())
    }
}

/// In-memory audit sink for testing
///
/// Collects formatted lines in a `Vec` so tests can assert on exactly
/// what would have reached the log file.
#[derive(Default)]
pub struct MemoryAuditLog {
    lines: std::sync::RwLock<Vec<String>>,
}

impl MemoryAuditLog {
    /// Formatted lines appended so far, in order
    pub fn lines(&self) -> Vec<String> {
        self.lines.read().map(|l| l.clone()).unwrap_or_default()
    }

    /// Number of records appended so far
    pub fn len(&self) -> usize {
        self.lines.read().map(|l| l.len()).unwrap_or(0)
    }

    /// Whether nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditSink for MemoryAuditLog {
    fn append(&self, record: &LogRecord) -> Result<()> {
        let mut lines = self
            .lines
            .write()
            .map_err(|e| AuditError::LogWrite(format!("Failed to acquire log lock: {}", e)))?;
        lines.push(record.log_line());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn sample_record(text: &str) -> LogRecord {
        LogRecord {
            timestamp: "2024-05-01 09:30:00".to_string(),
            conversation_id: "G1".to_string(),
            sender_display_name: "Alice".to_string(),
            sender_id: "u-100".to_string(),
            text: text.to_string(),
        }
    }

    fn temp_log() -> PathBuf {
        std::env::temp_dir()
            .join(format!("chat-audit-test-{}", uuid::Uuid::new_v4()))
            .join("message_log.txt")
    }

    #[test]
    fn test_memory_sink_appends_in_order() {
        let log = MemoryAuditLog::default();
        assert!(log.is_empty());

        log.append(&sample_record("first")).unwrap();
        log.append(&sample_record("second")).unwrap();

        let lines = log.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("message:first"));
        assert!(lines[1].ends_with("message:second"));
    }

    #[test]
    fn test_file_sink_creates_and_appends() {
        let path = temp_log();
        let log = FileAuditLog::new(&path);

        log.append(&sample_record("first")).unwrap();
        log.append(&sample_record("second")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "[2024-05-01 09:30:00] conversation:G1 | sender:Alice(u-100) | message:first"
        );
        assert_eq!(
            lines[1],
            "[2024-05-01 09:30:00] conversation:G1 | sender:Alice(u-100) | message:second"
        );

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_file_sink_never_truncates() {
        let path = temp_log();

        {
            let log = FileAuditLog::new(&path);
            log.append(&sample_record("before")).unwrap();
        }

        // A fresh handle to the same path must keep prior content
        let log = FileAuditLog::new(&path);
        log.append(&sample_record("after")).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("message:before"));
        assert!(content.contains("message:after"));

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_file_sink_concurrent_appends_stay_intact() {
        let path = temp_log();
        let log = Arc::new(FileAuditLog::new(&path));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let log = log.clone();
                std::thread::spawn(move || {
                    for j in 0..10 {
                        log.append(&sample_record(&format!("t{}-m{}", i, j))).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 80);
        for line in lines {
            assert!(line.starts_with("[2024-05-01 09:30:00] conversation:G1"));
        }

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
