//! Console echo seam
//!
//! Live mirroring of in-scope messages to an operator console. The
//! seam exists so controller tests can assert on echoed lines without
//! capturing stdout.

/// Trait for console-echo sinks
pub trait ConsoleSink: Send + Sync {
    /// Emit one line to the console
    fn emit(&self, line: &str);
}

impl<T: ConsoleSink + ?Sized> ConsoleSink for std::sync::Arc<T> {
    fn emit(&self, line: &str) {
        (**self).emit(line)
    }
}

/// Echo to stdout
#[derive(Default)]
pub struct StdoutConsole;

impl ConsoleSink for StdoutConsole {
    fn emit(&self, line: &str) {
        println!("{}", line);
    }
}

/// In-memory console capture for testing
#[derive(Default)]
pub struct MemoryConsole {
    lines: std::sync::RwLock<Vec<String>>,
}

impl MemoryConsole {
    /// Lines emitted so far, in order
    pub fn lines(&self) -> Vec<String> {
        self.lines.read().map(|l| l.clone()).unwrap_or_default()
    }
}

impl ConsoleSink for MemoryConsole {
    fn emit(&self, line: &str) {
        if let Ok(mut lines) = self.lines.write() {
            lines.push(line.to_string());
        }
    }
}
