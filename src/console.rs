//! Diagnostic output sink.
//!
//! # Responsibilities
//! - Accept informational and error lines from the orchestrator
//! - Forward every line through `tracing`
//! - Accumulate a transcript for later inspection
//!
//! # Design Decisions
//! - The sink trait is the seam: the core never formats or colors,
//!   it only calls `write` / `write_error`
//! - Both operations are infallible and non-blocking
//! - Transcript access is separate from the trait so the orchestrator
//!   only sees the two write operations

use std::sync::Mutex;

use tracing::{error, info};

/// Sink for the orchestrator's diagnostic lines.
///
/// Implementations must never fail and never block indefinitely.
pub trait DiagnosticSink: Send + Sync {
    /// Record an informational line.
    fn write(&self, msg: &str);

    /// Record an error line.
    fn write_error(&self, msg: &str);
}

/// Default sink: prefixes lines with the application name, emits them
/// via `tracing`, and keeps a transcript.
pub struct Console {
    prefix: String,
    transcript: Mutex<String>,
}

impl Console {
    /// Create a console named `name`. An empty name falls back to
    /// `"conductor"`.
    pub fn new(name: &str) -> Self {
        let name = if name.is_empty() { "conductor" } else { name };
        Self {
            prefix: format!("[{name}]"),
            transcript: Mutex::new(String::new()),
        }
    }

    /// The accumulated transcript.
    pub fn transcript(&self) -> String {
        self.transcript.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Clear the transcript, returning what it held.
    pub fn clear(&self) -> String {
        let mut transcript = self.transcript.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *transcript)
    }

    fn append(&self, line: &str) {
        let mut transcript = self.transcript.lock().unwrap_or_else(|e| e.into_inner());
        transcript.push_str(line);
        transcript.push('\n');
    }
}

impl DiagnosticSink for Console {
    fn write(&self, msg: &str) {
        info!("{} {}", self.prefix, msg);
        self.append(msg);
    }

    fn write_error(&self, msg: &str) {
        error!("{} {}", self.prefix, msg);
        self.append(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_accumulates_in_order() {
        let console = Console::new("test");
        console.write("first");
        console.write_error("second");
        console.write("third");
        assert_eq!(console.transcript(), "first\nsecond\nthird\n");
    }

    #[test]
    fn test_clear_returns_content() {
        let console = Console::new("test");
        console.write("line");
        assert_eq!(console.clear(), "line\n");
        assert_eq!(console.transcript(), "");
    }

    #[test]
    fn test_empty_name_uses_default() {
        let console = Console::new("");
        assert_eq!(console.prefix, "[conductor]");
    }
}
