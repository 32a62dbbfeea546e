//! Console API
//!
//! Records what units print for the developer console and mirrors each line
//! to `tracing` under the `console` target.

use std::fmt::Write;

/// Console level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Log,
    Info,
    Warn,
    Error,
    Debug,
}

/// A run of text with optional `%c` CSS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleSegment {
    pub text: String,
    pub css: Option<String>,
}

/// One console line
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleEntry {
    pub level: ConsoleLevel,
    pub segments: Vec<ConsoleSegment>,
    /// Structured value logged after the text
    pub data: Option<serde_json::Value>,
}

impl ConsoleEntry {
    /// Plain text with styling dropped
    pub fn text(&self) -> String {
        let mut out: String = self.segments.iter().map(|s| s.text.as_str()).collect();
        if let Some(data) = &self.data {
            if !out.is_empty() {
                out.push(' ');
            }
            write!(out, "{data}").ok();
        }
        out
    }
}

/// Console
#[derive(Debug, Default)]
pub struct Console {
    entries: Vec<ConsoleEntry>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plain message
    pub fn log(&mut self, message: &str) {
        self.push(ConsoleLevel::Log, vec![plain(message)], None);
    }

    pub fn warn(&mut self, message: &str) {
        self.push(ConsoleLevel::Warn, vec![plain(message)], None);
    }

    /// Message followed by a structured value, like `console.log(label, obj)`
    pub fn log_value(&mut self, label: &str, value: serde_json::Value) {
        self.push(ConsoleLevel::Log, vec![plain(label)], Some(value));
    }

    /// Message with `%c` directives; each one applies the next style to the
    /// text that follows it
    pub fn log_styled(&mut self, format: &str, styles: &[&str]) {
        let mut pieces = format.split("%c");
        let mut segments = Vec::new();
        if let Some(head) = pieces.next().filter(|h| !h.is_empty()) {
            segments.push(plain(head));
        }
        for (i, piece) in pieces.enumerate() {
            if piece.is_empty() {
                continue;
            }
            segments.push(ConsoleSegment {
                text: piece.to_string(),
                css: styles.get(i).map(|s| s.to_string()),
            });
        }
        self.push(ConsoleLevel::Log, segments, None);
    }

    fn push(&mut self, level: ConsoleLevel, segments: Vec<ConsoleSegment>, data: Option<serde_json::Value>) {
        let entry = ConsoleEntry { level, segments, data };
        let text = entry.text();
        match level {
            ConsoleLevel::Error => tracing::error!(target: "console", "{text}"),
            ConsoleLevel::Warn => tracing::warn!(target: "console", "{text}"),
            ConsoleLevel::Debug => tracing::debug!(target: "console", "{text}"),
            ConsoleLevel::Log | ConsoleLevel::Info => tracing::info!(target: "console", "{text}"),
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ConsoleEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ConsoleEntry> {
        self.entries.last()
    }
}

fn plain(text: &str) -> ConsoleSegment {
    ConsoleSegment {
        text: text.to_string(),
        css: None,
    }
}
