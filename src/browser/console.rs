// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page console capture

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

/// Console message type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub message: String,
}

/// Console log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleLevel {
    Log,
    Info,
    Warn,
    Error,
    Debug,
}

impl fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConsoleLevel::Log => "log",
            ConsoleLevel::Info => "info",
            ConsoleLevel::Warn => "warn",
            ConsoleLevel::Error => "error",
            ConsoleLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

/// Shared console output of a page
///
/// Clones share the same buffer. When capture is disabled messages are
/// dropped; when the buffer is full the oldest message goes first.
#[derive(Debug, Clone)]
pub struct Console {
    output: Arc<RwLock<Vec<ConsoleMessage>>>,
    capture: bool,
    max_messages: usize,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(true, 1000)
    }
}

impl Console {
    /// Create a console
    pub fn new(capture: bool, max_messages: usize) -> Self {
        Self {
            output: Arc::new(RwLock::new(Vec::new())),
            capture,
            max_messages,
        }
    }

    /// Console that records nothing
    pub fn disabled() -> Self {
        Self::new(false, 0)
    }

    /// Append a message
    pub fn push(&self, level: ConsoleLevel, message: impl Into<String>) {
        if !self.capture || self.max_messages == 0 {
            return;
        }
        let mut output = self.output.write();
        if output.len() >= self.max_messages {
            output.remove(0);
        }
        output.push(ConsoleMessage {
            level,
            message: message.into(),
        });
    }

    /// `console.log`
    pub fn log(&self, message: impl Into<String>) {
        self.push(ConsoleLevel::Log, message);
    }

    /// `console.info`
    pub fn info(&self, message: impl Into<String>) {
        self.push(ConsoleLevel::Info, message);
    }

    /// `console.warn`
    pub fn warn(&self, message: impl Into<String>) {
        self.push(ConsoleLevel::Warn, message);
    }

    /// `console.error`
    pub fn error(&self, message: impl Into<String>) {
        self.push(ConsoleLevel::Error, message);
    }

    /// Get console output
    pub fn messages(&self) -> Vec<ConsoleMessage> {
        self.output.read().clone()
    }

    /// Whether any message contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.output.read().iter().any(|m| m.message.contains(needle))
    }

    /// Clear console output
    pub fn clear(&self) {
        self.output.write().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_capture() {
        let console = Console::default();
        console.info("[BTO] hello");
        console.warn("careful");

        let output = console.clone().messages();
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].level, ConsoleLevel::Info);
        assert_eq!(output[1].message, "careful");
        assert!(console.contains("hello"));

        console.clear();
        assert!(console.messages().is_empty());
    }

    #[test]
    fn test_console_limit_and_disabled() {
        let console = Console::new(true, 2);
        console.log("a");
        console.log("b");
        console.error("c");
        let messages: Vec<_> = console.messages().into_iter().map(|m| m.message).collect();
        assert_eq!(messages, vec!["b", "c"]);

        let disabled = Console::disabled();
        disabled.warn("dropped");
        assert!(disabled.messages().is_empty());
    }

    #[test]
    fn test_level_display() {
        assert_eq!(ConsoleLevel::Warn.to_string(), "warn");
    }
}
