// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Publishing captured entry URLs

use crate::browser::Console;
use crate::network::EventType;

use super::redact::redact_url;
use super::state::{PublishedEntry, TraceHandle};

/// Writes captured URLs to the trace state and announces them
///
/// Announcements carry only the redacted form.
#[derive(Debug, Clone)]
pub struct Publisher {
    state: TraceHandle,
    console: Console,
}

impl Publisher {
    /// Create a publisher over a page's state and console
    pub fn new(state: TraceHandle, console: Console) -> Self {
        Self { state, console }
    }

    /// The state written to
    pub fn state(&self) -> &TraceHandle {
        &self.state
    }

    /// Publish a captured URL; empty input publishes nothing
    pub fn publish(&self, url: &str, source: EventType) -> Option<PublishedEntry> {
        if url.is_empty() {
            return None;
        }

        let redacted = redact_url(url);
        let published = self.state.record(source, redacted, url);

        tracing::info!(source = %source, url = %redacted, "DUC entry URL captured");
        self.console
            .info(format!("[BTO] DUC entry URL captured: {}", redacted));

        Some(published)
    }

    /// Switch to full URL publishing for every later capture
    pub fn enable_full_url(&self) {
        self.state.enable_full_url();

        tracing::warn!("Full FSAG URL capture enabled (do not commit/log)");
        self.console
            .warn("[BTO] Full FSAG URL capture enabled (do not commit/log)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::ConsoleLevel;
    use crate::trace::PublishMode;

    #[test]
    fn test_publish_redacted_by_default() {
        let console = Console::default();
        let publisher = Publisher::new(TraceHandle::new(), console.clone());

        let published = publisher
            .publish("https://checkout.example/entry?token=abc#step", EventType::Fetch)
            .unwrap();

        assert_eq!(published.entry_url.as_deref(), Some("https://checkout.example/entry"));
        assert_eq!(published.entry_url_full, None);

        let messages = console.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(
            messages[0].message,
            "[BTO] DUC entry URL captured: https://checkout.example/entry"
        );
        assert!(!console.contains("token=abc"));
    }

    #[test]
    fn test_empty_url_is_ignored() {
        let publisher = Publisher::new(TraceHandle::new(), Console::default());
        assert_eq!(publisher.publish("", EventType::Xhr), None);
        assert_eq!(publisher.state().capture_count(), 0);
    }

    #[test]
    fn test_enable_full_url_warns_every_time() {
        let console = Console::default();
        let publisher = Publisher::new(TraceHandle::new(), console.clone());
        publisher.publish("https://c.example/e?t=1", EventType::Fetch);

        publisher.enable_full_url();
        publisher.enable_full_url();

        assert_eq!(publisher.state().mode(), PublishMode::FullEnabled);
        assert_eq!(publisher.state().entry_url_full(), None);
        let warnings = console
            .messages()
            .into_iter()
            .filter(|m| m.level == ConsoleLevel::Warn)
            .count();
        assert_eq!(warnings, 2);

        let published = publisher.publish("https://c.example/e?t=2", EventType::Fetch).unwrap();
        assert_eq!(published.entry_url_full.as_deref(), Some("https://c.example/e?t=2"));
        assert!(!console.contains("t=2"));
    }
}
