// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-page trace state
//!
//! One trace state exists per page. It is created on first injection and
//! survives re-injection untouched; only matched responses and the explicit
//! activation call mutate it. Concurrent matches are last-write-wins.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

use crate::network::EventType;

/// Which forms of the entry URL are published
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishMode {
    /// Only the redacted URL is published (initial state)
    RedactedOnly,
    /// Full URLs are published for every later match; there is no way back
    FullEnabled,
}

/// The values a controller reads after a match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublishedEntry {
    /// Redacted entry URL, set on every match
    pub entry_url: Option<String>,
    /// Full entry URL, only set by matches after activation
    pub entry_url_full: Option<String>,
}

#[derive(Debug, Default)]
struct TraceState {
    fetch_patched: bool,
    xhr_patched: bool,
    enable_full_url: bool,
    last_source: Option<EventType>,
    last_url_redacted: Option<String>,
    last_url_full: Option<String>,
    last_captured_at: Option<DateTime<Utc>>,
    capture_count: u64,
    published: PublishedEntry,
}

/// Serializable view of the trace state
///
/// The full URL is left out unless full publishing is enabled.
#[derive(Debug, Clone, Serialize)]
pub struct TraceSnapshot {
    pub fetch_patched: bool,
    pub xhr_patched: bool,
    pub mode: PublishMode,
    pub last_source: Option<EventType>,
    pub last_url_redacted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_url_full: Option<String>,
    pub last_captured_at: Option<DateTime<Utc>>,
    pub capture_count: u64,
    pub published: PublishedEntry,
}

/// Shared handle to a page's trace state
#[derive(Debug, Clone, Default)]
pub struct TraceHandle {
    inner: Arc<RwLock<TraceState>>,
}

impl TraceHandle {
    /// Create fresh state
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether both handles point at the same state
    pub fn same_state(&self, other: &TraceHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Whether the fetch wrapper has been installed
    pub fn fetch_patched(&self) -> bool {
        self.inner.read().fetch_patched
    }

    /// Whether the XHR wrapper has been installed
    pub fn xhr_patched(&self) -> bool {
        self.inner.read().xhr_patched
    }

    /// Claim the fetch patch; false if it was already claimed
    pub fn claim_fetch_patch(&self) -> bool {
        let mut state = self.inner.write();
        !std::mem::replace(&mut state.fetch_patched, true)
    }

    /// Claim the XHR patch; false if it was already claimed
    pub fn claim_xhr_patch(&self) -> bool {
        let mut state = self.inner.write();
        !std::mem::replace(&mut state.xhr_patched, true)
    }

    /// Current publish mode
    pub fn mode(&self) -> PublishMode {
        if self.inner.read().enable_full_url {
            PublishMode::FullEnabled
        } else {
            PublishMode::RedactedOnly
        }
    }

    /// Whether full URLs are published
    pub fn full_url_enabled(&self) -> bool {
        self.inner.read().enable_full_url
    }

    /// Switch to [`PublishMode::FullEnabled`]; returns whether this call
    /// changed the mode
    pub fn enable_full_url(&self) -> bool {
        let mut state = self.inner.write();
        !std::mem::replace(&mut state.enable_full_url, true)
    }

    /// Record a match and update the published values
    pub fn record(&self, source: EventType, url_redacted: &str, url_full: &str) -> PublishedEntry {
        let mut state = self.inner.write();

        state.last_source = Some(source);
        state.last_url_redacted = Some(url_redacted.to_string());
        state.last_url_full = Some(url_full.to_string());
        state.last_captured_at = Some(Utc::now());
        state.capture_count += 1;

        state.published.entry_url = Some(url_redacted.to_string());
        if state.enable_full_url {
            state.published.entry_url_full = Some(url_full.to_string());
        }

        state.published.clone()
    }

    /// Published values
    pub fn published(&self) -> PublishedEntry {
        self.inner.read().published.clone()
    }

    /// Published redacted entry URL
    pub fn entry_url(&self) -> Option<String> {
        self.inner.read().published.entry_url.clone()
    }

    /// Published full entry URL
    pub fn entry_url_full(&self) -> Option<String> {
        self.inner.read().published.entry_url_full.clone()
    }

    /// Primitive that produced the last match
    pub fn last_source(&self) -> Option<EventType> {
        self.inner.read().last_source
    }

    /// Number of matches recorded
    pub fn capture_count(&self) -> u64 {
        self.inner.read().capture_count
    }

    /// Time of the last match
    pub fn last_captured_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().last_captured_at
    }

    /// Serializable view of the state
    pub fn snapshot(&self) -> TraceSnapshot {
        let state = self.inner.read();
        TraceSnapshot {
            fetch_patched: state.fetch_patched,
            xhr_patched: state.xhr_patched,
            mode: if state.enable_full_url {
                PublishMode::FullEnabled
            } else {
                PublishMode::RedactedOnly
            },
            last_source: state.last_source,
            last_url_redacted: state.last_url_redacted.clone(),
            last_url_full: if state.enable_full_url {
                state.last_url_full.clone()
            } else {
                None
            },
            last_captured_at: state.last_captured_at,
            capture_count: state.capture_count,
            published: state.published.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_claims_are_one_shot() {
        let state = TraceHandle::new();

        assert!(state.claim_fetch_patch());
        assert!(!state.claim_fetch_patch());
        assert!(state.fetch_patched());
        assert!(!state.xhr_patched());
        assert!(state.claim_xhr_patch());
        assert!(!state.clone().claim_xhr_patch());
    }

    #[test]
    fn test_record_redacted_only() {
        let state = TraceHandle::new();
        let published = state.record(EventType::Fetch, "https://c.example/e", "https://c.example/e?t=1");

        assert_eq!(published.entry_url.as_deref(), Some("https://c.example/e"));
        assert_eq!(published.entry_url_full, None);
        assert_eq!(state.last_source(), Some(EventType::Fetch));
        assert_eq!(state.capture_count(), 1);
        assert!(state.last_captured_at().is_some());
    }

    #[test]
    fn test_activation_is_not_retroactive() {
        let state = TraceHandle::new();
        state.record(EventType::Xhr, "https://c.example/1", "https://c.example/1?t=1");

        assert_eq!(state.mode(), PublishMode::RedactedOnly);
        assert!(state.enable_full_url());
        assert!(!state.enable_full_url());
        assert_eq!(state.mode(), PublishMode::FullEnabled);
        assert_eq!(state.entry_url_full(), None);

        state.record(EventType::Xhr, "https://c.example/2", "https://c.example/2?t=2");
        assert_eq!(state.entry_url().as_deref(), Some("https://c.example/2"));
        assert_eq!(state.entry_url_full().as_deref(), Some("https://c.example/2?t=2"));
    }

    #[test]
    fn test_snapshot_hides_full_url_until_enabled() {
        let state = TraceHandle::new();
        state.record(EventType::Fetch, "https://c.example/e", "https://c.example/e?secret=1");

        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"mode\":\"redacted_only\""));
        assert!(json.contains("\"last_source\":\"fetch\""));

        state.enable_full_url();
        assert_eq!(
            state.snapshot().last_url_full.as_deref(),
            Some("https://c.example/e?secret=1")
        );
    }

    #[test]
    fn test_same_state() {
        let a = TraceHandle::new();
        assert!(a.same_state(&a.clone()));
        assert!(!a.same_state(&TraceHandle::new()));
    }
}
