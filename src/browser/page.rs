// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Page implementation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use url::Url;

use super::config::PageConfig;
use super::console::Console;
use crate::error::{Error, Result};
use crate::http::{Request, Response};
use crate::network::{NativeXhrFactory, Transport, XhrFactory, XmlHttpRequest};
use crate::trace::{PublishedEntry, Publisher, TraceHandle, TraceSnapshot};

/// A browser page
///
/// Owns two replaceable request primitives, `fetch` and the
/// `XMLHttpRequest` factory, plus the page's trace state and console.
pub struct Page {
    /// Page ID
    id: String,
    /// Page configuration
    config: PageConfig,
    /// Native transport, used for navigation
    transport: Arc<dyn Transport>,
    /// Current `fetch` primitive
    fetch: RwLock<Arc<dyn Transport>>,
    /// Current `XMLHttpRequest` constructor
    xhr: RwLock<Arc<dyn XhrFactory>>,
    /// Current URL
    url: RwLock<Option<Url>>,
    /// Entry trace state, created on first use
    trace_state: OnceLock<TraceHandle>,
    /// Console output
    console: Console,
    /// Set once the page is closed
    closed: AtomicBool,
}

impl Page {
    /// Create a new page over a native transport
    pub(crate) fn new(id: String, config: PageConfig, transport: Arc<dyn Transport>) -> Self {
        let console = Console::new(config.capture_console, config.max_console_messages);
        let xhr: Arc<dyn XhrFactory> = Arc::new(NativeXhrFactory::new(transport.clone()));

        Self {
            id,
            config,
            fetch: RwLock::new(transport.clone()),
            transport,
            xhr: RwLock::new(xhr),
            url: RwLock::new(None),
            trace_state: OnceLock::new(),
            console,
            closed: AtomicBool::new(false),
        }
    }

    /// Get page ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get page configuration
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Get current URL
    pub fn url(&self) -> Option<String> {
        self.url.read().as_ref().map(|u| u.to_string())
    }

    /// Set the page URL without loading anything
    pub fn set_url(&self, url: &str) -> Result<()> {
        *self.url.write() = Some(Url::parse(url)?);
        Ok(())
    }

    /// Resolve a possibly relative target against the page URL
    pub fn resolve_url(&self, target: &str) -> Result<Url> {
        match *self.url.read() {
            Some(ref base) => Ok(base.join(target)?),
            None => Ok(Url::parse(target)?),
        }
    }

    /// Load a document through the native transport and make it the page URL
    ///
    /// Navigation is not a `fetch` call, so page-level wrappers do not see it.
    pub async fn navigate(&self, url: &str) -> Result<Response> {
        self.ensure_open()?;

        let request = Request::get(url)?.timeout(self.config.timeout);
        let response = self.transport.send(request).await?;

        *self.url.write() = Some(response.url.clone());
        tracing::debug!(page = %self.id, status = %response.status, "Navigated");

        Ok(response)
    }

    /// The current `fetch` primitive
    pub fn fetch_primitive(&self) -> Arc<dyn Transport> {
        self.fetch.read().clone()
    }

    /// Replace the `fetch` primitive
    pub fn install_fetch(&self, fetch: Arc<dyn Transport>) {
        *self.fetch.write() = fetch;
    }

    /// The current `XMLHttpRequest` constructor
    pub fn xhr_factory(&self) -> Arc<dyn XhrFactory> {
        self.xhr.read().clone()
    }

    /// Replace the `XMLHttpRequest` constructor
    pub fn install_xhr(&self, factory: Arc<dyn XhrFactory>) {
        *self.xhr.write() = factory;
    }

    /// Call the page's `fetch`
    pub async fn fetch(&self, mut request: Request) -> Result<Response> {
        self.ensure_open()?;

        for (name, value) in &self.config.extra_headers {
            request = request.header(name, value);
        }
        if request.timeout.is_none() {
            request = request.timeout(self.config.timeout);
        }

        let fetch = self.fetch_primitive();
        fetch.send(request).await
    }

    /// `fetch(url)` with a target relative to the page URL
    pub async fn fetch_url(&self, target: &str) -> Result<Response> {
        let url = self.resolve_url(target)?;
        self.fetch(Request::get(url)?).await
    }

    /// `new XMLHttpRequest()`
    pub fn xhr(&self) -> Result<XmlHttpRequest> {
        self.ensure_open()?;
        Ok(self
            .xhr_factory()
            .create()
            .with_base_url(self.url.read().clone()))
    }

    /// Trace state of this page, created on first call
    pub fn trace_state(&self) -> TraceHandle {
        self.trace_state.get_or_init(TraceHandle::new).clone()
    }

    /// Whether trace state exists, from injection or early activation
    ///
    /// This says nothing about installed wrappers; see
    /// [`TraceHandle::fetch_patched`] for that.
    pub fn has_trace_state(&self) -> bool {
        self.trace_state.get().is_some()
    }

    /// Published redacted entry URL
    pub fn entry_url(&self) -> Option<String> {
        self.trace_state.get().and_then(|s| s.entry_url())
    }

    /// Published full entry URL; only set after [`Page::enable_full_entry_url`]
    pub fn entry_url_full(&self) -> Option<String> {
        self.trace_state.get().and_then(|s| s.entry_url_full())
    }

    /// Both published values
    pub fn published_entry(&self) -> PublishedEntry {
        self.trace_state
            .get()
            .map(|s| s.published())
            .unwrap_or_default()
    }

    /// Serializable view of the trace state
    pub fn trace_snapshot(&self) -> Option<TraceSnapshot> {
        self.trace_state.get().map(|s| s.snapshot())
    }

    /// Publish full entry URLs from now on
    pub fn enable_full_entry_url(&self) {
        Publisher::new(self.trace_state(), self.console.clone()).enable_full_url();
    }

    /// Page console
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Console output as `[level] message` lines
    pub fn console_output(&self) -> Vec<String> {
        self.console
            .messages()
            .into_iter()
            .map(|m| format!("[{}] {}", m.level, m.message))
            .collect()
    }

    /// Close the page; later requests fail
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Check if page is closed
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(Error::PageClosed(self.id.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;

    struct Echo;

    #[async_trait]
    impl Transport for Echo {
        async fn send(&self, request: Request) -> Result<Response> {
            let body = format!(
                r#"{{"url":"{}","timeout":{}}}"#,
                request.url,
                request.timeout.is_some()
            );
            Ok(Response::json_body(request.url, StatusCode::OK, body))
        }
    }

    fn page() -> Page {
        Page::new("test".to_string(), PageConfig::default(), Arc::new(Echo))
    }

    #[test]
    fn test_page_creation() {
        let page = page();
        assert_eq!(page.id(), "test");
        assert_eq!(page.url(), None);
        assert!(!page.has_trace_state());
        assert_eq!(page.entry_url(), None);
        assert_eq!(page.published_entry(), PublishedEntry::default());
        assert!(page.trace_snapshot().is_none());
    }

    #[tokio::test]
    async fn test_fetch_relative_to_page_url() {
        let page = page();
        page.set_url("https://shop.example/cars/1").unwrap();

        let response = page.fetch_url("/bff/duc-leasing").await.unwrap();
        assert_eq!(response.url_str(), "https://shop.example/bff/duc-leasing");
        assert!(response.text().unwrap().contains(r#""timeout":true"#));
    }

    #[tokio::test]
    async fn test_navigate_sets_url() {
        let page = page();
        page.navigate("https://shop.example/").await.unwrap();
        assert_eq!(page.url().as_deref(), Some("https://shop.example/"));
    }

    #[tokio::test]
    async fn test_closed_page() {
        let page = page();
        page.close();

        let err = page.fetch_url("https://shop.example/").await.unwrap_err();
        assert!(matches!(err, Error::PageClosed(ref id) if id == "test"));
        assert!(page.xhr().is_err());
    }

    #[test]
    fn test_activation_before_injection() {
        let page = page();
        page.enable_full_entry_url();

        assert!(page.has_trace_state());
        assert!(page.trace_state().full_url_enabled());
        assert_eq!(page.entry_url_full(), None);
        assert_eq!(
            page.console_output(),
            vec!["[warn] [BTO] Full FSAG URL capture enabled (do not commit/log)".to_string()]
        );
    }
}
