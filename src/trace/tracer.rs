// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Entry tracer installation and response inspection
//!
//! [`EntryTracer::inject`] wraps a page's fetch primitive and XMLHttpRequest
//! factory. The wrappers hand every settled response to the tracer, which
//! filters, parses, extracts and publishes. Nothing the tracer does can change
//! what the page's callers receive.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;
use serde_json::Value;

use crate::browser::{Console, Page};
use crate::error::Result;
use crate::http::{Request, Response};
use crate::network::{
    EventType, FetchInterceptor, HookFactory, LoadListener, RequestInterceptor, RequestLogger,
    Transport, XhrFactory, XhrHook, XhrInterceptor, XhrResponse,
};

use super::config::TracerConfig;
use super::extract::LinkExtractor;
use super::matcher::PayloadMatcher;
use super::publish::Publisher;
use super::redact::redact_url;
use super::state::{PublishedEntry, TraceHandle};

/// Observes leasing endpoint responses and publishes the entry URL
///
/// Cheap to clone; clones share the same page state.
#[derive(Debug, Clone)]
pub struct EntryTracer {
    matcher: PayloadMatcher,
    extractor: LinkExtractor,
    publisher: Publisher,
    log_requests: bool,
}

impl EntryTracer {
    /// Create a tracer over existing state, without installing anything
    pub fn new(state: TraceHandle, console: Console, config: &TracerConfig) -> Self {
        Self {
            matcher: PayloadMatcher::from_config(config),
            extractor: LinkExtractor::new(config.max_depth),
            publisher: Publisher::new(state, console),
            log_requests: config.log_requests,
        }
    }

    /// Install the tracer into a page
    ///
    /// Safe to call any number of times: the page's state is created once
    /// and each primitive is wrapped at most once, so every real response is
    /// inspected exactly once.
    pub fn inject(page: &Page, config: TracerConfig) -> Self {
        let tracer = Self::new(page.trace_state(), page.console().clone(), &config);

        if config.patch_fetch {
            tracer.install_fetch(page);
        }
        if config.patch_xhr {
            tracer.install_xhr(page);
        }

        tracing::info!(
            page = %page.id(),
            endpoint = %config.endpoint_fragment,
            "DUC entry tracer installed"
        );
        page.console().info("[BTO] DUC entry tracer installed.");

        tracer
    }

    /// Wrap the page's fetch primitive; false if it was already wrapped
    pub fn install_fetch(&self, page: &Page) -> bool {
        if !self.state().claim_fetch_patch() {
            tracing::debug!(page = %page.id(), "fetch already traced");
            return false;
        }

        let inner = page.fetch_primitive();
        if inner.is_traced() {
            tracing::debug!(page = %page.id(), "fetch primitive already carries a tracer");
            return false;
        }

        page.install_fetch(Arc::new(self.wrap_fetch(inner)));
        true
    }

    /// Wrap the page's XMLHttpRequest factory; false if it was already wrapped
    pub fn install_xhr(&self, page: &Page) -> bool {
        if !self.state().claim_xhr_patch() {
            tracing::debug!(page = %page.id(), "XMLHttpRequest already traced");
            return false;
        }

        let inner = page.xhr_factory();
        if inner.is_traced() {
            tracing::debug!(page = %page.id(), "XMLHttpRequest factory already carries a tracer");
            return false;
        }

        page.install_xhr(Arc::new(self.wrap_xhr(inner)));
        true
    }

    /// Decorate a fetch primitive with this tracer
    pub fn wrap_fetch(&self, inner: Arc<dyn Transport>) -> FetchInterceptor {
        let mut fetch = FetchInterceptor::new(inner).with_interceptor(self.clone());
        if self.log_requests {
            fetch = fetch.with_interceptor(RequestLogger::default());
        }
        fetch.mark_traced()
    }

    /// Decorate an XMLHttpRequest factory with this tracer
    pub fn wrap_xhr(&self, inner: Arc<dyn XhrFactory>) -> XhrInterceptor {
        let tracer = self.clone();
        let hooks: HookFactory =
            Arc::new(move || Box::new(XhrTraceHook::new(tracer.clone())) as Box<dyn XhrHook>);
        XhrInterceptor::new(inner, hooks).mark_traced()
    }

    /// Extract from a parsed payload and publish the result
    pub fn handle_json(&self, json: &Value, source: EventType) -> Option<PublishedEntry> {
        let url = self.extractor.extract(json)?;
        self.publisher.publish(&url, source)
    }

    /// Inspect a settled fetch response
    ///
    /// `Ok(None)` when the response is not a qualifying payload or carries no
    /// URL. An unparseable JSON body is an error for the caller to swallow.
    pub fn inspect_fetch_response(
        &self,
        target: &str,
        response: &Response,
    ) -> Result<Option<PublishedEntry>> {
        if !self.matcher.matches_target(target) {
            return Ok(None);
        }
        if !self.matcher.accepts_content_type(response.content_type()) {
            return Ok(None);
        }

        let json: Value = response.json()?;
        Ok(self.handle_json(&json, EventType::Fetch))
    }

    /// Inspect a completed XMLHttpRequest
    ///
    /// `target` is what was passed to `open()`; `None` means `open()` was
    /// never observed.
    pub fn inspect_xhr_response(
        &self,
        target: Option<&str>,
        response: &XhrResponse,
    ) -> Result<Option<PublishedEntry>> {
        let target = match target {
            Some(t) if self.matcher.matches_target(t) => t,
            _ => return Ok(None),
        };
        if !self.matcher.looks_like_json_object(&response.response_text) {
            tracing::debug!(url = %redact_url(target), "XHR body is not a JSON object");
            return Ok(None);
        }

        let json: Value = serde_json::from_str(&response.response_text)?;
        Ok(self.handle_json(&json, EventType::Xhr))
    }

    /// Publish full URLs for all later captures
    pub fn enable_full_url(&self) {
        self.publisher.enable_full_url();
    }

    /// Published redacted entry URL
    pub fn entry_url(&self) -> Option<String> {
        self.state().entry_url()
    }

    /// Published full entry URL
    pub fn entry_url_full(&self) -> Option<String> {
        self.state().entry_url_full()
    }

    /// Both published values
    pub fn published(&self) -> PublishedEntry {
        self.state().published()
    }

    /// Shared page state
    pub fn state(&self) -> &TraceHandle {
        self.publisher.state()
    }

    /// Matcher in use
    pub fn matcher(&self) -> &PayloadMatcher {
        &self.matcher
    }
}

#[async_trait]
impl RequestInterceptor for EntryTracer {
    fn should_intercept(&self, request: &Request) -> bool {
        self.matcher.matches_target(request.url_str())
    }

    async fn after_response(&self, request: &Request, response: Response) -> Result<()> {
        self.inspect_fetch_response(request.url_str(), &response)?;
        Ok(())
    }

    fn priority(&self) -> i32 {
        50
    }
}

/// Per-request hook attached to every traced XMLHttpRequest
pub struct XhrTraceHook {
    tracer: EntryTracer,
    target: Mutex<Option<String>>,
}

impl XhrTraceHook {
    /// Create a hook for one request instance
    pub fn new(tracer: EntryTracer) -> Self {
        Self {
            tracer,
            target: Mutex::new(None),
        }
    }
}

impl XhrHook for XhrTraceHook {
    fn on_open(&self, _method: &Method, url: &str) {
        *self.target.lock() = Some(url.to_string());
    }

    fn on_send(&self) -> Option<LoadListener> {
        let tracer = self.tracer.clone();
        let target = self.target.lock().clone();

        Some(Arc::new(move |response: &XhrResponse| {
            if let Err(e) = tracer.inspect_xhr_response(target.as_deref(), response) {
                tracing::debug!(
                    url = %redact_url(target.as_deref().unwrap_or_default()),
                    error = %e,
                    "XHR inspection failed"
                );
            }
        }))
    }
}
