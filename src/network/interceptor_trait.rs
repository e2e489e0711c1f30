// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport and observer traits
//!
//! [`Transport`] is the request primitive itself; [`RequestInterceptor`] is a
//! read-only observer that sees a clone of every response after the real call
//! settles.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::http::{Request, Response};
use crate::trace::redact_url;

/// A request primitive: the page's `fetch`, or anything wrapping it
///
/// # Example
///
/// ```rust,no_run
/// use entrytrace::network::Transport;
/// use entrytrace::http::{Request, Response};
/// use entrytrace::Result;
/// use async_trait::async_trait;
///
/// struct Offline;
///
/// #[async_trait]
/// impl Transport for Offline {
///     async fn send(&self, request: Request) -> Result<Response> {
///         Err(entrytrace::Error::network(format!("offline: {}", request.url)))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the request
    async fn send(&self, request: Request) -> Result<Response>;

    /// Whether this primitive already carries the entry tracer
    fn is_traced(&self) -> bool {
        false
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: Request) -> Result<Response> {
        (**self).send(request).await
    }

    fn is_traced(&self) -> bool {
        (**self).is_traced()
    }
}

/// Response observer, similar to the CDP Fetch domain in response stage
///
/// Observers cannot change the response; they get their own clone of it.
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    /// Filter - return true if this interceptor should see the request
    fn should_intercept(&self, _request: &Request) -> bool {
        true
    }

    /// Called after a response is received
    async fn after_response(&self, _request: &Request, _response: Response) -> Result<()> {
        Ok(())
    }

    /// Called when the request fails
    async fn on_error(&self, _request: &Request, _error: &Error) {}

    /// Priority - higher priority interceptors run first
    fn priority(&self) -> i32 {
        0
    }
}

/// Request logger interceptor
///
/// Only ever logs redacted URLs; query strings on this traffic carry tokens.
#[derive(Debug, Clone, Default)]
pub struct RequestLogger {
    /// Filter by URL substring
    pub url_filter: Option<String>,
}

impl RequestLogger {
    /// Log only requests whose URL contains `filter`
    pub fn filtered(filter: impl Into<String>) -> Self {
        Self {
            url_filter: Some(filter.into()),
        }
    }
}

#[async_trait]
impl RequestInterceptor for RequestLogger {
    fn should_intercept(&self, request: &Request) -> bool {
        match self.url_filter {
            Some(ref filter) => request.url_str().contains(filter.as_str()),
            None => true,
        }
    }

    async fn after_response(&self, request: &Request, response: Response) -> Result<()> {
        tracing::info!(
            method = %request.method,
            url = %redact_url(request.url_str()),
            status = %response.status,
            time_ms = response.response_time_ms,
            "Response"
        );
        Ok(())
    }

    async fn on_error(&self, request: &Request, error: &Error) {
        tracing::info!(
            method = %request.method,
            url = %redact_url(request.url_str()),
            error = %error,
            "Request failed"
        );
    }

    fn priority(&self) -> i32 {
        -100 // Low priority - run logging last
    }
}

/// Interceptor chain - manages multiple observers
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    /// Add an interceptor
    pub fn add<I: RequestInterceptor + 'static>(&mut self, interceptor: I) {
        self.interceptors.push(Arc::new(interceptor));
        // Sort by priority (highest first); stable, so ties keep insertion order
        self.interceptors
            .sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Number of interceptors
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether the chain is empty
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Hand a clone of the response to every interested interceptor
    ///
    /// Failures are contained here: they are logged and never reach the
    /// caller of the wrapped primitive.
    pub async fn process_response(&self, request: &Request, response: &Response) {
        for interceptor in &self.interceptors {
            if !interceptor.should_intercept(request) {
                continue;
            }
            if let Err(e) = interceptor.after_response(request, response.clone()).await {
                tracing::debug!(
                    url = %redact_url(request.url_str()),
                    error = %e,
                    "Response inspection failed"
                );
            }
        }
    }

    /// Notify interested interceptors of an error, concurrently
    pub async fn notify_error(&self, request: &Request, error: &Error) {
        let notified = self
            .interceptors
            .iter()
            .filter(|i| i.should_intercept(request))
            .map(|i| i.on_error(request, error));
        futures::future::join_all(notified).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use reqwest::StatusCode;

    struct Recorder {
        name: &'static str,
        priority: i32,
        seen: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
    }

    #[async_trait]
    impl RequestInterceptor for Recorder {
        async fn after_response(&self, _request: &Request, _response: Response) -> Result<()> {
            self.seen.lock().push(self.name);
            if self.fail {
                return Err(Error::other("inspection failed"));
            }
            Ok(())
        }

        fn priority(&self) -> i32 {
            self.priority
        }
    }

    #[tokio::test]
    async fn test_chain_runs_by_priority_and_contains_errors() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut chain = InterceptorChain::new();
        chain.add(Recorder { name: "low", priority: -1, seen: seen.clone(), fail: false });
        chain.add(Recorder { name: "high", priority: 10, seen: seen.clone(), fail: true });
        chain.add(RequestLogger::default());

        let request = Request::get("https://example.com/bff/duc-leasing").unwrap();
        let response = Response::json_body(request.url.clone(), StatusCode::OK, "{}");
        chain.process_response(&request, &response).await;

        assert_eq!(chain.len(), 3);
        assert_eq!(*seen.lock(), vec!["high", "low"]);
    }

    #[test]
    fn test_logger_filter() {
        let logger = RequestLogger::filtered("/bff/");
        let hit = Request::get("https://example.com/bff/duc-leasing").unwrap();
        let miss = Request::get("https://example.com/static/app.js").unwrap();

        assert!(logger.should_intercept(&hit));
        assert!(!logger.should_intercept(&miss));
    }
}
