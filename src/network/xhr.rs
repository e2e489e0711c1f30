// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Event-style request object, modelled on `XMLHttpRequest`
//!
//! `send()` never suspends the caller. The transfer runs on a spawned tokio
//! task and completion is reported to `load` / `error` listeners from there.
//! [`XhrHook`]s see the `open()` and `send()` steps of a single instance,
//! which is how observers remember the target address per request.

use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use url::Url;

use super::interceptor_trait::Transport;
use crate::error::{Error, Result};
use crate::http::{Request, Response};

/// Listener for the `load` event
pub type LoadListener = Arc<dyn Fn(&XhrResponse) + Send + Sync>;

/// Listener for the `error` event
pub type ErrorListener = Arc<dyn Fn(&Error) + Send + Sync>;

/// Builds one hook per request instance
pub type HookFactory = Arc<dyn Fn() -> Box<dyn XhrHook> + Send + Sync>;

/// Request lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// Created, `open()` not yet called
    Unsent,
    /// `open()` called
    Opened,
}

/// Completed response as seen by `load` listeners
#[derive(Debug, Clone)]
pub struct XhrResponse {
    /// HTTP status
    pub status: u16,
    /// Reason phrase
    pub status_text: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Body decoded as text (lossy)
    pub response_text: String,
    /// Final URL after redirects
    pub response_url: String,
}

impl XhrResponse {
    /// Parse the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.response_text).map_err(Error::from)
    }
}

impl From<Response> for XhrResponse {
    fn from(response: Response) -> Self {
        Self {
            status: response.status_code(),
            status_text: response
                .status
                .canonical_reason()
                .unwrap_or("")
                .to_string(),
            response_text: response.text_lossy(),
            response_url: response.url.to_string(),
            headers: response.headers,
        }
    }
}

/// Observer of a single request instance's `open()` and `send()` steps
pub trait XhrHook: Send + Sync {
    /// Called from `open()` with the target exactly as the caller passed it
    fn on_open(&self, _method: &Method, _url: &str) {}

    /// Called from `send()`; a returned listener is attached to `load`
    fn on_send(&self) -> Option<LoadListener> {
        None
    }
}

/// Event-style request object
pub struct XmlHttpRequest {
    transport: Arc<dyn Transport>,
    hooks: Vec<Box<dyn XhrHook>>,
    base_url: Option<Url>,
    ready_state: ReadyState,
    method: Method,
    url: Option<Url>,
    headers: Vec<(String, String)>,
    load_listeners: Vec<LoadListener>,
    error_listeners: Vec<ErrorListener>,
}

impl XmlHttpRequest {
    /// Create a request object on top of a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            hooks: Vec::new(),
            base_url: None,
            ready_state: ReadyState::Unsent,
            method: Method::GET,
            url: None,
            headers: Vec::new(),
            load_listeners: Vec::new(),
            error_listeners: Vec::new(),
        }
    }

    /// Resolve relative targets against this base (the page URL)
    pub fn with_base_url(mut self, base_url: Option<Url>) -> Self {
        self.base_url = base_url;
        self
    }

    /// Attach a hook to this instance
    pub fn add_hook(&mut self, hook: Box<dyn XhrHook>) {
        self.hooks.push(hook);
    }

    /// Current lifecycle state
    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    /// Initialize the request
    pub fn open(&mut self, method: Method, url: &str) -> Result<()> {
        for hook in &self.hooks {
            hook.on_open(&method, url);
        }

        let resolved = match self.base_url {
            Some(ref base) => base.join(url),
            None => Url::parse(url),
        }
        .map_err(|e| Error::xhr_with_url(format!("invalid URL: {}", e), url))?;

        self.method = method;
        self.url = Some(resolved);
        self.headers.clear();
        self.ready_state = ReadyState::Opened;
        Ok(())
    }

    /// Set a request header; only valid after `open()`
    pub fn set_request_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        if self.ready_state != ReadyState::Opened {
            return Err(Error::xhr("setRequestHeader() called before open()"));
        }
        self.headers.push((name.into(), value.into()));
        Ok(())
    }

    /// Register a `load` listener
    pub fn add_load_listener(&mut self, listener: LoadListener) {
        self.load_listeners.push(listener);
    }

    /// Register an `error` listener
    pub fn add_error_listener(&mut self, listener: ErrorListener) {
        self.error_listeners.push(listener);
    }

    /// Start the transfer and return immediately
    ///
    /// Fails without side effects when no tokio runtime is running.
    pub fn send(mut self, body: Option<Bytes>) -> Result<XhrHandle> {
        let url = match (self.ready_state, self.url.take()) {
            (ReadyState::Opened, Some(url)) => url,
            _ => return Err(Error::xhr("send() called before open()")),
        };

        let runtime = Handle::try_current()
            .map_err(|e| Error::xhr_with_url(format!("no async runtime: {}", e), url.as_str()))?;

        for hook in &self.hooks {
            if let Some(listener) = hook.on_send() {
                self.load_listeners.push(listener);
            }
        }

        let mut request = Request {
            method: self.method,
            url: url.clone(),
            headers: HeaderMap::new(),
            body,
            timeout: None,
        };
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        let transport = self.transport;
        let load_listeners = self.load_listeners;
        let error_listeners = self.error_listeners;

        let task = runtime.spawn(async move {
            match transport.send(request).await {
                Ok(response) => {
                    let response = XhrResponse::from(response);
                    for listener in &load_listeners {
                        listener(&response);
                    }
                    Ok(response)
                }
                Err(e) => {
                    for listener in &error_listeners {
                        listener(&e);
                    }
                    Err(e)
                }
            }
        });

        Ok(XhrHandle { url, task })
    }
}

/// In-flight request; awaiting it is optional
pub struct XhrHandle {
    url: Url,
    task: JoinHandle<Result<XhrResponse>>,
}

impl XhrHandle {
    /// Target of the request
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Wait for the transfer and all listeners to complete
    pub async fn wait(self) -> Result<XhrResponse> {
        self.task
            .await
            .map_err(|e| Error::xhr_with_url(format!("request task failed: {}", e), self.url.as_str()))?
    }
}

/// Creates request objects; the page's `XMLHttpRequest` constructor
pub trait XhrFactory: Send + Sync {
    /// Construct a fresh request object
    fn create(&self) -> XmlHttpRequest;

    /// Whether objects from this factory already carry the entry tracer
    fn is_traced(&self) -> bool {
        false
    }
}

/// Factory producing plain request objects over a transport
pub struct NativeXhrFactory {
    transport: Arc<dyn Transport>,
}

impl NativeXhrFactory {
    /// Create a factory over a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

impl XhrFactory for NativeXhrFactory {
    fn create(&self) -> XmlHttpRequest {
        XmlHttpRequest::new(self.transport.clone())
    }
}

/// Decorates a factory so every object it creates carries a fresh hook
pub struct XhrInterceptor {
    inner: Arc<dyn XhrFactory>,
    hooks: HookFactory,
    traced: bool,
}

impl XhrInterceptor {
    /// Wrap a factory
    pub fn new(inner: Arc<dyn XhrFactory>, hooks: HookFactory) -> Self {
        Self {
            inner,
            hooks,
            traced: false,
        }
    }

    /// Mark this wrapper as carrying the entry tracer
    pub fn mark_traced(mut self) -> Self {
        self.traced = true;
        self
    }
}

impl XhrFactory for XhrInterceptor {
    fn create(&self) -> XmlHttpRequest {
        let mut xhr = self.inner.create();
        xhr.add_hook((self.hooks)());
        xhr
    }

    fn is_traced(&self) -> bool {
        self.traced || self.inner.is_traced()
    }
}
