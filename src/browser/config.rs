// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser and Page configuration

use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, DEFAULT_USER_AGENT};

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// User agent string
    pub user_agent: String,
    /// Default timeout for requests
    pub timeout: Duration,
    /// Accept invalid TLS certificates
    pub ignore_https_errors: bool,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Maximum concurrent pages
    pub max_pages: usize,
    /// Default headers
    pub default_headers: Vec<(String, String)>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(30),
            ignore_https_errors: false,
            proxy: None,
            max_pages: 10,
            default_headers: vec![],
        }
    }
}

impl BrowserConfig {
    /// Create a new browser config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ignore HTTPS errors
    pub fn ignore_https_errors(mut self, ignore: bool) -> Self {
        self.ignore_https_errors = ignore;
        self
    }

    /// Set proxy
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set maximum number of open pages
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Add default header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// HTTP client settings for this browser
    pub fn http_client_config(&self) -> Result<HttpClientConfig> {
        let mut http_config = HttpClientConfig {
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
            accept_invalid_certs: self.ignore_https_errors,
            proxy: self.proxy.clone(),
            ..Default::default()
        };

        for (name, value) in &self.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::Config(format!("Invalid header name {:?}: {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::Config(format!("Invalid value for header {}: {}", name, e)))?;
            http_config.default_headers.insert(name, value);
        }

        Ok(http_config)
    }
}

/// Page configuration
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Timeout applied to page requests that set none
    pub timeout: Duration,
    /// Record console messages
    pub capture_console: bool,
    /// Console messages kept before the oldest is dropped
    pub max_console_messages: usize,
    /// Extra HTTP headers for this page's fetch requests
    pub extra_headers: Vec<(String, String)>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            capture_console: true,
            max_console_messages: 1000,
            extra_headers: vec![],
        }
    }
}

impl PageConfig {
    /// Create a new page config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable/disable console capture
    pub fn capture_console(mut self, enabled: bool) -> Self {
        self.capture_console = enabled;
        self
    }

    /// Limit the console buffer
    pub fn max_console_messages(mut self, max: usize) -> Self {
        self.max_console_messages = max;
        self
    }

    /// Add extra header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }
}
