// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Tracer configuration

/// Path fragment identifying the leasing endpoint
pub const DEFAULT_ENDPOINT_FRAGMENT: &str = "/bff/duc-leasing";

/// Content-type marker required before a fetch body is parsed
pub const DEFAULT_JSON_MARKER: &str = "application/json";

/// Nesting limit for the fallback URL search
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Entry tracer configuration
#[derive(Debug, Clone)]
pub struct TracerConfig {
    /// Substring a request target must contain to be inspected
    pub endpoint_fragment: String,
    /// Substring the fetch response content type must contain
    pub json_marker: String,
    /// Maximum nesting depth walked when searching for URLs
    pub max_depth: usize,
    /// Wrap the page's fetch primitive
    pub patch_fetch: bool,
    /// Wrap the page's XMLHttpRequest factory
    pub patch_xhr: bool,
    /// Also log every fetch response (redacted) through `RequestLogger`
    pub log_requests: bool,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            endpoint_fragment: DEFAULT_ENDPOINT_FRAGMENT.to_string(),
            json_marker: DEFAULT_JSON_MARKER.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            patch_fetch: true,
            patch_xhr: true,
            log_requests: false,
        }
    }
}

impl TracerConfig {
    /// Create a new tracer config
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the endpoint path fragment
    pub fn endpoint_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.endpoint_fragment = fragment.into();
        self
    }

    /// Override the JSON content-type marker
    pub fn json_marker(mut self, marker: impl Into<String>) -> Self {
        self.json_marker = marker.into();
        self
    }

    /// Set max traversal depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable/disable the fetch wrapper
    pub fn patch_fetch(mut self, enabled: bool) -> Self {
        self.patch_fetch = enabled;
        self
    }

    /// Enable/disable the XHR wrapper
    pub fn patch_xhr(mut self, enabled: bool) -> Self {
        self.patch_xhr = enabled;
        self
    }

    /// Enable/disable request logging
    pub fn log_requests(mut self, enabled: bool) -> Self {
        self.log_requests = enabled;
        self
    }
}
