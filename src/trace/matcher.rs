// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Decides which observed responses are worth parsing

use super::config::TracerConfig;

/// Filters observed calls down to the leasing endpoint's JSON responses
#[derive(Debug, Clone)]
pub struct PayloadMatcher {
    endpoint_fragment: String,
    json_marker: String,
}

impl PayloadMatcher {
    /// Create a matcher for an endpoint fragment and JSON content-type marker
    pub fn new(endpoint_fragment: impl Into<String>, json_marker: impl Into<String>) -> Self {
        Self {
            endpoint_fragment: endpoint_fragment.into(),
            json_marker: json_marker.into(),
        }
    }

    /// Create a matcher from tracer config
    pub fn from_config(config: &TracerConfig) -> Self {
        Self::new(config.endpoint_fragment.clone(), config.json_marker.clone())
    }

    /// The endpoint fragment being matched
    pub fn endpoint_fragment(&self) -> &str {
        &self.endpoint_fragment
    }

    /// Target address contains the endpoint fragment, whatever the host,
    /// scheme or query
    pub fn matches_target(&self, target: &str) -> bool {
        target.contains(self.endpoint_fragment.as_str())
    }

    /// Declared content type is JSON; a missing header never is
    pub fn accepts_content_type(&self, content_type: Option<&str>) -> bool {
        content_type
            .map(|ct| ct.contains(self.json_marker.as_str()))
            .unwrap_or(false)
    }

    /// Cheap pre-check for bodies whose headers were not inspected
    pub fn looks_like_json_object(&self, body: &str) -> bool {
        body.trim().starts_with('{')
    }
}

impl Default for PayloadMatcher {
    fn default() -> Self {
        Self::from_config(&TracerConfig::default())
    }
}
