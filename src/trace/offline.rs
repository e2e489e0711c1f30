// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Extraction from saved endpoint responses

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ErrorContext, Result};

use super::extract::{Candidate, LinkExtractor};
use super::redact::redact_url;

/// Result of running the extractor over a saved payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionReport {
    /// Candidate the tracer would publish
    pub selected: Option<Candidate>,
    /// Every candidate, named links first
    pub candidates: Vec<Candidate>,
}

impl ExtractionReport {
    /// Selected URL, unredacted; an empty selected href counts as none
    pub fn entry_url(&self) -> Option<&str> {
        self.selected
            .as_ref()
            .map(|c| c.href.as_str())
            .filter(|href| !href.is_empty())
    }

    /// Selected URL with query and fragment removed
    pub fn redacted(&self) -> Option<&str> {
        self.entry_url().map(redact_url)
    }

    /// Human-readable candidate listing, one `KEY: url` per line
    pub fn render(&self, full: bool) -> String {
        let mut out = String::new();
        for candidate in &self.candidates {
            let href = if full {
                candidate.href.as_str()
            } else {
                redact_url(&candidate.href)
            };
            let _ = writeln!(out, "{}: {}", candidate.key, href);
        }
        out
    }
}

/// Run the extractor over an already parsed payload
pub fn extract_from_value(json: &Value, extractor: &LinkExtractor) -> ExtractionReport {
    let candidates = extractor.candidates(json);
    let selected = LinkExtractor::select(&candidates).cloned();
    ExtractionReport {
        selected,
        candidates,
    }
}

/// Parse a payload and run the extractor over it
pub fn extract_from_str(payload: &str, extractor: &LinkExtractor) -> Result<ExtractionReport> {
    let json: Value = serde_json::from_str(payload)?;
    Ok(extract_from_value(&json, extractor))
}

/// Load a saved payload from disk and run the extractor over it
pub fn extract_from_path(path: impl AsRef<Path>, extractor: &LinkExtractor) -> Result<ExtractionReport> {
    let path = path.as_ref();
    let payload = std::fs::read_to_string(path)
        .context(&format!("reading {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = payload.len(), "Loaded payload");

    extract_from_str(&payload, extractor).context(&format!("parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PAYLOAD: &str = r#"{
        "offer": { "image": "https://cdn.example/car.jpg" },
        "_links": {
            "self": { "href": "https://api.example/bff/duc-leasing" },
            "CONTINUE_IN_CHECKOUT": { "href": "https://checkout.example/go?session=s1" }
        }
    }"#;

    #[test]
    fn test_report_from_str() {
        let report = extract_from_str(PAYLOAD, &LinkExtractor::default()).unwrap();

        assert_eq!(report.entry_url(), Some("https://checkout.example/go?session=s1"));
        assert_eq!(report.redacted(), Some("https://checkout.example/go"));
        assert_eq!(report.candidates.len(), 5);
        assert_eq!(report.selected.as_ref().unwrap().key, "CONTINUE_IN_CHECKOUT");
    }

    #[test]
    fn test_render() {
        let report = extract_from_str(PAYLOAD, &LinkExtractor::default()).unwrap();

        let redacted = report.render(false);
        assert!(redacted.starts_with("SELF: https://api.example/bff/duc-leasing\n"));
        assert!(redacted.contains("CONTINUE_IN_CHECKOUT: https://checkout.example/go\n"));
        assert!(!redacted.contains("session"));

        assert!(report.render(true).contains("session=s1"));
    }

    #[test]
    fn test_empty_report() {
        let report = extract_from_str(r#"{"a":1}"#, &LinkExtractor::default()).unwrap();
        assert_eq!(report.entry_url(), None);
        assert_eq!(report.render(true), "");
    }

    #[test]
    fn test_empty_selected_href() {
        let payload = r#"{ "links": {
            "ENTRY_POINT": { "href": "", "url": "" },
            "CONTINUE_IN_CHECKOUT": { "href": "https://checkout.example/go" }
        } }"#;
        let report = extract_from_str(payload, &LinkExtractor::default()).unwrap();

        assert_eq!(report.selected.as_ref().unwrap().key, "ENTRY_POINT");
        assert_eq!(report.entry_url(), None);
        assert_eq!(report.redacted(), None);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PAYLOAD.as_bytes()).unwrap();

        let report = extract_from_path(file.path(), &LinkExtractor::default()).unwrap();
        assert_eq!(report.redacted(), Some("https://checkout.example/go"));
    }

    #[test]
    fn test_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = extract_from_path(&missing, &LinkExtractor::default()).unwrap_err();
        assert!(err.to_string().starts_with("reading "));

        let invalid = dir.path().join("invalid.json");
        std::fs::write(&invalid, "<html>").unwrap();
        let err = extract_from_path(&invalid, &LinkExtractor::default()).unwrap_err();
        assert!(err.to_string().starts_with("parsing "));
    }
}
