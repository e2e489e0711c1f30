// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Link extraction from leasing payloads
//!
//! Two candidate tiers are collected, in this order:
//!
//! 1. named links from the `links` and `_links` containers
//!    (`{ "links": { "ENTRY_POINT": { "href": "..." } } }`),
//! 2. every absolute `http(s)://` string anywhere in the document, tagged
//!    [`FALLBACK_KEY`].
//!
//! Selection then prefers [`PREFERRED_KEYS`] in order across both tiers, and
//! falls back to the first candidate collected.

use serde::Serialize;
use serde_json::Value;

use super::config::DEFAULT_MAX_DEPTH;
use super::redact::is_absolute_http_url;

/// Key given to URLs found by the deep search
pub const FALLBACK_KEY: &str = "URL";

/// Link containers checked on the root object, in order
const LINK_CONTAINERS: [&str; 2] = ["links", "_links"];

/// Link names that win over everything else, highest priority first
pub const PREFERRED_KEYS: [&str; 2] = ["ENTRY_POINT", "CONTINUE_IN_CHECKOUT"];

/// A URL found in the payload and the name it was found under
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Upper-cased link name, or [`FALLBACK_KEY`]
    pub key: String,
    /// The URL as it appears in the payload
    pub href: String,
}

impl Candidate {
    fn named(key: &str, href: &str) -> Self {
        Self {
            key: key.to_uppercase(),
            href: href.to_string(),
        }
    }

    fn fallback(href: &str) -> Self {
        Self {
            key: FALLBACK_KEY.to_string(),
            href: href.to_string(),
        }
    }
}

/// Finds the most relevant outbound URL in a JSON payload
#[derive(Debug, Clone, Copy)]
pub struct LinkExtractor {
    max_depth: usize,
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl LinkExtractor {
    /// Create an extractor that walks at most `max_depth` levels deep
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// The single most relevant URL, if any
    ///
    /// A selected link with an empty href yields nothing; selection does not
    /// move on to the next candidate.
    pub fn extract(&self, json: &Value) -> Option<String> {
        let candidates = self.candidates(json);
        Self::select(&candidates)
            .filter(|c| !c.href.is_empty())
            .map(|c| c.href.clone())
    }

    /// All candidates in collection order: named links first, then the
    /// deep-search hits in document order
    pub fn candidates(&self, json: &Value) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for container in LINK_CONTAINERS {
            if let Some(links) = json.get(container) {
                collect_named_links(links, &mut candidates);
            }
        }

        visit_strings(json, self.max_depth, &mut |s| {
            if is_absolute_http_url(s) {
                candidates.push(Candidate::fallback(s));
            }
        });

        candidates
    }

    /// Apply the selection priority to collected candidates
    pub fn select(candidates: &[Candidate]) -> Option<&Candidate> {
        PREFERRED_KEYS
            .iter()
            .find_map(|preferred| candidates.iter().find(|c| c.key.contains(*preferred)))
            .or_else(|| candidates.first())
    }
}

/// Extract with default settings
pub fn extract_entry_url(json: &Value) -> Option<String> {
    LinkExtractor::default().extract(json)
}

fn collect_named_links(container: &Value, out: &mut Vec<Candidate>) {
    match container {
        Value::Object(map) => {
            for (key, link) in map {
                if let Some(href) = link_href(link) {
                    out.push(Candidate::named(key, href));
                }
            }
        }
        // Arrays of links are keyed by position
        Value::Array(items) => {
            for (index, link) in items.iter().enumerate() {
                if let Some(href) = link_href(link) {
                    out.push(Candidate::named(&index.to_string(), href));
                }
            }
        }
        _ => {}
    }
}

/// `href` if truthy, otherwise `url`; accepted only when it is a string
fn link_href(link: &Value) -> Option<&str> {
    let link = link.as_object()?;
    let chosen = link
        .get("href")
        .filter(|href| is_truthy(href))
        .or_else(|| link.get("url"))?;
    chosen.as_str()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Depth-first walk calling `visit` for every string value
///
/// Object members are visited by value in document order, array elements in
/// index order. Anything nested deeper than `max_depth` is skipped.
fn visit_strings<'a, F>(value: &'a Value, max_depth: usize, visit: &mut F)
where
    F: FnMut(&'a str),
{
    fn walk<'a, F: FnMut(&'a str)>(value: &'a Value, depth: usize, max_depth: usize, visit: &mut F) {
        if depth > max_depth {
            return;
        }
        match value {
            Value::String(s) => visit(s.as_str()),
            Value::Array(items) => {
                for item in items {
                    walk(item, depth + 1, max_depth, visit);
                }
            }
            Value::Object(map) => {
                for member in map.values() {
                    walk(member, depth + 1, max_depth, visit);
                }
            }
            _ => {}
        }
    }

    walk(value, 0, max_depth, visit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_point_wins_over_everything() {
        let payload = json!({
            "offer": { "detailUrl": "https://shop.example/offer/1" },
            "links": {
                "self": { "href": "https://api.example/bff/duc-leasing/1" },
                "CONTINUE_IN_CHECKOUT": { "href": "https://checkout.example/continue" },
                "ENTRY_POINT": { "href": "https://checkout.example/entry?token=t" }
            }
        });

        assert_eq!(
            extract_entry_url(&payload).as_deref(),
            Some("https://checkout.example/entry?token=t")
        );
    }

    #[test]
    fn test_key_priority_beats_fallback_tier() {
        let payload = json!({
            "deep": { "nested": [ { "x": "https://b" } ] },
            "links": { "CONTINUE_IN_CHECKOUT": { "href": "https://a" } }
        });

        assert_eq!(extract_entry_url(&payload).as_deref(), Some("https://a"));
    }

    #[test]
    fn test_single_url_without_link_containers() {
        let payload = json!({
            "status": "OK",
            "data": [ 1, null, { "next": { "target": "https://only.example/x?y=1" } } ]
        });

        assert_eq!(
            extract_entry_url(&payload).as_deref(),
            Some("https://only.example/x?y=1")
        );
    }

    #[test]
    fn test_underscore_links_and_url_field() {
        let payload = json!({
            "_links": {
                "entry_point": { "url": "https://checkout.example/hal" }
            }
        });

        let candidates = LinkExtractor::default().candidates(&payload);
        assert_eq!(candidates[0], Candidate::named("ENTRY_POINT", "https://checkout.example/hal"));
        assert_eq!(extract_entry_url(&payload).as_deref(), Some("https://checkout.example/hal"));
    }

    #[test]
    fn test_priority_combines_both_containers() {
        let payload = json!({
            "links": { "CONTINUE_IN_CHECKOUT": { "href": "https://a.example/continue" } },
            "_links": { "ENTRY_POINT": { "href": "https://b.example/entry" } }
        });

        assert_eq!(extract_entry_url(&payload).as_deref(), Some("https://b.example/entry"));
    }

    #[test]
    fn test_key_match_is_substring_and_case_insensitive_on_source() {
        let payload = json!({
            "links": {
                "self": { "href": "https://api.example/self" },
                "leasing_entry_point_v2": { "href": "https://checkout.example/v2" }
            }
        });

        assert_eq!(extract_entry_url(&payload).as_deref(), Some("https://checkout.example/v2"));
    }

    #[test]
    fn test_first_candidate_when_no_preferred_key() {
        let payload = json!({
            "a": "https://first.example",
            "links": { "self": { "href": "https://self.example" } }
        });

        let candidates = LinkExtractor::default().candidates(&payload);
        assert_eq!(candidates[0].key, "SELF");
        assert_eq!(candidates[1], Candidate::fallback("https://first.example"));
        assert_eq!(extract_entry_url(&payload).as_deref(), Some("https://self.example"));
    }

    #[test]
    fn test_malformed_links_are_skipped() {
        let payload = json!({
            "links": {
                "ENTRY_POINT": "https://not-an-object.example",
                "CONTINUE_IN_CHECKOUT": { "href": 42, "url": "https://ignored.example" },
                "broken": null,
                "fallback": { "href": "", "url": "https://url-field.example" }
            }
        });

        let named: Vec<_> = LinkExtractor::default()
            .candidates(&payload)
            .into_iter()
            .filter(|c| c.key != FALLBACK_KEY)
            .collect();

        assert_eq!(named, vec![Candidate::named("FALLBACK", "https://url-field.example")]);
        // The bare string under ENTRY_POINT only counts as a fallback URL
        assert_eq!(
            extract_entry_url(&payload).as_deref(),
            Some("https://url-field.example")
        );
    }

    #[test]
    fn test_empty_entry_point_selects_nothing() {
        let payload = json!({
            "links": {
                "ENTRY_POINT": { "href": "", "url": "" },
                "CONTINUE_IN_CHECKOUT": { "href": "https://checkout.example/continue" }
            }
        });

        let candidates = LinkExtractor::default().candidates(&payload);
        assert_eq!(candidates[0], Candidate::named("ENTRY_POINT", ""));
        assert_eq!(
            LinkExtractor::select(&candidates).map(|c| c.key.as_str()),
            Some("ENTRY_POINT")
        );
        assert_eq!(extract_entry_url(&payload), None);
    }

    #[test]
    fn test_links_array_keyed_by_index() {
        let payload = json!({ "links": [ { "href": "https://zero.example" } ] });
        let candidates = LinkExtractor::default().candidates(&payload);
        assert_eq!(candidates[0], Candidate::named("0", "https://zero.example"));
    }

    #[test]
    fn test_no_candidates() {
        assert_eq!(extract_entry_url(&json!({ "links": {}, "a": "/relative" })), None);
        assert_eq!(extract_entry_url(&json!([])), None);
        assert_eq!(extract_entry_url(&json!("ftp://x")), None);
        assert_eq!(extract_entry_url(&json!(null)), None);
    }

    #[test]
    fn test_root_string_and_array() {
        assert_eq!(extract_entry_url(&json!("https://root.example")).as_deref(), Some("https://root.example"));
        assert_eq!(
            extract_entry_url(&json!([ "x", [ "https://in-array.example" ] ])).as_deref(),
            Some("https://in-array.example")
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut payload = json!("https://deep.example");
        for _ in 0..10 {
            payload = json!({ "n": payload });
        }

        assert_eq!(LinkExtractor::new(5).extract(&payload), None);
        assert_eq!(
            LinkExtractor::new(10).extract(&payload).as_deref(),
            Some("https://deep.example")
        );
    }

    #[test]
    fn test_default_depth_reaches_deeply_nested_payloads() {
        let depth = 80;
        let text = format!(
            "{}\"https://deep.example/entry\"{}",
            "{\"n\":".repeat(depth),
            "}".repeat(depth)
        );
        let payload: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            extract_entry_url(&payload).as_deref(),
            Some("https://deep.example/entry")
        );
    }
}
