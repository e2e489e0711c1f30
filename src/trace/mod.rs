// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Entry URL tracing
//!
//! Observes responses from the leasing endpoint, pulls the checkout entry
//! link out of the JSON payload and publishes it, redacted by default.
//!
//! Data flows one way: the network wrappers hand responses to the
//! [`PayloadMatcher`], matching payloads go to the [`LinkExtractor`], and the
//! selected URL goes to the [`Publisher`], which writes the [`TraceHandle`].

mod config;
mod extract;
mod matcher;
mod offline;
mod publish;
mod redact;
mod state;
mod tracer;

pub use config::{TracerConfig, DEFAULT_ENDPOINT_FRAGMENT, DEFAULT_JSON_MARKER, DEFAULT_MAX_DEPTH};
pub use extract::{extract_entry_url, Candidate, LinkExtractor, FALLBACK_KEY, PREFERRED_KEYS};
pub use matcher::PayloadMatcher;
pub use offline::{extract_from_path, extract_from_str, extract_from_value, ExtractionReport};
pub use publish::Publisher;
pub use redact::{has_sensitive_parts, is_absolute_http_url, redact_url};
pub use state::{PublishMode, PublishedEntry, TraceHandle, TraceSnapshot};
pub use tracer::{EntryTracer, XhrTraceHook};
