// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # entrytrace - DUC leasing entry URL tracer
//!
//! Watches a page's `fetch` and `XMLHttpRequest` traffic for responses from
//! the leasing endpoint (`/bff/duc-leasing`), extracts the checkout entry
//! link from the JSON payload and publishes it on the page.
//!
//! ## Features
//!
//! - Transparent wrappers: callers get exactly what the unwrapped primitive returns
//! - Idempotent injection: every response is inspected once, however often the tracer is injected
//! - Redacted by default: query and fragment are stripped unless explicitly enabled
//! - Link priority: `ENTRY_POINT`, then `CONTINUE_IN_CHECKOUT`, then any absolute URL
//! - Offline extraction from saved endpoint responses
//!
//! ## Example
//!
//! ```rust,no_run
//! use entrytrace::{Browser, EntryTracer, TracerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let browser = Browser::launch().await?;
//!     let page = browser.new_page().await?;
//!
//!     EntryTracer::inject(&page, TracerConfig::default());
//!     page.set_url("https://shop.example/cars/42")?;
//!     page.fetch_url("/bff/duc-leasing?car=42").await?;
//!
//!     if let Some(url) = page.entry_url() {
//!         println!("Entry URL: {}", url);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod browser;
pub mod error;
pub mod http;
pub mod network;
pub mod trace;

// Re-exports for convenience

// Browser and Page
pub use browser::{Browser, BrowserConfig, Page, PageConfig};
pub use browser::{Console, ConsoleLevel, ConsoleMessage};

// Errors
pub use error::{Error, ErrorContext, Result};

// HTTP
pub use http::{HttpClient, HttpClientConfig, Request, Response};

// Network
pub use network::{EventType, FetchInterceptor, InterceptorChain, RequestInterceptor, RequestLogger, Transport};
pub use network::{XhrFactory, XhrInterceptor, XhrResponse, XmlHttpRequest};

// Tracing
pub use trace::{EntryTracer, LinkExtractor, PublishMode, PublishedEntry, TraceHandle, TracerConfig};
pub use trace::{extract_entry_url, redact_url};

/// entrytrace version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
