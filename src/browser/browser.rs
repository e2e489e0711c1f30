// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser implementation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use super::config::{BrowserConfig, PageConfig};
use super::page::Page;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::network::Transport;

/// Headless browser instance
pub struct Browser {
    /// Browser configuration
    config: BrowserConfig,
    /// Native transport shared by all pages
    transport: Arc<dyn Transport>,
    /// Active pages
    pages: Arc<RwLock<Vec<Arc<Page>>>>,
    /// Page counter for IDs
    page_counter: AtomicU64,
    /// Browser ID
    id: String,
    /// Is browser closed
    closed: Arc<RwLock<bool>>,
}

impl Browser {
    /// Create a new browser instance
    pub async fn new(config: BrowserConfig) -> Result<Self> {
        let client = HttpClient::with_config(config.http_client_config()?)?;
        Ok(Self::with_transport(config, Arc::new(client)))
    }

    /// Create browser with default config
    pub async fn launch() -> Result<Self> {
        Self::new(BrowserConfig::default()).await
    }

    /// Create a browser whose pages run on a custom native transport
    pub fn with_transport(config: BrowserConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            pages: Arc::new(RwLock::new(Vec::new())),
            page_counter: AtomicU64::new(0),
            id: format!("browser_{}", uuid_simple()),
            closed: Arc::new(RwLock::new(false)),
        }
    }

    /// Get browser ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Create a new page
    pub async fn new_page(&self) -> Result<Arc<Page>> {
        self.new_page_with_config(PageConfig::default()).await
    }

    /// Create a new page with custom config
    pub async fn new_page_with_config(&self, config: PageConfig) -> Result<Arc<Page>> {
        if *self.closed.read() {
            return Err(Error::BrowserClosed);
        }

        let pages = self.pages.read();
        if pages.len() >= self.config.max_pages {
            return Err(Error::Config(format!(
                "Maximum pages ({}) reached",
                self.config.max_pages
            )));
        }
        drop(pages);

        let page_id = self.page_counter.fetch_add(1, Ordering::Relaxed);
        let page = Arc::new(Page::new(
            format!("page_{}", page_id),
            config,
            self.transport.clone(),
        ));
        self.pages.write().push(page.clone());

        Ok(page)
    }

    /// Get all pages
    pub fn pages(&self) -> Vec<Arc<Page>> {
        self.pages.read().clone()
    }

    /// Find a page by ID
    pub fn page(&self, page_id: &str) -> Option<Arc<Page>> {
        self.pages.read().iter().find(|p| p.id() == page_id).cloned()
    }

    /// Close a specific page
    pub fn close_page(&self, page_id: &str) {
        self.pages.write().retain(|p| {
            if p.id() == page_id {
                p.close();
                false
            } else {
                true
            }
        });
    }

    /// Close all pages
    pub fn close_all_pages(&self) {
        for page in self.pages.write().drain(..) {
            page.close();
        }
    }

    /// Get browser configuration
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Check if browser is closed
    pub fn is_closed(&self) -> bool {
        *self.closed.read()
    }

    /// Close the browser
    pub fn close(&self) {
        *self.closed.write() = true;
        self.close_all_pages();
    }
}

impl Drop for Browser {
    fn drop(&mut self) {
        self.close();
    }
}

/// Generate a simple unique ID
fn uuid_simple() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!(
        "{:x}{:x}",
        duration.as_secs(),
        duration.subsec_nanos()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_browser_creation() {
        let browser = Browser::launch().await.unwrap();
        assert!(!browser.is_closed());
        assert!(browser.id().starts_with("browser_"));
    }

    #[tokio::test]
    async fn test_page_lifecycle() {
        let browser = Browser::new(BrowserConfig::new().max_pages(2)).await.unwrap();

        let first = browser.new_page().await.unwrap();
        let second = browser.new_page().await.unwrap();
        assert_eq!(first.id(), "page_0");
        assert_eq!(second.id(), "page_1");
        assert!(matches!(browser.new_page().await, Err(Error::Config(_))));

        browser.close_page("page_0");
        assert!(first.is_closed());
        assert!(browser.page("page_0").is_none());
        assert_eq!(browser.pages().len(), 1);

        browser.close();
        assert!(second.is_closed());
        assert!(matches!(browser.new_page().await, Err(Error::BrowserClosed)));
    }

    #[tokio::test]
    async fn test_invalid_proxy_rejected() {
        let config = BrowserConfig::new().proxy("ftp://proxy.example:21");
        assert!(Browser::new(config).await.is_err());
    }
}
