// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for entrytrace
//!
//! Errors here belong to the page primitives (transport, XHR object, config).
//! Inspection performed by the tracer never surfaces an error to callers; it
//! logs and moves on.

use thiserror::Error;

/// Result type alias for entrytrace operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for entrytrace
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Network transport error
    #[error("Network error: {0}")]
    Network(String),

    /// XMLHttpRequest misuse or failure
    #[error("XHR error: {reason}")]
    Xhr { reason: String, url: Option<String> },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Browser has been closed
    #[error("Browser has been closed")]
    BrowserClosed,

    /// Page has been closed
    #[error("Page has been closed: {0}")]
    PageClosed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Error::Network(msg.into())
    }

    /// Create an XHR error
    pub fn xhr(reason: impl Into<String>) -> Self {
        Error::Xhr {
            reason: reason.into(),
            url: None,
        }
    }

    /// Create an XHR error tied to a target address
    pub fn xhr_with_url(reason: impl Into<String>, url: impl Into<String>) -> Self {
        Error::Xhr {
            reason: reason.into(),
            url: Some(url.into()),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Transport-level failure, as opposed to misuse
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Http(_))
    }

    /// Target address the XHR error refers to
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Xhr { url: Some(u), .. } => Some(u),
            _ => None,
        }
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Prefix the error with what was being done
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}
