// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Promise-style fetch decorator

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::interceptor_trait::{InterceptorChain, RequestInterceptor, Transport};
use crate::error::Result;
use crate::http::{Request, Response};

/// Wraps a [`Transport`] and routes a clone of every response through an
/// [`InterceptorChain`]
///
/// The caller gets exactly what the inner transport returned: the same
/// response (body unread) or the same error.
pub struct FetchInterceptor {
    /// Wrapped primitive
    inner: Arc<dyn Transport>,
    /// Response observers
    chain: InterceptorChain,
    /// Responses handed to the chain
    observed: AtomicU64,
    /// Capability flag: this wrapper carries the entry tracer
    traced: bool,
}

impl FetchInterceptor {
    /// Wrap a transport with an empty observer chain
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self {
            inner,
            chain: InterceptorChain::new(),
            observed: AtomicU64::new(0),
            traced: false,
        }
    }

    /// Add an observer
    pub fn with_interceptor<I: RequestInterceptor + 'static>(mut self, interceptor: I) -> Self {
        self.chain.add(interceptor);
        self
    }

    /// Mark this wrapper as carrying the entry tracer
    pub fn mark_traced(mut self) -> Self {
        self.traced = true;
        self
    }

    /// Number of responses handed to the observer chain
    pub fn observed_count(&self) -> u64 {
        self.observed.load(Ordering::Relaxed)
    }

    /// Perform the request, then let the observers inspect a clone
    pub async fn fetch(&self, request: Request) -> Result<Response> {
        let observed_request = request.clone();

        match self.inner.send(request).await {
            Ok(response) => {
                self.observed.fetch_add(1, Ordering::Relaxed);
                self.chain
                    .process_response(&observed_request, &response)
                    .await;
                Ok(response)
            }
            Err(e) => {
                self.chain.notify_error(&observed_request, &e).await;
                Err(e)
            }
        }
    }
}

#[async_trait]
impl Transport for FetchInterceptor {
    async fn send(&self, request: Request) -> Result<Response> {
        self.fetch(request).await
    }

    fn is_traced(&self) -> bool {
        self.traced || self.inner.is_traced()
    }
}
