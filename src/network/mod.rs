// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Network interception
//!
//! The two request primitives a page exposes (promise-style `fetch` and the
//! event-style `XMLHttpRequest`) and the decorators that observe them without
//! changing what callers see.

mod event;
mod interceptor;
mod interceptor_trait;
mod xhr;

pub use event::EventType;
pub use interceptor::FetchInterceptor;
pub use interceptor_trait::{InterceptorChain, RequestInterceptor, RequestLogger, Transport};
pub use xhr::{
    ErrorListener, HookFactory, LoadListener, NativeXhrFactory, ReadyState, XhrFactory,
    XhrHandle, XhrHook, XhrInterceptor, XhrResponse, XmlHttpRequest,
};
