// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser and Page API
//!
//! A page owns the request primitives the entry tracer wraps.

mod browser;
mod config;
mod console;
mod page;

pub use browser::Browser;
pub use config::{BrowserConfig, PageConfig};
pub use console::{Console, ConsoleLevel, ConsoleMessage};
pub use page::Page;
