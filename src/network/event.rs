// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Network event types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which request primitive produced an observed response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Promise-style fetch
    Fetch,
    /// Event-style XMLHttpRequest
    Xhr,
}

impl EventType {
    /// Lowercase tag, as exposed to controllers
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Fetch => "fetch",
            EventType::Xhr => "xhr",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
