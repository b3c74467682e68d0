// SPDX-License-Identifier: MIT

//! Network reachability probe.
//!
//! Consulted before a generation request is attempted so the UI can show a
//! distinct "offline" state instead of a generic failure.

use async_trait::async_trait;
use std::time::Duration;

/// Reports current network reachability.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_reachable(&self) -> bool;
}

/// Probe that issues a bounded HEAD request to a well-known endpoint.
pub struct HttpProbe {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
            timeout,
        }
    }
}

#[async_trait]
impl ConnectivityProbe for HttpProbe {
    async fn is_reachable(&self) -> bool {
        // Any response at all means the network path is up; only transport
        // errors and timeouts count as unreachable
        self.http
            .head(&self.url)
            .timeout(self.timeout)
            .send()
            .await
            .is_ok()
    }
}

/// Probe with a fixed answer, for tests and previews.
pub struct FixedProbe(pub bool);

#[async_trait]
impl ConnectivityProbe for FixedProbe {
    async fn is_reachable(&self) -> bool {
        self.0
    }
}
