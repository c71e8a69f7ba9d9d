use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Source of raw listing markup.
/// Keeps extraction testable without touching the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page behind `url` and return its body as text
    async fn fetch(&self, url: &str) -> Result<String>;

    fn source_name(&self) -> &'static str;
}

/// Fetches pages through the `/api/proxy?url=` relay
pub struct ProxyFetcher {
    client: Client,
    proxy_base: String,
}

impl ProxyFetcher {
    pub fn new(proxy_base: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(client, proxy_base))
    }

    /// Use a preconfigured client, e.g. one with custom proxy settings
    pub fn with_client(client: Client, proxy_base: impl Into<String>) -> Self {
        Self {
            client,
            proxy_base: proxy_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/api/proxy?url=<percent-encoded target>`
    pub fn endpoint(&self, target: &str) -> Result<Url> {
        Url::parse_with_params(&format!("{}/api/proxy", self.proxy_base), &[("url", target)])
            .context("Invalid proxy base URL")
    }
}

#[async_trait]
impl PageFetcher for ProxyFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let endpoint = self.endpoint(url)?;
        debug!("Fetching {} via {}", url, endpoint);

        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .context("Failed to reach proxy")?;

        if !response.status().is_success() {
            warn!("Proxy returned status: {}", response.status());
            anyhow::bail!("proxy returned {}", response.status());
        }

        let body = response.text().await.context("Failed to read response body")?;
        debug!("Downloaded {} bytes of HTML", body.len());
        Ok(body)
    }

    fn source_name(&self) -> &'static str {
        "proxy"
    }
}

/// In-memory pages keyed by URL
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.pages
            .get(url)
            .cloned()
            .with_context(|| format!("no page stored for {}", url))
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}
