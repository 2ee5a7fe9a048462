use crate::core::Fetcher;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.espn.com";
pub const DEFAULT_USER_AGENT: &str = concat!("roster-etl/", env!("CARGO_PKG_VERSION"));

/// Fetches one page per call. No retries; timeouts come from the client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| EtlError::InvalidConfigValueError {
            field: "source.base_url".to_string(),
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| EtlError::ConfigValidationError {
                field: "source".to_string(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client, base_url })
    }

    /// Site-relative locators resolve under the base URL, keeping any path
    /// prefix it carries (`http://host/espn` + `/nfl/teams`). Absolute ones
    /// pass through.
    pub fn resolve(&self, locator: &str) -> Result<Url> {
        let prefix = self.base_url.path().trim_end_matches('/');
        let joined = if locator.starts_with('/') && !locator.starts_with("//") {
            self.base_url.join(&format!("{}{}", prefix, locator))
        } else {
            self.base_url.join(locator)
        };

        joined.map_err(|e| EtlError::FetchError {
            locator: locator.to_string(),
            message: format!("invalid locator: {}", e),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, locator: &str) -> Result<String> {
        let url = self.resolve(locator)?;
        tracing::debug!("GET {}", url);

        let fetch_error = |message: String| EtlError::FetchError {
            locator: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);
        if !status.is_success() {
            return Err(fetch_error(format!("HTTP {}", status)));
        }

        response.text().await.map_err(|e| fetch_error(e.to_string()))
    }
}
