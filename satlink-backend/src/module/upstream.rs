///! Shared HTTP plumbing for upstream providers
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Failure talking to an upstream provider
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, TLS, timeout or body read failure
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Upstream answered with an unexpected status code
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
    /// Body did not have the expected shape
    #[error("invalid response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

/// Raw upstream reply: status plus the full body text
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: String,
}

impl UpstreamResponse {
    /// Body of a 2xx response, `UpstreamError::Status` otherwise
    pub fn into_success_body(self) -> Result<String, UpstreamError> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            Err(UpstreamError::Status {
                url: self.url,
                status: self.status,
            })
        }
    }

    /// Body of a response with exactly `expected` status
    pub fn into_body_if(self, expected: StatusCode) -> Result<String, UpstreamError> {
        if self.status == expected {
            Ok(self.body)
        } else {
            Err(UpstreamError::Status {
                url: self.url,
                status: self.status,
            })
        }
    }
}

/// Thin wrapper over a shared reqwest client. Timeouts are applied per request
/// because each upstream call has its own budget.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
}

impl HttpUpstream {
    pub fn new(user_agent: &str) -> reqwest::Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Single GET without retries. Non-2xx statuses are returned, not raised.
    pub async fn get(&self, url: &str, timeout: Duration) -> Result<UpstreamResponse, UpstreamError> {
        tracing::debug!("GET {} (timeout {:?})", url, timeout);

        let transport = |source: reqwest::Error| UpstreamError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        Ok(UpstreamResponse {
            url: url.to_string(),
            status,
            body,
        })
    }
}

/// Replace every `{}` in `template` with the percent-encoded `value`.
///
/// `/` is left as is, so `a/b` stays a path-like value in search links.
pub fn fill_template(template: &str, value: &str) -> String {
    let encoded = urlencoding::encode(value).replace("%2F", "/");
    template.replace("{}", &encoded)
}
