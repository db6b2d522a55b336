///! Satellite catalog provider: per-name TLE lookup and the bulk active dump
use async_trait::async_trait;

use crate::config::TleConfig;
use crate::module::upstream::{HttpUpstream, UpstreamError, fill_template};

/// Source of raw TLE text
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Catalog text for objects matching `name`. May be empty or hold several records.
    async fn fetch_by_name(&self, name: &str) -> Result<String, UpstreamError>;

    /// Every active object, returned exactly as the upstream sent it
    async fn fetch_active(&self) -> Result<String, UpstreamError>;
}

/// CelesTrak GP endpoint client
pub struct CelestrakClient {
    upstream: HttpUpstream,
    config: TleConfig,
}

impl CelestrakClient {
    pub fn new(upstream: HttpUpstream, config: TleConfig) -> Self {
        Self { upstream, config }
    }
}

#[async_trait]
impl CatalogProvider for CelestrakClient {
    async fn fetch_by_name(&self, name: &str) -> Result<String, UpstreamError> {
        let url = fill_template(&self.config.by_name_url, name);
        let body = self
            .upstream
            .get(&url, self.config.lookup_timeout())
            .await?
            .into_success_body()?;

        tracing::debug!("CelesTrak returned {} bytes for '{}'", body.len(), name);
        Ok(body)
    }

    async fn fetch_active(&self) -> Result<String, UpstreamError> {
        let body = self
            .upstream
            .get(&self.config.active_url, self.config.bulk_timeout())
            .await?
            .into_success_body()?;

        tracing::debug!("CelesTrak active catalog: {} bytes", body.len());
        Ok(body)
    }
}
