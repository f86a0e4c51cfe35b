use crate::config::DashboardConfig;
use crate::error::{Error, Result};
use crate::metrics::MetricsSnapshot;
use async_trait::async_trait;
use reqwest::Client;
use url::Url;

/// Where snapshots and the display address come from.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetches one snapshot. Non-2xx responses fail with [`Error::Http`],
    /// undecodable bodies with [`Error::Parse`].
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot>;

    /// Looks up the public address of the server.
    async fn public_address(&self) -> Result<String>;

    /// Address shown when [`MetricsSource::public_address`] fails.
    fn fallback_address(&self) -> String;
}

pub struct HttpMetricsSource {
    client: Client,
    metrics_url: Url,
    metadata_url: Url,
    metadata_timeout: std::time::Duration,
    host: String,
}

impl HttpMetricsSource {
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("server-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let server_url = Url::parse(&config.server_url)?;
        let metrics_url = server_url.join(&config.metrics_path)?;
        let metadata_url = Url::parse(&config.metadata_url)?;
        let host = server_url
            .host_str()
            .ok_or_else(|| Error::Config(format!("{} has no host", config.server_url)))?
            .to_string();

        Ok(Self {
            client,
            metrics_url,
            metadata_url,
            metadata_timeout: config.metadata_timeout(),
            host,
        })
    }

    pub fn metrics_url(&self) -> &Url {
        &self.metrics_url
    }
}

#[async_trait]
impl MetricsSource for HttpMetricsSource {
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot> {
        log::debug!("GET {}", self.metrics_url);

        let res = self.client.get(self.metrics_url.clone()).send().await?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::Http(status.as_u16()));
        }

        let body = res.bytes().await?;
        MetricsSnapshot::from_slice(&body).map_err(Error::Parse)
    }

    async fn public_address(&self) -> Result<String> {
        let res = self
            .client
            .get(self.metadata_url.clone())
            .timeout(self.metadata_timeout)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            return Err(Error::Http(status.as_u16()));
        }

        let address = res.text().await?.trim().to_string();
        if address.is_empty() {
            return Err(Error::Internal("empty metadata response".to_string()));
        }
        Ok(address)
    }

    fn fallback_address(&self) -> String {
        self.host.clone()
    }
}
