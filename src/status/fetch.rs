//! Repository metadata retrieval

use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::Client;
use reqwest::header::ACCEPT;
use thiserror::Error;

use super::record::RepositoryStatus;
use crate::config::RepositoryConfig;

/// Every variant is rendered the same way; the distinction only reaches the log.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Malformed repository data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No response within {0:?}")]
    Timeout(Duration),

    #[error("Remote fetch disabled")]
    Offline,
}

impl FetchError {
    /// Short label for structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Status(_) => "status",
            Self::Decode(_) => "decode",
            Self::Timeout(_) => "timeout",
            Self::Offline => "offline",
        }
    }
}

/// Source of repository metadata.
pub trait RepositoryFetcher: Send + Sync {
    fn fetch(&self) -> BoxFuture<'_, Result<RepositoryStatus, FetchError>>;
}

/// GitHub REST API fetcher
#[derive(Debug, Clone)]
pub struct HttpRepositoryFetcher {
    /// HTTP クライアント
    client: Client,
    /// リポジトリ API の URL
    api_url: String,
}

impl HttpRepositoryFetcher {
    /// # Errors
    /// The HTTP client cannot be constructed (TLS backend initialisation).
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, api_url: api_url.into() })
    }

    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// 1 回だけリクエストを送り、レスポンスを検証してデコードする
    async fn fetch_once(&self) -> Result<RepositoryStatus, FetchError> {
        tracing::debug!(url = %self.api_url, "Fetching repository status");

        let response = self
            .client
            .get(&self.api_url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(RepositoryStatus::decode(&body)?)
    }
}

impl RepositoryFetcher for HttpRepositoryFetcher {
    fn fetch(&self) -> BoxFuture<'_, Result<RepositoryStatus, FetchError>> {
        Box::pin(self.fetch_once())
    }
}

/// Fetcher that always fails; used for offline rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFetcher;

impl RepositoryFetcher for OfflineFetcher {
    fn fetch(&self) -> BoxFuture<'_, Result<RepositoryStatus, FetchError>> {
        Box::pin(futures::future::ready(Err(FetchError::Offline)))
    }
}

/// Fetcher chosen from the repository configuration.
///
/// Falls back to [`OfflineFetcher`] when the HTTP client cannot be built, so the page
/// still renders with the static block.
#[derive(Debug, Clone)]
pub enum SiteFetcher {
    Http(HttpRepositoryFetcher),
    Offline(OfflineFetcher),
}

impl SiteFetcher {
    #[must_use]
    pub fn from_config(config: &RepositoryConfig, offline: bool) -> Self {
        if offline {
            tracing::debug!("Remote fetch disabled");
            return Self::Offline(OfflineFetcher);
        }

        Self::from_client(HttpRepositoryFetcher::new(
            config.api_url.clone(),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    /// Wraps the result of building the HTTP fetcher; a failure degrades to offline.
    #[must_use]
    pub fn from_client(client: Result<HttpRepositoryFetcher, FetchError>) -> Self {
        match client {
            Ok(fetcher) => Self::Http(fetcher),
            Err(e) => {
                tracing::warn!(kind = e.kind(), "HTTP client unavailable, rendering offline: {}", e);
                Self::Offline(OfflineFetcher)
            }
        }
    }

    #[must_use]
    pub const fn is_offline(&self) -> bool {
        matches!(self, Self::Offline(_))
    }
}

impl RepositoryFetcher for SiteFetcher {
    fn fetch(&self) -> BoxFuture<'_, Result<RepositoryStatus, FetchError>> {
        match self {
            Self::Http(fetcher) => fetcher.fetch(),
            Self::Offline(fetcher) => fetcher.fetch(),
        }
    }
}
