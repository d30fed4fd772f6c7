//! Repository status panel

use std::time::Duration;

use super::fetch::{
    FetchError,
    RepositoryFetcher,
};
use super::record::{
    RepositoryStatus,
    StaticFallbackStatus,
};
use super::render::{
    DateStyle,
    STATUS_CSS,
    STATUS_STYLE_ID,
    render_fallback,
    render_live,
    render_loading,
};
use crate::page::Page;

/// What the panel ended up showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Live,
    Fallback,
}

/// Fetches repository metadata once and renders it, or the static fallback.
///
/// No retry, no cancellation. The request is bounded by `timeout`.
#[derive(Debug)]
pub struct RepositoryStatusPanel<F> {
    /// データ取得元
    fetcher: F,
    /// 描画先要素の id
    container_id: String,
    /// リクエスト全体の上限時間
    timeout: Duration,
    /// 日付の表示形式
    date_style: DateStyle,
    /// 失敗時に表示する固定ブロック
    fallback: StaticFallbackStatus,
}

impl<F: RepositoryFetcher> RepositoryStatusPanel<F> {
    #[must_use]
    pub fn new(fetcher: F, container_id: impl Into<String>, timeout: Duration) -> Self {
        Self {
            fetcher,
            container_id: container_id.into(),
            timeout,
            date_style: DateStyle::default(),
            fallback: StaticFallbackStatus::DEFAULT,
        }
    }

    #[must_use]
    pub const fn with_date_style(mut self, date_style: DateStyle) -> Self {
        self.date_style = date_style;
        self
    }

    #[must_use]
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Shows the loading placeholder.
    pub fn begin(&self, page: &mut Page) {
        if !page.set_inner_html(&self.container_id, render_loading()) {
            tracing::debug!(container = %self.container_id, "Status container not found");
        }
    }

    /// The single request, bounded by the configured timeout.
    pub async fn fetch(&self) -> Result<RepositoryStatus, FetchError> {
        match tokio::time::timeout(self.timeout, self.fetcher.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        }
    }

    /// Replaces the placeholder with live data or the fallback block.
    pub fn finish(
        &self,
        page: &mut Page,
        result: Result<RepositoryStatus, FetchError>,
    ) -> PanelOutcome {
        let (html, outcome) = match result {
            Ok(status) => {
                if page.inject_style_once(STATUS_STYLE_ID, STATUS_CSS) {
                    tracing::trace!("Injected status panel stylesheet");
                }
                tracing::debug!(
                    repository = %status.name,
                    stars = status.stargazers_count,
                    "Rendering live repository status"
                );
                (render_live(&status, self.date_style), PanelOutcome::Live)
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), "Repository status unavailable: {}", e);
                (render_fallback(&self.fallback), PanelOutcome::Fallback)
            }
        };

        page.set_inner_html(&self.container_id, html);
        outcome
    }

    /// `begin` + `fetch` + `finish`.
    pub async fn load(&self, page: &mut Page) -> PanelOutcome {
        self.begin(page);
        let result = self.fetch().await;
        self.finish(page, result)
    }
}
