//! Page-load orchestration

use std::time::Duration;

use url::Url;

use crate::config::SiteSettings;
use crate::locale::{
    LocaleResolver,
    LocaleState,
    PreferenceStore,
    TranslationTable,
};
use crate::page::Page;
use crate::status::{
    DateStyle,
    PanelOutcome,
    RepositoryFetcher,
    RepositoryStatusPanel,
};

/// Result of one page load
#[derive(Debug, Clone)]
pub struct RenderedSite {
    pub page: Page,
    pub locale: LocaleState,
    pub panel: PanelOutcome,
}

/// Site
///
/// `LocaleResolver` と `RepositoryStatusPanel` を保持する。両者は状態を共有しない。
#[derive(Debug)]
pub struct Site<F> {
    /// ロケール管理
    resolver: LocaleResolver,
    /// ステータスパネル
    panel: RepositoryStatusPanel<F>,
}

impl<F: RepositoryFetcher> Site<F> {
    #[must_use]
    pub fn new(
        settings: &SiteSettings,
        table: TranslationTable,
        fetcher: F,
        host_locale: Option<&str>,
    ) -> Self {
        let panel = RepositoryStatusPanel::new(
            fetcher,
            settings.repository.container_id.clone(),
            Duration::from_secs(settings.repository.timeout_secs),
        )
        .with_date_style(DateStyle::from_locale_hint(host_locale));

        Self { resolver: LocaleResolver::new(settings, table), panel }
    }

    #[must_use]
    pub const fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    /// For locale switches after the initial render.
    pub const fn resolver_mut(&mut self) -> &mut LocaleResolver {
        &mut self.resolver
    }

    /// Loads the landing page at `url`.
    ///
    /// The loading placeholder goes up first and the locale is initialized
    /// synchronously; the panel is rendered once the single request settles.
    pub async fn render(
        &mut self,
        url: Url,
        store: &mut dyn PreferenceStore,
        environment_hint: Option<&str>,
    ) -> RenderedSite {
        let mut page = Page::landing(url);

        self.panel.begin(&mut page);
        let request = self.panel.fetch();

        let locale = self.resolver.initialize(&mut page, store, environment_hint).clone();

        let result = request.await;
        let panel = self.panel.finish(&mut page, result);

        tracing::info!(
            locale = %locale.locale,
            provenance = ?locale.provenance,
            panel = ?panel,
            "Page rendered"
        );

        RenderedSite { page, locale, panel }
    }
}
