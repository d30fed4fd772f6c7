//! Renders the landing page to HTML.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sca_site::Site;
use sca_site::config::{
    ConfigError,
    ConfigManager,
};
use sca_site::locale::{
    PreferenceStore,
    TranslationLoadError,
};
use sca_site::status::{
    RepositoryFetcher,
    SiteFetcher,
};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;
use url::Url;

/// 公開ページの URL
const SITE_URL: &str = "https://takawasi.github.io/sca-cognitive-architecture/";

/// ロケールのヒントを探す環境変数（優先順）
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "sca-site", version, about = "Render the SCA landing page")]
struct Args {
    /// Requested locale, passed as the page's query parameter
    #[arg(long)]
    lang: Option<String>,

    /// Switch to this locale after the initial render
    #[arg(long)]
    switch: Option<String>,

    /// Directory containing `.sca-site.json`
    #[arg(long, default_value = ".")]
    workspace: PathBuf,

    /// Write HTML here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Render the static repository block without a request
    #[arg(long)]
    offline: bool,

    /// Keep the locale preference in memory only
    #[arg(long)]
    no_persist: bool,
}

/// Fatal errors of the binary
#[derive(Error, Debug)]
enum AppError {
    /// 設定エラー
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// 翻訳ファイルの読み込みエラー
    #[error(transparent)]
    Translations(#[from] TranslationLoadError),

    /// ページ URL の組み立てエラー
    #[error("Invalid page URL: {0}")]
    Url(#[from] url::ParseError),

    /// 出力エラー
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .init();

    match run(Args::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// 設定を読み込み、fetcher を選んで描画する
async fn run(args: Args) -> Result<(), AppError> {
    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(Some(args.workspace))?;
    let settings = config_manager.get_settings();

    let mut url = Url::parse(SITE_URL)?;
    if let Some(lang) = &args.lang {
        url.query_pairs_mut().append_pair(&settings.query_parameter, lang);
    }

    let environment_hint = environment_locale();
    let fetcher = SiteFetcher::from_config(&settings.repository, args.offline);
    let site = config_manager.build_site(fetcher, environment_hint.as_deref())?;
    let mut store = config_manager.preference_store(!args.no_persist);

    let html =
        render(site, url, store.as_mut(), environment_hint.as_deref(), args.switch.as_deref())
            .await;

    if let Some(path) = &args.output {
        tokio::fs::write(path, html).await?;
        tracing::info!(path = %path.display(), "Wrote page");
    } else {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(html.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}

/// 初期描画と任意のロケール切替を行い、HTML を返す
async fn render<F: RepositoryFetcher>(
    mut site: Site<F>,
    url: Url,
    store: &mut dyn PreferenceStore,
    environment_hint: Option<&str>,
    switch: Option<&str>,
) -> String {
    let mut rendered = site.render(url, store, environment_hint).await;

    if let Some(locale) = switch
        && !site.resolver_mut().switch_locale(locale, &mut rendered.page, store)
    {
        tracing::warn!(locale, "Unsupported locale; switch ignored");
    }

    rendered.page.render_html()
}

/// 環境変数からロケールのヒントを取得
fn environment_locale() -> Option<String> {
    LOCALE_ENV_VARS
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.is_empty())
}
