//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::loader::{
    self,
    LoadedSettings,
};
use super::{
    ConfigError,
    SiteSettings,
};
use crate::locale::{
    FilePreferenceStore,
    MemoryPreferenceStore,
    PreferenceStore,
    TranslationLoadError,
    TranslationTable,
};
use crate::site::Site;
use crate::status::RepositoryFetcher;

/// 検証済みの設定と、そこから導かれるパス・翻訳テーブル・保存先を提供する
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 検証済みの設定
    settings: SiteSettings,

    /// ワークスペースのルートパス
    workspace_root: Option<PathBuf>,

    /// 設定の読み込み元ファイル
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// デフォルト設定のマネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ワークスペースの設定を読み込み、検証する
    ///
    /// 失敗した場合は現在の設定を保持する。
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        let loaded = match &workspace_root {
            Some(root) => loader::load_workspace_settings(root)?,
            None => LoadedSettings::default(),
        };

        loaded.settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(
            source = ?loaded.source,
            locales = ?loaded.settings.supported_locales,
            default_locale = %loaded.settings.default_locale,
            "Site settings loaded"
        );

        self.settings = loaded.settings;
        self.source = loaded.source;
        self.workspace_root = workspace_root;
        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &SiteSettings {
        &self.settings
    }

    #[must_use]
    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }

    /// 設定ファイルのパス（デフォルト値の場合は `None`）
    #[must_use]
    pub fn config_source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// ワークスペース相対のパスを解決する
    ///
    /// ワークスペースが未設定の場合はカレントディレクトリ相対のまま返す。
    #[must_use]
    pub fn resolve_path(&self, relative: &str) -> PathBuf {
        self.workspace_root
            .as_ref()
            .map_or_else(|| PathBuf::from(relative), |root| root.join(relative))
    }

    #[must_use]
    pub fn preference_path(&self) -> PathBuf {
        self.resolve_path(&self.settings.preference_file)
    }

    #[must_use]
    pub fn translations_dir(&self) -> Option<PathBuf> {
        self.settings.translations_dir.as_deref().map(|dir| self.resolve_path(dir))
    }

    /// 組み込みテーブルに `translationsDir` の上書きを重ねる
    ///
    /// # Errors
    /// 上書きディレクトリやファイルが読めない場合
    pub fn translation_table(&self) -> Result<TranslationTable, TranslationLoadError> {
        let mut table = TranslationTable::builtin();

        if let Some(dir) = self.translations_dir() {
            let loaded = table.load_overrides(&dir, &self.settings.supported_locales)?;
            tracing::info!(dir = %dir.display(), loaded, "Loaded translation overrides");
        }

        Ok(table)
    }

    /// `persist` が偽ならメモリ上のみ、真なら `preferenceFile` に保存する
    #[must_use]
    pub fn preference_store(&self, persist: bool) -> Box<dyn PreferenceStore> {
        if persist {
            Box::new(FilePreferenceStore::new(self.preference_path()))
        } else {
            Box::new(MemoryPreferenceStore::new())
        }
    }

    /// 検証済みの設定で `Site` を組み立てる
    ///
    /// # Errors
    /// 翻訳の上書きが読めない場合
    pub fn build_site<F: RepositoryFetcher>(
        &self,
        fetcher: F,
        host_locale: Option<&str>,
    ) -> Result<Site<F>, TranslationLoadError> {
        Ok(Site::new(&self.settings, self.translation_table()?, fetcher, host_locale))
    }
}
