//! `.sca-site.json` の読み込み

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    SiteSettings,
};

/// 設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".sca-site.json";

/// 読み込んだ設定とその出所
#[derive(Debug, Clone, Default)]
pub(super) struct LoadedSettings {
    /// 読み込んだファイル（デフォルト値の場合は `None`）
    pub(super) source: Option<PathBuf>,
    /// 未検証の設定値
    pub(super) settings: SiteSettings,
}

/// ワークスペース直下の設定ファイルを読み込む
///
/// ファイルが無い場合と空白だけの場合はデフォルト値になる。
pub(super) fn load_workspace_settings(workspace_root: &Path) -> Result<LoadedSettings, ConfigError> {
    let path = workspace_root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "No site configuration, using defaults");
            return Ok(LoadedSettings::default());
        }
        Err(e) => return Err(e.into()),
    };

    let settings = if content.trim().is_empty() {
        tracing::debug!(path = %path.display(), "Empty site configuration, using defaults");
        SiteSettings::default()
    } else {
        serde_json::from_str(&content)?
    };

    tracing::debug!(path = %path.display(), "Loaded site configuration");
    Ok(LoadedSettings { source: Some(path), settings })
}
