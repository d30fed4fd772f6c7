//! Persisted locale preference

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access preference file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse preference file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value store surviving across sessions.
pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    /// 保存されている値
    entries: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `key = value`.
    #[must_use]
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object file, e.g. `{"sca-language": "ja"}`.
///
/// A missing file reads as empty; `set` rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    /// 保存先ファイル
    path: PathBuf,
}

impl FilePreferenceStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイル全体を読み込む
    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(StoreError::Io { path: self.path.clone(), source }),
        };

        serde_json::from_str(&content)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })
    }

    /// `StoreError::Io` を作る
    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // 壊れたファイルは上書きして復旧する
        let mut entries = self.read_all().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable preferences: {}", e);
            BTreeMap::new()
        });
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_string_pretty(&entries)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = ?self.path, key, value, "Preference saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn memory_store_round_trip() {
        let mut store = MemoryPreferenceStore::new();

        assert_that!(store.get("sca-language").unwrap(), none());
        store.set("sca-language", "ja").unwrap();
        assert_that!(store.get("sca-language").unwrap(), some(eq("ja")));
    }

    #[rstest]
    fn file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("prefs.json"));

        assert_that!(store.get("sca-language").unwrap(), none());
    }

    #[rstest]
    fn file_store_creates_parent_dirs_and_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/prefs.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"theme": "dark"}"#).unwrap();
        let mut store = FilePreferenceStore::new(&path);

        store.set("sca-language", "ja").unwrap();

        let reopened = FilePreferenceStore::new(&path);
        assert_that!(reopened.get("sca-language").unwrap(), some(eq("ja")));
        assert_that!(reopened.get("theme").unwrap(), some(eq("dark")));
    }

    #[rstest]
    fn file_store_set_creates_missing_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".sca-site/preferences.json");
        let mut store = FilePreferenceStore::new(&path);

        store.set("sca-language", "en").unwrap();

        assert_that!(path.exists(), eq(true));
    }

    #[rstest]
    fn file_store_corrupt_file_reports_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        let mut store = FilePreferenceStore::new(&path);

        assert!(matches!(store.get("sca-language"), Err(StoreError::Parse { .. })));

        // set は破損ファイルを上書きする
        store.set("sca-language", "ja").unwrap();
        assert_that!(store.get("sca-language").unwrap(), some(eq("ja")));
    }
}
