//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]

use std::path::PathBuf;

use futures::future::BoxFuture;
use serde_json::{
    Value,
    json,
};

use crate::locale::{
    PreferenceStore,
    StoreError,
};
use crate::status::{
    FetchError,
    RepositoryFetcher,
    RepositoryStatus,
};

/// GitHub API レスポンス相当の JSON
pub(crate) fn sample_status_json() -> Value {
    json!({
        "id": 1,
        "name": "sca-cognitive-architecture",
        "full_name": "takawasi/sca-cognitive-architecture",
        "description": "Symbiotic Cognitive Architecture",
        "private": false,
        "stargazers_count": 12,
        "forks_count": 3,
        "size": 456,
        "language": "Python",
        "created_at": "2025-01-15T09:30:00Z",
        "updated_at": "2025-06-01T12:00:00Z",
        "html_url": "https://github.com/takawasi/sca-cognitive-architecture",
        "clone_url": "https://github.com/takawasi/sca-cognitive-architecture.git"
    })
}

/// `sample_status_json` をデコードした値
#[allow(clippy::expect_used)]
pub(crate) fn sample_status() -> RepositoryStatus {
    serde_json::from_value(sample_status_json()).expect("sample status must decode")
}

/// 固定の結果を返す fetcher
#[derive(Debug, Clone)]
pub(crate) enum ScriptedFetcher {
    /// 成功
    Ok(Box<RepositoryStatus>),
    /// 通信エラー
    NetworkError,
    /// HTTP ステータスエラー
    Status(u16),
    /// デコードできないレスポンス
    Malformed,
}

impl ScriptedFetcher {
    /// 成功する fetcher
    pub(crate) fn ok(status: RepositoryStatus) -> Self {
        Self::Ok(Box::new(status))
    }

    /// 通信エラーを返す fetcher
    pub(crate) const fn network_error() -> Self {
        Self::NetworkError
    }

    /// 指定ステータスで失敗する fetcher
    pub(crate) const fn status(code: u16) -> Self {
        Self::Status(code)
    }

    /// 不正なボディを返す fetcher
    pub(crate) const fn malformed() -> Self {
        Self::Malformed
    }

    /// 結果を組み立てる
    fn result(&self) -> Result<RepositoryStatus, FetchError> {
        match self {
            Self::Ok(status) => Ok((**status).clone()),
            // reqwest::Error は直接作れないため、不正な URL でのビルドエラーを使う
            Self::NetworkError => match reqwest::Client::new().get("not a url").build() {
                Err(e) => Err(FetchError::Network(e)),
                Ok(_) => Err(FetchError::Status(0)),
            },
            Self::Status(code) => Err(FetchError::Status(*code)),
            Self::Malformed => RepositoryStatus::decode(b"{\"name\": 1}").map_err(FetchError::from),
        }
    }
}

impl RepositoryFetcher for ScriptedFetcher {
    fn fetch(&self) -> BoxFuture<'_, Result<RepositoryStatus, FetchError>> {
        Box::pin(futures::future::ready(self.result()))
    }
}

/// 読み書きが常に失敗する保存先
#[derive(Debug, Clone, Copy)]
pub(crate) struct UnavailableStore;

impl UnavailableStore {
    /// 失敗を表すエラー
    fn error() -> StoreError {
        StoreError::Io {
            path: PathBuf::from("/unavailable/preferences.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        }
    }
}

impl PreferenceStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(Self::error())
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(Self::error())
    }
}

/// 応答しない fetcher
#[derive(Debug, Clone, Copy)]
pub(crate) struct PendingFetcher;

impl RepositoryFetcher for PendingFetcher {
    fn fetch(&self) -> BoxFuture<'_, Result<RepositoryStatus, FetchError>> {
        Box::pin(futures::future::pending())
    }
}
