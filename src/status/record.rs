//! Repository metadata records

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

/// Subset of the GitHub `GET /repos/{owner}/{repo}` response used by the panel.
///
/// Decoding is strict: a missing required field or a wrong type fails as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RepositoryStatus {
    pub name: String,
    /// `null` for repositories without a description
    pub description: Option<String>,
    pub private: bool,
    pub stargazers_count: u64,
    pub forks_count: u64,
    /// Size in KB
    pub size: u64,
    pub language: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub html_url: String,
    pub clone_url: String,
}

impl RepositoryStatus {
    /// Validated decode of a response body.
    pub fn decode(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// Literal block shown whenever live data is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticFallbackStatus {
    pub name: &'static str,
    pub description: &'static str,
    pub status: &'static str,
    pub license: &'static str,
    pub url: &'static str,
}

impl StaticFallbackStatus {
    pub const DEFAULT: Self = Self {
        name: "sca-cognitive-architecture",
        description: "Symbiotic Cognitive Architecture - A framework for human-AI collaboration",
        status: "Active Development",
        license: "MIT",
        url: "https://github.com/takawasi/sca-cognitive-architecture",
    };
}

impl Default for StaticFallbackStatus {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    /// GitHub API レスポンス相当の JSON
    fn body() -> serde_json::Value {
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

    #[rstest]
    fn decode_full_record_ignores_extra_fields() {
        let status = RepositoryStatus::decode(body().to_string().as_bytes()).unwrap();

        assert_that!(status.stargazers_count, eq(12));
        assert_that!(status.language, some(eq("Python")));
        assert_that!(status.created_at.to_rfc3339(), eq("2025-01-15T09:30:00+00:00"));
    }

    #[rstest]
    fn decode_language_null_or_absent() {
        let mut with_null = body();
        with_null["language"] = serde_json::Value::Null;
        let mut absent = body();
        absent.as_object_mut().unwrap().remove("language");

        for value in [with_null, absent] {
            let status = RepositoryStatus::decode(value.to_string().as_bytes()).unwrap();
            assert_that!(status.language, none());
        }
    }

    #[rstest]
    #[case("name")]
    #[case("private")]
    #[case("stargazers_count")]
    #[case("created_at")]
    #[case("clone_url")]
    fn decode_rejects_missing_required_field(#[case] field: &str) {
        let mut value = body();
        value.as_object_mut().unwrap().remove(field);

        assert_that!(RepositoryStatus::decode(value.to_string().as_bytes()), err(anything()));
    }

    #[rstest]
    #[case("stargazers_count", json!("many"))]
    #[case("private", json!("no"))]
    #[case("updated_at", json!("yesterday"))]
    #[case("size", json!(-1))]
    fn decode_rejects_wrong_types(#[case] field: &str, #[case] replacement: serde_json::Value) {
        let mut value = body();
        value[field] = replacement;

        assert_that!(RepositoryStatus::decode(value.to_string().as_bytes()), err(anything()));
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"<html>Not Found</html>".as_slice())]
    #[case(br#"{"message": "Not Found"}"#.as_slice())]
    fn decode_rejects_malformed_body(#[case] raw: &[u8]) {
        assert_that!(RepositoryStatus::decode(raw), err(anything()));
    }
}
