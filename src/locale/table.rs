//! Translation table: locale → dotted key → display string

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;
use thiserror::Error;

use super::builtin;

/// Errors while reading a translation override file
#[derive(Error, Debug)]
pub enum TranslationLoadError {
    #[error("Failed to read translation file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot infer a locale from {0:?}")]
    UnknownLocale(PathBuf),
}

/// A key present in some locale but absent from `locale`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKey {
    pub locale: String,
    pub key: String,
}

/// Immutable once the site is initialized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    /// Ordered for deterministic iteration in diagnostics.
    locales: BTreeMap<String, HashMap<String, String>>,
}

impl TranslationTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in English and Japanese tables.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::new();
        for (locale, entries) in [("en", builtin::EN), ("ja", builtin::JA)] {
            table.merge(
                locale,
                entries.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())),
            );
        }
        table
    }

    /// Overlays `entries` on `locale`, creating the locale if needed.
    pub fn merge(&mut self, locale: &str, entries: impl IntoIterator<Item = (String, String)>) {
        self.locales.entry(locale.to_string()).or_default().extend(entries);
    }

    /// Display string for `(locale, key)`, or `key` itself when absent.
    #[must_use]
    pub fn translate<'a>(&'a self, locale: &str, key: &'a str) -> &'a str {
        self.get(locale, key).unwrap_or(key)
    }

    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.locales.get(locale).and_then(|keys| keys.get(key)).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn keys(&self, locale: &str) -> impl Iterator<Item = &str> {
        self.locales.get(locale).into_iter().flat_map(|keys| keys.keys().map(String::as_str))
    }

    /// Keys defined for some locale but missing from another, sorted by locale then key.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<MissingKey> {
        let all_keys: std::collections::BTreeSet<&str> =
            self.locales.values().flat_map(|keys| keys.keys().map(String::as_str)).collect();

        let mut missing = Vec::new();
        for (locale, keys) in &self.locales {
            for key in &all_keys {
                if !keys.contains_key(*key) {
                    missing.push(MissingKey { locale: locale.clone(), key: (*key).to_string() });
                }
            }
        }
        missing
    }

    /// Loads `<locale>.json` overrides from `dir` for each supported locale.
    ///
    /// Files whose stem is not a supported locale are skipped.
    pub fn load_overrides(
        &mut self,
        dir: &Path,
        supported: &[String],
    ) -> Result<usize, TranslationLoadError> {
        let entries = std::fs::read_dir(dir)
            .map_err(|source| TranslationLoadError::Io { path: dir.to_path_buf(), source })?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            let locale = locale_from_path(&path)?;
            if !supported.contains(&locale) {
                tracing::debug!(?path, %locale, "Skipping translations for unsupported locale");
                continue;
            }

            let keys = load_translation_file(&path)?;
            tracing::debug!(?path, %locale, count = keys.len(), "Loaded translation overrides");
            self.merge(&locale, keys);
            loaded += 1;
        }

        Ok(loaded)
    }
}

/// Locale inferred from the file stem (`locales/ja.json` → `ja`).
fn locale_from_path(path: &Path) -> Result<String, TranslationLoadError> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| TranslationLoadError::UnknownLocale(path.to_path_buf()))
}

/// Reads one JSON translation file into a flattened key map.
pub fn load_translation_file(path: &Path) -> Result<HashMap<String, String>, TranslationLoadError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| TranslationLoadError::Io { path: path.to_path_buf(), source })?;

    let json: Value = serde_json::from_str(&content)
        .map_err(|source| TranslationLoadError::Parse { path: path.to_path_buf(), source })?;

    Ok(flatten_json(&json, ".", None))
}

/// Flatten nested JSON object into dot-separated key map.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use sca_site::locale::flatten_json;
///
/// let json = json!({
///     "nav": {
///         "home": "Home",
///         "github": "GitHub"
///     }
/// });
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("nav.home"), Some(&"Home".to_string()));
/// assert_eq!(flattened.get("nav.github"), Some(&"GitHub".to_string()));
/// ```
#[must_use]
pub fn flatten_json(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
) -> HashMap<String, String> {
    let mut result = HashMap::new();
    flatten_json_value(json, separator, prefix, &mut result);
    result
}

/// `flatten_json` の再帰本体
fn flatten_json_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut HashMap<String, String>,
) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        Value::Null => {}
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[googletest::test]
    fn builtin_has_identical_key_sets() {
        let table = TranslationTable::builtin();

        expect_that!(table.locales().collect::<Vec<_>>(), elements_are![eq(&"en"), eq(&"ja")]);
        expect_that!(table.missing_keys(), is_empty());
    }

    #[googletest::test]
    fn builtin_keys_translate_to_real_text() {
        let table = TranslationTable::builtin();

        for locale in ["en", "ja"] {
            for key in table.keys(locale) {
                let value = table.translate(locale, key);
                expect_that!(value, not(eq("")));
                expect_that!(value, not(eq(key)));
            }
        }
    }

    #[googletest::test]
    fn builtin_routes_head_strings_through_table() {
        let table = TranslationTable::builtin();

        expect_that!(table.get("en", "meta.title"), some(contains_substring("Symbiotic")));
        expect_that!(table.get("ja", "meta.title"), some(contains_substring("共生認知")));
        expect_that!(table.get("ja", "meta.description"), some(anything()));
    }

    #[rstest]
    #[case("en", "does.not.exist")]
    #[case("ja", "nav")]
    #[case("ja", "")]
    #[case("fr", "nav.home")]
    fn translate_missing_returns_key(#[case] locale: &str, #[case] key: &str) {
        let table = TranslationTable::builtin();

        assert_eq!(table.translate(locale, key), key);
    }

    #[googletest::test]
    fn missing_keys_reports_each_gap() {
        let mut table = TranslationTable::new();
        table.merge("en", [("a".to_string(), "A".to_string()), ("b".to_string(), "B".to_string())]);
        table.merge("ja", [("b".to_string(), "ビー".to_string()), ("c".to_string(), "シー".to_string())]);

        assert_that!(
            table.missing_keys(),
            elements_are![
                all![field!(MissingKey.locale, eq("en")), field!(MissingKey.key, eq("c"))],
                all![field!(MissingKey.locale, eq("ja")), field!(MissingKey.key, eq("a"))]
            ]
        );
    }

    #[googletest::test]
    fn merge_overrides_existing_value() {
        let mut table = TranslationTable::builtin();

        table.merge("en", [("nav.home".to_string(), "Start".to_string())]);

        assert_that!(table.translate("en", "nav.home"), eq("Start"));
        assert_that!(table.translate("ja", "nav.home"), eq("ホーム"));
    }

    #[googletest::test]
    fn test_flatten_json_nested() {
        let json = json!({
            "nav": { "home": "Home", "menu": { "open": "Open" } },
            "title": "Title"
        });

        let result = flatten_json(&json, ".", None);

        assert_that!(result.len(), eq(3));
        assert_that!(result.get("nav.menu.open"), some(eq("Open")));
        assert_that!(result.get("title"), some(eq("Title")));
    }

    #[googletest::test]
    fn test_flatten_json_arrays_and_scalars() {
        let json = json!({ "steps": ["one", "two"], "count": 3, "enabled": true, "none": null });

        let result = flatten_json(&json, ".", None);

        assert_that!(result.get("steps[0]"), some(eq("one")));
        assert_that!(result.get("steps[1]"), some(eq("two")));
        assert_that!(result.get("count"), some(eq("3")));
        assert_that!(result.get("enabled"), some(eq("true")));
        assert_that!(result.get("none"), none());
    }

    #[googletest::test]
    fn load_overrides_reads_supported_locales_only() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("en.json"), r#"{"nav": {"home": "Start"}}"#).unwrap();
        fs::write(dir.path().join("fr.json"), r#"{"nav": {"home": "Accueil"}}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let mut table = TranslationTable::builtin();

        let loaded =
            table.load_overrides(dir.path(), &["en".to_string(), "ja".to_string()]).unwrap();

        expect_that!(loaded, eq(1));
        expect_that!(table.translate("en", "nav.home"), eq("Start"));
        expect_that!(table.contains("fr"), eq(false));
    }

    #[googletest::test]
    fn load_overrides_invalid_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("ja.json"), "{ not json").unwrap();
        let mut table = TranslationTable::builtin();

        let result = table.load_overrides(dir.path(), &["ja".to_string()]);

        assert!(matches!(result, Err(TranslationLoadError::Parse { .. })));
    }

    #[googletest::test]
    fn load_overrides_missing_dir() {
        let mut table = TranslationTable::builtin();

        let result = table.load_overrides(Path::new("/nonexistent/locales"), &["en".to_string()]);

        assert!(matches!(result, Err(TranslationLoadError::Io { .. })));
    }
}
