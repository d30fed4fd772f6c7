//! Active-locale resolution and application to the page

use super::shortcut::{
    KeyPress,
    Shortcut,
};
use super::store::PreferenceStore;
use super::table::TranslationTable;
use crate::config::SiteSettings;
use crate::page::{
    LocaleControl,
    Page,
};

/// Which input decided the active locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    QueryParameter,
    PersistedPreference,
    Environment,
    Default,
    /// Chosen through `switch_locale` (click or shortcut)
    Switched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleState {
    pub locale: String,
    pub provenance: Provenance,
}

/// Raw resolution inputs. Any of them may be absent or malformed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveInputs<'a> {
    pub query: Option<&'a str>,
    pub persisted: Option<&'a str>,
    /// e.g. `ja-JP` or `ja_JP.UTF-8`
    pub environment_hint: Option<&'a str>,
}

/// Locale resolver
///
/// 現在のロケールを状態として保持し、起動時の解決・ページへの適用・切り替えを担当する。
/// ロケールは `switch_locale` / `handle_key` 経由でのみ変化する。
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    /// 翻訳テーブル（初期化後は不変）
    table: TranslationTable,
    /// 対応ロケール（設定順）
    supported: Vec<String>,
    /// デフォルトロケール
    default_locale: String,
    /// ロケール指定のクエリパラメータ名
    query_parameter: String,
    /// 保存先キー
    storage_key: String,
    /// 切替ショートカット
    shortcut: Shortcut,
    /// 言語切替コントロールの挿入位置
    switcher_anchor_id: String,
    /// 現在の状態
    state: LocaleState,
}

impl LocaleResolver {
    #[must_use]
    pub fn new(settings: &SiteSettings, table: TranslationTable) -> Self {
        Self {
            table,
            supported: settings.supported_locales.clone(),
            default_locale: settings.default_locale.clone(),
            query_parameter: settings.query_parameter.clone(),
            storage_key: settings.storage_key.clone(),
            shortcut: settings.shortcut(),
            switcher_anchor_id: settings.switcher_anchor_id.clone(),
            state: LocaleState {
                locale: settings.default_locale.clone(),
                provenance: Provenance::Default,
            },
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LocaleState {
        &self.state
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.state.locale
    }

    #[must_use]
    pub const fn table(&self) -> &TranslationTable {
        &self.table
    }

    #[must_use]
    pub fn is_supported(&self, locale: &str) -> bool {
        self.supported.iter().any(|supported| supported == locale)
    }

    /// Decides the active locale; first match wins:
    /// query → persisted → environment prefix → default.
    ///
    /// Query and persisted values must equal a supported code exactly. The environment
    /// hint is compared case-insensitively: `JA`, `ja-JP` and `ja_JP.UTF-8` all select
    /// `ja`. Only non-default locales are tried, in supported-list order.
    #[must_use]
    pub fn resolve_active_locale(&self, inputs: &ResolveInputs<'_>) -> LocaleState {
        if let Some(query) = inputs.query {
            if self.is_supported(query) {
                return Self::state_for(query, Provenance::QueryParameter);
            }
            tracing::trace!(query, "Ignoring unsupported locale in query parameter");
        }

        if let Some(persisted) = inputs.persisted {
            if self.is_supported(persisted) {
                return Self::state_for(persisted, Provenance::PersistedPreference);
            }
            tracing::trace!(persisted, "Ignoring unsupported persisted locale");
        }

        if let Some(hint) = inputs.environment_hint {
            let hint = hint.to_ascii_lowercase();
            if let Some(locale) = self
                .supported
                .iter()
                .filter(|locale| **locale != self.default_locale)
                .find(|locale| hint.starts_with(&locale.to_ascii_lowercase()))
            {
                return Self::state_for(locale, Provenance::Environment);
            }
        }

        Self::state_for(&self.default_locale, Provenance::Default)
    }

    /// Gathers the inputs from the page URL and `store`, then resolves.
    ///
    /// A failing store counts as "no preference".
    #[must_use]
    pub fn resolve_from(
        &self,
        page: &Page,
        store: &dyn PreferenceStore,
        environment_hint: Option<&str>,
    ) -> LocaleState {
        let query = page.query_param(&self.query_parameter);
        let persisted = store.get(&self.storage_key).unwrap_or_else(|e| {
            tracing::warn!("Failed to read locale preference: {}", e);
            None
        });

        self.resolve_active_locale(&ResolveInputs {
            query: query.as_deref(),
            persisted: persisted.as_deref(),
            environment_hint,
        })
    }

    /// Translation of `key` in the active locale.
    #[must_use]
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.table.translate(&self.state.locale, key)
    }

    /// Applies the active locale to `page` and persists it.
    ///
    /// Every step is best-effort: a failing store only logs.
    pub fn apply_locale(&self, page: &mut Page, store: &mut dyn PreferenceStore) {
        let locale = self.state.locale.as_str();

        let mut rewritten = 0usize;
        for element in page.translatable_elements_mut() {
            if let Some(key) = element.i18n_key.as_deref() {
                let text = self.table.translate(locale, key).to_string();
                element.set_displayed_text(&text);
                rewritten += 1;
            }
        }

        locale.clone_into(&mut page.lang);
        self.table.translate(locale, "meta.title").clone_into(&mut page.title);
        self.table.translate(locale, "meta.description").clone_into(&mut page.meta_description);

        if let Err(e) = store.set(&self.storage_key, locale) {
            tracing::warn!("Failed to persist locale preference: {}", e);
        }

        page.set_query_param(&self.query_parameter, locale);
        page.refresh_locale_controls(self.locale_controls());

        tracing::debug!(locale, rewritten, "Applied locale");
    }

    /// Switches to `requested` and applies it.
    ///
    /// Returns `false` (and changes nothing) for an unsupported locale.
    pub fn switch_locale(
        &mut self,
        requested: &str,
        page: &mut Page,
        store: &mut dyn PreferenceStore,
    ) -> bool {
        if !self.is_supported(requested) {
            tracing::debug!(requested, "Ignoring switch to unsupported locale");
            return false;
        }

        self.state = Self::state_for(requested, Provenance::Switched);
        self.apply_locale(page, store);
        tracing::info!(locale = requested, "Locale switched");
        true
    }

    /// Toggles between the two supported locales when `press` matches the shortcut.
    ///
    /// Does nothing unless exactly two locales are supported.
    pub fn handle_key(
        &mut self,
        press: &KeyPress,
        page: &mut Page,
        store: &mut dyn PreferenceStore,
    ) -> bool {
        if !self.shortcut.matches(press) {
            return false;
        }

        let [first, second] = self.supported.as_slice() else {
            tracing::debug!(
                count = self.supported.len(),
                "Locale toggle requires exactly two supported locales"
            );
            return false;
        };

        let next = if self.state.locale == *first { second.clone() } else { first.clone() };
        self.switch_locale(&next, page, store)
    }

    /// One control per supported locale, labelled via `language.<code>`.
    #[must_use]
    pub fn locale_controls(&self) -> Vec<LocaleControl> {
        self.supported
            .iter()
            .map(|locale| {
                let key = format!("language.{locale}");
                let label = self
                    .table
                    .get(&self.state.locale, &key)
                    .map_or_else(|| locale.to_ascii_uppercase(), ToString::to_string);
                LocaleControl {
                    locale: locale.clone(),
                    label,
                    active: *locale == self.state.locale,
                }
            })
            .collect()
    }

    /// Startup: resolve, install the switcher, then apply.
    ///
    /// Runs synchronously, so it finishes before any switch can be handled.
    pub fn initialize(
        &mut self,
        page: &mut Page,
        store: &mut dyn PreferenceStore,
        environment_hint: Option<&str>,
    ) -> &LocaleState {
        for missing in self.table.missing_keys() {
            tracing::warn!(locale = %missing.locale, key = %missing.key, "Missing translation");
        }

        self.state = self.resolve_from(page, store, environment_hint);
        tracing::debug!(
            locale = %self.state.locale,
            provenance = ?self.state.provenance,
            "Resolved active locale"
        );

        page.install_locale_switcher(&self.switcher_anchor_id, self.locale_controls());
        self.apply_locale(page, store);
        &self.state
    }

    /// `LocaleState` を作る
    fn state_for(locale: &str, provenance: Provenance) -> LocaleState {
        LocaleState { locale: locale.to_string(), provenance }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use url::Url;

    use super::*;
    use crate::locale::store::MemoryPreferenceStore;
    use crate::page::ElementKind;
    use crate::test_utils::UnavailableStore;

    /// デフォルト設定のリゾルバ
    #[fixture]
    fn resolver() -> LocaleResolver {
        LocaleResolver::new(&SiteSettings::default(), TranslationTable::builtin())
    }

    /// テスト用ページ
    fn landing(query: &str) -> Page {
        Page::landing(Url::parse(&format!("https://example.com/{query}")).unwrap())
    }

    /// 入力を組み立てる
    const fn inputs<'a>(
        query: Option<&'a str>,
        persisted: Option<&'a str>,
        environment_hint: Option<&'a str>,
    ) -> ResolveInputs<'a> {
        ResolveInputs { query, persisted, environment_hint }
    }

    #[rstest]
    #[case(inputs(Some("ja"), Some("en"), Some("en-US")), "ja", Provenance::QueryParameter)]
    #[case(inputs(None, Some("ja"), Some("en-US")), "ja", Provenance::PersistedPreference)]
    #[case(inputs(None, None, Some("ja-JP")), "ja", Provenance::Environment)]
    #[case(inputs(None, None, Some("ja_JP.UTF-8")), "ja", Provenance::Environment)]
    #[case(inputs(None, None, Some("JA")), "ja", Provenance::Environment)]
    #[case(inputs(None, None, None), "en", Provenance::Default)]
    #[case(inputs(None, None, Some("fr-FR")), "en", Provenance::Default)]
    #[case(inputs(Some("fr"), Some("de"), Some("en-US")), "en", Provenance::Default)]
    #[case(inputs(Some("JA"), None, None), "en", Provenance::Default)]
    #[case(inputs(Some(""), Some("en"), Some("ja-JP")), "en", Provenance::PersistedPreference)]
    #[case(inputs(Some("ja-JP"), None, Some("en")), "en", Provenance::Default)]
    fn resolve_priority(
        resolver: LocaleResolver,
        #[case] inputs: ResolveInputs<'static>,
        #[case] expected: &str,
        #[case] provenance: Provenance,
    ) {
        let state = resolver.resolve_active_locale(&inputs);

        assert_that!(
            state,
            all![
                field!(LocaleState.locale, eq(expected)),
                field!(LocaleState.provenance, eq(&provenance))
            ]
        );
    }

    #[rstest]
    fn resolve_from_reads_query_and_store(resolver: LocaleResolver) {
        let page = landing("?lang=ja");
        let store = MemoryPreferenceStore::with_entry("sca-language", "en");

        let state = resolver.resolve_from(&page, &store, Some("en-US"));

        assert_that!(state.locale, eq("ja"));
        assert_that!(state.provenance, eq(Provenance::QueryParameter));
    }

    #[rstest]
    fn apply_locale_rewrites_page(mut resolver: LocaleResolver) {
        let mut page = landing("?ref=top");
        let mut store = MemoryPreferenceStore::new();

        resolver.initialize(&mut page, &mut store, Some("ja-JP"));

        assert_that!(page.lang, eq("ja"));
        assert_that!(page.title, eq("SCA - 共生認知アーキテクチャ"));
        assert_that!(page.meta_description, contains_substring("共生認知アーキテクチャ"));
        assert_that!(page.url.as_str(), eq("https://example.com/?ref=top&lang=ja"));
        assert_that!(store.get("sca-language").unwrap(), some(eq("ja")));

        let submit = page
            .translatable_elements_mut()
            .find(|element| element.kind == ElementKind::SubmitInput)
            .unwrap();
        assert_that!(submit.value, some(eq("送信")));

        let switcher = page.switcher.as_ref().unwrap();
        assert_that!(switcher.anchor_id, eq("nav-github"));
        assert_that!(
            switcher.controls,
            elements_are![
                all![field!(LocaleControl.locale, eq("en")), field!(LocaleControl.active, eq(&false))],
                all![field!(LocaleControl.locale, eq("ja")), field!(LocaleControl.active, eq(&true))]
            ]
        );
    }

    #[rstest]
    #[case("", Some("ja-JP"), "ja", Provenance::Environment)]
    #[case("?lang=ja", None, "ja", Provenance::QueryParameter)]
    #[case("", None, "en", Provenance::Default)]
    fn unreadable_store_counts_as_no_preference(
        resolver: LocaleResolver,
        #[case] query: &str,
        #[case] hint: Option<&str>,
        #[case] expected: &str,
        #[case] provenance: Provenance,
    ) {
        let state = resolver.resolve_from(&landing(query), &UnavailableStore, hint);

        assert_that!(state.locale, eq(expected));
        assert_that!(state.provenance, eq(provenance));
    }

    #[rstest]
    fn unwritable_store_still_updates_page(mut resolver: LocaleResolver) {
        let mut page = landing("");
        let mut store = UnavailableStore;

        resolver.initialize(&mut page, &mut store, Some("ja-JP"));

        assert_that!(page.lang, eq("ja"));
        assert_that!(page.title, eq("SCA - 共生認知アーキテクチャ"));
        assert_that!(page.url.as_str(), eq("https://example.com/?lang=ja"));

        assert_that!(resolver.switch_locale("en", &mut page, &mut store), eq(true));
        assert_that!(resolver.locale(), eq("en"));
        assert_that!(page.lang, eq("en"));
        assert_that!(page.url.as_str(), eq("https://example.com/?lang=en"));
        assert_that!(page.title, eq(resolver.table().translate("en", "meta.title")));
        assert_that!(
            page.switcher.as_ref().unwrap().controls,
            elements_are![
                field!(LocaleControl.active, eq(&true)),
                field!(LocaleControl.active, eq(&false))
            ]
        );
    }

    #[rstest]
    fn switch_rebuilds_control_labels_in_new_locale() {
        let mut table = TranslationTable::builtin();
        table.merge("ja", [("language.en".to_string(), "英語".to_string())]);
        let mut resolver = LocaleResolver::new(&SiteSettings::default(), table);
        let mut page = landing("");
        let mut store = MemoryPreferenceStore::new();
        resolver.initialize(&mut page, &mut store, None);

        let english_label = |page: &Page| page.switcher.as_ref().unwrap().controls[0].label.clone();
        assert_that!(english_label(&page), not(eq("英語")));

        assert_that!(resolver.switch_locale("ja", &mut page, &mut store), eq(true));

        assert_that!(english_label(&page), eq("英語"));
    }

    #[rstest]
    fn apply_locale_falls_back_to_key_for_unknown_keys(mut resolver: LocaleResolver) {
        let mut page = landing("");
        page.sections[0].elements.push(crate::page::Element::translated("span", "nav.unknown"));
        let mut store = MemoryPreferenceStore::new();

        resolver.initialize(&mut page, &mut store, None);

        let unknown = page.sections[0].elements.last().unwrap();
        assert_that!(unknown.text, eq("nav.unknown"));
    }

    #[rstest]
    #[case("en", "ja")]
    #[case("ja", "en")]
    #[case("en", "en")]
    #[case("ja", "ja")]
    fn switch_locale_persists_for_next_load(
        mut resolver: LocaleResolver,
        #[case] from: &str,
        #[case] to: &str,
    ) {
        let mut page = landing("");
        let mut store = MemoryPreferenceStore::with_entry("sca-language", from);
        resolver.initialize(&mut page, &mut store, None);
        assert_that!(resolver.locale(), eq(from));

        assert_that!(resolver.switch_locale(to, &mut page, &mut store), eq(true));
        assert_that!(resolver.state().provenance, eq(Provenance::Switched));
        assert_that!(resolver.locale(), eq(to));

        // 次回ロード: クエリなし、保存済みの設定のみ
        let next_page = landing("");
        let state = resolver.resolve_from(&next_page, &store, Some("en-US"));
        assert_that!(state.locale, eq(to));
        assert_that!(state.provenance, eq(Provenance::PersistedPreference));
    }

    #[rstest]
    fn switch_to_unsupported_locale_is_noop(mut resolver: LocaleResolver) {
        let mut page = landing("");
        let mut store = MemoryPreferenceStore::new();
        resolver.initialize(&mut page, &mut store, None);
        let before = page.clone();

        assert_that!(resolver.switch_locale("fr", &mut page, &mut store), eq(false));
        assert_that!(resolver.locale(), eq("en"));
        assert_eq!(page, before);
        assert_that!(store.get("sca-language").unwrap(), some(eq("en")));
    }

    #[rstest]
    fn shortcut_toggles_between_two_locales(mut resolver: LocaleResolver) {
        let mut page = landing("");
        let mut store = MemoryPreferenceStore::new();
        resolver.initialize(&mut page, &mut store, None);
        let press = KeyPress::new('l').with_alt();

        let mut seen = Vec::new();
        for _ in 0..5 {
            assert_that!(resolver.handle_key(&press, &mut page, &mut store), eq(true));
            seen.push(resolver.locale().to_string());
        }

        assert_that!(seen, elements_are![eq("ja"), eq("en"), eq("ja"), eq("en"), eq("ja")]);
        assert_that!(page.lang, eq("ja"));
    }

    #[rstest]
    fn other_keys_do_not_toggle(mut resolver: LocaleResolver) {
        let mut page = landing("");
        let mut store = MemoryPreferenceStore::new();
        resolver.initialize(&mut page, &mut store, None);

        assert_that!(resolver.handle_key(&KeyPress::new('l'), &mut page, &mut store), eq(false));
        assert_that!(resolver.locale(), eq("en"));
    }

    #[rstest]
    fn shortcut_requires_exactly_two_locales() {
        let settings = SiteSettings {
            supported_locales: vec!["en".to_string(), "ja".to_string(), "fr".to_string()],
            ..SiteSettings::default()
        };
        let mut resolver = LocaleResolver::new(&settings, TranslationTable::builtin());
        let mut page = landing("");
        let mut store = MemoryPreferenceStore::new();
        resolver.initialize(&mut page, &mut store, None);

        let toggled = resolver.handle_key(&KeyPress::new('l').with_alt(), &mut page, &mut store);

        assert_that!(toggled, eq(false));
        assert_that!(resolver.locale(), eq("en"));
    }

    #[rstest]
    fn environment_prefers_first_matching_non_default() {
        let settings = SiteSettings {
            supported_locales: vec!["en".to_string(), "ja".to_string(), "fr".to_string()],
            ..SiteSettings::default()
        };
        let resolver = LocaleResolver::new(&settings, TranslationTable::builtin());

        let state = resolver.resolve_active_locale(&inputs(None, None, Some("fr-CA")));

        assert_that!(state.locale, eq("fr"));
    }

    #[rstest]
    fn locale_controls_fall_back_to_uppercase_code() {
        let settings = SiteSettings {
            supported_locales: vec!["en".to_string(), "ja".to_string(), "fr".to_string()],
            ..SiteSettings::default()
        };
        let resolver = LocaleResolver::new(&settings, TranslationTable::builtin());

        let labels: Vec<String> =
            resolver.locale_controls().into_iter().map(|control| control.label).collect();

        assert_that!(labels, elements_are![eq("EN"), eq("日本語"), eq("FR")]);
    }
}
