//! In-memory host document
//!
//! ブラウザ DOM の代わりに、翻訳対象要素・言語切替コントロール・ステータスパネル用コンテナ・
//! `<head>` のスタイルブロックを保持する最小限のドキュメントモデル。

use std::fmt::Write as _;

use url::Url;

use crate::html::escape;

/// 翻訳時に書き換える対象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// 表示テキストを書き換える
    Text,
    /// `<input type="submit">`: `value` 属性を書き換える
    SubmitInput,
}

/// ドキュメント内の 1 要素
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: Option<String>,
    pub tag: String,
    pub kind: ElementKind,
    /// `data-i18n` 属性
    pub i18n_key: Option<String>,
    pub text: String,
    pub value: Option<String>,
    /// Additional attributes, rendered in order.
    pub attributes: Vec<(String, String)>,
    /// Raw markup replacing `text` when set.
    pub inner_html: Option<String>,
}

impl Element {
    /// Translatable text element.
    #[must_use]
    pub fn translated(tag: &str, key: &str) -> Self {
        Self {
            id: None,
            tag: tag.to_string(),
            kind: ElementKind::Text,
            i18n_key: Some(key.to_string()),
            text: String::new(),
            value: None,
            attributes: Vec::new(),
            inner_html: None,
        }
    }

    /// Translatable submit button; its `value` carries the text.
    #[must_use]
    pub fn submit(key: &str) -> Self {
        Self { kind: ElementKind::SubmitInput, value: Some(String::new()), ..Self::translated("input", key) }
    }

    /// Element without a translation key.
    #[must_use]
    pub fn plain(tag: &str, text: &str) -> Self {
        Self { i18n_key: None, text: text.to_string(), ..Self::translated(tag, "") }
    }

    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Text currently shown to the user.
    #[must_use]
    pub fn displayed_text(&self) -> &str {
        match self.kind {
            ElementKind::Text => &self.text,
            ElementKind::SubmitInput => self.value.as_deref().unwrap_or_default(),
        }
    }

    /// Replaces the displayed text (or `value` for submit inputs).
    pub fn set_displayed_text(&mut self, text: &str) {
        match self.kind {
            ElementKind::Text => text.clone_into(&mut self.text),
            ElementKind::SubmitInput => self.value = Some(text.to_string()),
        }
    }

    /// 要素を HTML として書き出す
    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if self.kind == ElementKind::SubmitInput {
            out.push_str(" type=\"submit\"");
        }
        if let Some(id) = &self.id {
            let _ = write!(out, " id=\"{}\"", escape(id));
        }
        if let Some(key) = &self.i18n_key {
            let _ = write!(out, " data-i18n=\"{}\"", escape(key));
        }
        for (name, value) in &self.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }

        match self.kind {
            ElementKind::SubmitInput => {
                let _ = write!(
                    out,
                    " value=\"{}\">",
                    escape(self.value.as_deref().unwrap_or_default())
                );
            }
            ElementKind::Text => {
                out.push('>');
                match &self.inner_html {
                    Some(html) => out.push_str(html),
                    None => out.push_str(&escape(&self.text)),
                }
                let _ = write!(out, "</{}>", self.tag);
            }
        }
    }
}

/// 要素のまとまり（`<nav>`, `<section>`, `<footer>` など）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub tag: String,
    pub id: String,
    pub elements: Vec<Element>,
}

impl Section {
    #[must_use]
    pub fn new(tag: &str, id: &str, elements: Vec<Element>) -> Self {
        Self { tag: tag.to_string(), id: id.to_string(), elements }
    }
}

/// 言語切替ボタン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleControl {
    pub locale: String,
    pub label: String,
    pub active: bool,
}

/// 言語切替コントロール群（`anchor_id` 要素の直後に描画）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSwitcher {
    pub anchor_id: String,
    pub controls: Vec<LocaleControl>,
}

/// `<head>` に追加されるスタイルブロック
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleBlock {
    pub id: String,
    pub css: String,
}

/// ホストドキュメント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// `<html lang>`
    pub lang: String,
    pub title: String,
    pub meta_description: String,
    /// Current location. Updating it never triggers navigation.
    pub url: Url,
    pub sections: Vec<Section>,
    pub switcher: Option<LocaleSwitcher>,
    pub styles: Vec<StyleBlock>,
}

impl Page {
    /// Empty document at `url`.
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            lang: String::new(),
            title: String::new(),
            meta_description: String::new(),
            url,
            sections: Vec::new(),
            switcher: None,
            styles: Vec::new(),
        }
    }

    /// Project landing page. Texts are empty until a locale is applied.
    #[must_use]
    pub fn landing(url: Url) -> Self {
        let repo = "https://github.com/takawasi/sca-cognitive-architecture";

        let nav = Section::new("nav", "navbar", vec![
            Element::translated("a", "nav.home").with_attribute("href", "#home"),
            Element::translated("a", "nav.features").with_attribute("href", "#features"),
            Element::translated("a", "nav.architecture").with_attribute("href", "#architecture"),
            Element::translated("a", "nav.quickstart").with_attribute("href", "#quickstart"),
            Element::translated("a", "nav.github")
                .with_id("nav-github")
                .with_attribute("href", repo),
        ]);

        let hero = Section::new("section", "home", vec![
            Element::translated("h1", "hero.title"),
            Element::translated("p", "hero.subtitle"),
            Element::translated("a", "hero.cta_start").with_attribute("href", "#quickstart"),
            Element::translated("a", "hero.cta_github").with_attribute("href", repo),
        ]);

        let features = Section::new("section", "features", vec![
            Element::translated("h2", "features.title"),
            Element::translated("h3", "features.context.title"),
            Element::translated("p", "features.context.description"),
            Element::translated("h3", "features.decomposition.title"),
            Element::translated("p", "features.decomposition.description"),
            Element::translated("h3", "features.synthesis.title"),
            Element::translated("p", "features.synthesis.description"),
            Element::translated("h3", "features.memory.title"),
            Element::translated("p", "features.memory.description"),
        ]);

        let architecture = Section::new("section", "architecture", vec![
            Element::translated("h2", "architecture.title"),
            Element::translated("p", "architecture.description"),
        ]);

        let quickstart = Section::new("section", "quickstart", vec![
            Element::translated("h2", "quickstart.title"),
            Element::translated("p", "quickstart.install"),
            Element::plain("code", &format!("git clone {repo}.git")),
            Element::translated("button", "quickstart.copy"),
        ]);

        let status = Section::new("section", "status", vec![
            Element::translated("h2", "status.title"),
            Element::plain("div", "").with_id("github-status"),
        ]);

        let contact = Section::new("section", "contact", vec![
            Element::translated("h2", "contact.title"),
            Element::translated("p", "contact.description"),
            Element::submit("contact.submit"),
        ]);

        let footer = Section::new("footer", "footer", vec![Element::translated(
            "p",
            "footer.copyright",
        )]);

        Self {
            sections: vec![nav, hero, features, architecture, quickstart, status, contact, footer],
            ..Self::new(url)
        }
    }

    /// Elements carrying a `data-i18n` key, paired with that key.
    pub fn translatable_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.elements.iter_mut())
            .filter(|element| element.i18n_key.is_some())
    }

    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        self.sections
            .iter()
            .flat_map(|section| section.elements.iter())
            .find(|element| element.id.as_deref() == Some(id))
    }

    /// `id` 要素を可変参照で取得
    fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.elements.iter_mut())
            .find(|element| element.id.as_deref() == Some(id))
    }

    /// Replaces the markup of the element `id`. Returns `false` if no such element.
    pub fn set_inner_html(&mut self, id: &str, html: String) -> bool {
        match self.element_by_id_mut(id) {
            Some(element) => {
                element.inner_html = Some(html);
                true
            }
            None => false,
        }
    }

    /// Adds a `<style>` block unless one with the same id exists.
    ///
    /// Returns `true` when the block was added.
    pub fn inject_style_once(&mut self, id: &str, css: &str) -> bool {
        if self.styles.iter().any(|style| style.id == id) {
            return false;
        }
        self.styles.push(StyleBlock { id: id.to_string(), css: css.to_string() });
        true
    }

    /// Places `controls` after the element `anchor_id`, replacing any previous switcher.
    pub fn install_locale_switcher(&mut self, anchor_id: &str, controls: Vec<LocaleControl>) {
        if self.element_by_id(anchor_id).is_none() {
            tracing::debug!(anchor_id, "Switcher anchor not found; switcher will not render");
        }
        self.switcher = Some(LocaleSwitcher { anchor_id: anchor_id.to_string(), controls });
    }

    /// Replaces the controls of an installed switcher, keeping its anchor.
    ///
    /// Does nothing before `install_locale_switcher`.
    pub fn refresh_locale_controls(&mut self, controls: Vec<LocaleControl>) {
        if let Some(switcher) = &mut self.switcher {
            switcher.controls = controls;
        }
    }

    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url.query_pairs().find(|(key, _)| key == name).map(|(_, value)| value.into_owned())
    }

    /// Sets `name=value` in the URL query, keeping the other parameters in order.
    pub fn set_query_param(&mut self, name: &str, value: &str) {
        let mut replaced = false;
        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .filter_map(|(key, current)| {
                if key != name {
                    return Some((key.into_owned(), current.into_owned()));
                }
                if replaced {
                    return None;
                }
                replaced = true;
                Some((key.into_owned(), value.to_string()))
            })
            .collect();

        let mut serializer = self.url.query_pairs_mut();
        serializer.clear();
        serializer.extend_pairs(pairs);
        if !replaced {
            serializer.append_pair(name, value);
        }
    }

    /// ドキュメント全体を HTML 文字列として書き出す
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>\n");
        let _ = writeln!(out, "<html lang=\"{}\">", escape(&self.lang));
        out.push_str("<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape(&self.title));
        let _ = writeln!(
            out,
            "<meta name=\"description\" content=\"{}\">",
            escape(&self.meta_description)
        );
        for style in &self.styles {
            let _ = writeln!(out, "<style id=\"{}\">{}</style>", escape(&style.id), style.css);
        }
        out.push_str("</head>\n<body>\n");

        for section in &self.sections {
            let _ = writeln!(out, "<{} id=\"{}\">", section.tag, escape(&section.id));
            for element in &section.elements {
                element.write_html(&mut out);
                out.push('\n');
                if let Some(switcher) = &self.switcher
                    && element.id.as_deref() == Some(switcher.anchor_id.as_str())
                {
                    write_switcher(&mut out, switcher);
                }
            }
            let _ = writeln!(out, "</{}>", section.tag);
        }

        out.push_str("</body>\n</html>\n");
        out
    }
}

/// 言語切替コントロールを書き出す
fn write_switcher(out: &mut String, switcher: &LocaleSwitcher) {
    out.push_str("<div class=\"language-switcher\">");
    for control in &switcher.controls {
        let class = if control.active { "lang-btn active" } else { "lang-btn" };
        let _ = write!(
            out,
            "<button class=\"{class}\" data-lang=\"{}\" aria-pressed=\"{}\">{}</button>",
            escape(&control.locale),
            control.active,
            escape(&control.label)
        );
    }
    out.push_str("</div>\n");
}
