//! Status panel markup

use std::fmt::Write as _;

use chrono::{
    DateTime,
    Utc,
};

use super::record::{
    RepositoryStatus,
    StaticFallbackStatus,
};
use crate::html::escape;

/// Id of the panel stylesheet block
pub const STATUS_STYLE_ID: &str = "github-status-style";

/// Panel stylesheet, injected once per page
pub const STATUS_CSS: &str = "\
.repo-card{border:1px solid #30363d;border-radius:8px;padding:1.5rem;background:#0d1117;color:#c9d1d9}\
.repo-header{display:flex;align-items:center;gap:.75rem}\
.repo-name{font-size:1.25rem;font-weight:600;margin:0}\
.repo-badge{border:1px solid #30363d;border-radius:2em;padding:0 .5rem;font-size:.75rem}\
.repo-stats,.repo-dates,.repo-actions{display:flex;flex-wrap:wrap;gap:1rem;margin-top:1rem}\
.repo-stat-value{font-weight:600}\
.repo-dates{font-size:.85rem;color:#8b949e}\
.repo-actions a,.repo-actions button{border-radius:6px;padding:.4rem .9rem}";

/// Language label used when GitHub reports no primary language
const MULTIPLE_LANGUAGES: &str = "Multiple";

/// Host date formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `6/1/2025`
    #[default]
    MonthDayYear,
    /// `2025/6/1`
    YearMonthDay,
}

impl DateStyle {
    /// Style for a host locale hint such as `ja-JP` or `en_US.UTF-8`.
    #[must_use]
    pub fn from_locale_hint(hint: Option<&str>) -> Self {
        match hint {
            Some(hint) if hint.to_ascii_lowercase().starts_with("ja") => Self::YearMonthDay,
            _ => Self::MonthDayYear,
        }
    }

    #[must_use]
    pub fn format(self, date: &DateTime<Utc>) -> String {
        match self {
            Self::MonthDayYear => date.format("%-m/%-d/%Y").to_string(),
            Self::YearMonthDay => date.format("%Y/%-m/%-d").to_string(),
        }
    }
}

/// Placeholder shown while the request is in flight
#[must_use]
pub fn render_loading() -> String {
    "<div class=\"status-loading\"><span class=\"spinner\"></span><p>Loading repository status...</p></div>"
        .to_string()
}

/// Live repository card
#[must_use]
pub fn render_live(status: &RepositoryStatus, date_style: DateStyle) -> String {
    let visibility = if status.private { "Private" } else { "Public" };
    let language = status.language.as_deref().unwrap_or(MULTIPLE_LANGUAGES);

    let mut html = String::from("<div class=\"repo-card\">");

    let _ = write!(
        html,
        "<div class=\"repo-header\"><h3 class=\"repo-name\">{}</h3><span class=\"repo-badge\">{visibility}</span></div>",
        escape(&status.name)
    );
    let _ = write!(
        html,
        "<p class=\"repo-description\">{}</p>",
        escape(status.description.as_deref().unwrap_or_default())
    );

    html.push_str("<div class=\"repo-stats\">");
    for (label, value) in [
        ("Stars", status.stargazers_count.to_string()),
        ("Forks", status.forks_count.to_string()),
        ("Size", format!("{} KB", status.size)),
        ("Language", language.to_string()),
    ] {
        let _ = write!(
            html,
            "<div class=\"repo-stat\"><span class=\"repo-stat-label\">{label}</span> <span class=\"repo-stat-value\">{}</span></div>",
            escape(&value)
        );
    }
    html.push_str("</div>");

    let _ = write!(
        html,
        "<div class=\"repo-dates\"><span>Created: {}</span><span>Updated: {}</span></div>",
        date_style.format(&status.created_at),
        date_style.format(&status.updated_at)
    );

    let _ = write!(
        html,
        "<div class=\"repo-actions\"><a class=\"btn btn-primary\" href=\"{}\" target=\"_blank\" rel=\"noopener\">View Repository</a><button class=\"btn btn-secondary\" data-clone-url=\"{}\">Copy Clone URL</button></div>",
        escape(&status.html_url),
        escape(&status.clone_url)
    );

    html.push_str("</div>");
    html
}

/// Static block shown after any fetch failure
#[must_use]
pub fn render_fallback(fallback: &StaticFallbackStatus) -> String {
    format!(
        "<div class=\"repo-card repo-fallback\"><div class=\"repo-header\"><h3 class=\"repo-name\">{}</h3></div><p class=\"repo-description\">{}</p><div class=\"repo-stats\"><div class=\"repo-stat\"><span class=\"repo-stat-label\">Status</span> <span class=\"repo-stat-value\">{}</span></div><div class=\"repo-stat\"><span class=\"repo-stat-label\">License</span> <span class=\"repo-stat-value\">{}</span></div></div><div class=\"repo-actions\"><a class=\"btn btn-primary\" href=\"{}\" target=\"_blank\" rel=\"noopener\">View on GitHub</a></div></div>",
        escape(fallback.name),
        escape(fallback.description),
        escape(fallback.status),
        escape(fallback.license),
        escape(fallback.url)
    )
}
