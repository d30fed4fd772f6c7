//! Live repository status panel
/// Remote retrieval
mod fetch;
/// Load/render lifecycle
mod panel;
/// Records and fallback literals
mod record;
/// Markup
mod render;

pub use fetch::{
    FetchError,
    HttpRepositoryFetcher,
    OfflineFetcher,
    RepositoryFetcher,
    SiteFetcher,
};
pub use panel::{
    PanelOutcome,
    RepositoryStatusPanel,
};
pub use record::{
    RepositoryStatus,
    StaticFallbackStatus,
};
pub use render::{
    DateStyle,
    STATUS_CSS,
    STATUS_STYLE_ID,
    render_fallback,
    render_live,
    render_loading,
};
