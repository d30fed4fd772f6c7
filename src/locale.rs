//! Locale resolution and translation
/// Compiled-in translations
mod builtin;
/// Active-locale resolver
mod resolver;
/// Locale toggle shortcut
mod shortcut;
/// Persisted preference store
mod store;
/// Translation table
mod table;

pub use resolver::{
    LocaleResolver,
    LocaleState,
    Provenance,
    ResolveInputs,
};
pub use shortcut::{
    KeyPress,
    Shortcut,
    ShortcutParseError,
};
pub use store::{
    FilePreferenceStore,
    MemoryPreferenceStore,
    PreferenceStore,
    StoreError,
};
pub use table::{
    MissingKey,
    TranslationLoadError,
    TranslationTable,
    flatten_json,
    load_translation_file,
};
