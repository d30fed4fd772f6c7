//! HTML escaping

/// Escapes text for use in element content and quoted attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    v_htmlescape::escape(text).to_string()
}
