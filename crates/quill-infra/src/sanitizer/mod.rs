//! Allow-list HTML sanitization via ammonia.

use quill_core::ports::ContentSanitizer;

/// Sanitizer backed by ammonia's default allow-list.
///
/// Post content is author-supplied rich text; it never reaches the
/// repository without passing through here first.
pub struct AmmoniaSanitizer;

impl AmmoniaSanitizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AmmoniaSanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentSanitizer for AmmoniaSanitizer {
    fn clean(&self, html: &str) -> String {
        ammonia::clean(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_tags() {
        let sanitizer = AmmoniaSanitizer::new();
        let cleaned = sanitizer.clean("<p>hello</p><script>alert(1)</script>");

        assert!(cleaned.contains("<p>hello</p>"));
        assert!(!cleaned.contains("script"));
    }

    #[test]
    fn keeps_basic_formatting() {
        let sanitizer = AmmoniaSanitizer::new();
        let cleaned = sanitizer.clean("<h2>Title</h2><em>soft</em> <strong>loud</strong>");

        assert!(cleaned.contains("<em>soft</em>"));
        assert!(cleaned.contains("<strong>loud</strong>"));
    }

    #[test]
    fn strips_event_handlers() {
        let sanitizer = AmmoniaSanitizer::new();
        let cleaned = sanitizer.clean(r#"<img src="x.png" onerror="alert(1)">"#);

        assert!(!cleaned.contains("onerror"));
    }
}
