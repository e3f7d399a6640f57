//! Content sanitization port.

/// Allow-list HTML sanitizer applied to rich-text post content before it
/// is persisted. Authors supply markup verbatim; storing it unsanitized
/// is an injection risk, so every create/update path must pass content
/// through this stage.
pub trait ContentSanitizer: Send + Sync {
    fn clean(&self, html: &str) -> String;
}
