use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Post entity - a blog article with an optional cover image.
///
/// `author_id` and `created_at` are immutable after creation. Mutation
/// goes through [`Post::apply`], which only runs after the ownership
/// check in [`Post::ensure_author`] has passed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub summary: String,
    pub content: String,
    /// Reference into the image store, e.g. `uploads/<uuid>.jpg`.
    pub cover: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update to a post. `None` fields keep their prior value.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub cover: Option<String>,
}

impl Post {
    /// Create a new post.
    pub fn new(
        author_id: Uuid,
        title: String,
        summary: String,
        content: String,
        cover: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            summary,
            content,
            cover,
            created_at: now,
            updated_at: now,
        }
    }

    /// The ownership guard: only the creating user may mutate a post.
    ///
    /// Compares the identifier values directly. Serializing both sides
    /// to strings before comparing is a correctness hazard and is
    /// deliberately not done here.
    pub fn ensure_author(&self, user_id: Uuid) -> Result<(), DomainError> {
        if self.author_id == user_id {
            Ok(())
        } else {
            Err(DomainError::NotAuthor)
        }
    }

    /// Apply a partial update. Fields absent from the update retain
    /// their prior value; in particular, omitting a new cover leaves
    /// the existing cover reference untouched.
    pub fn apply(&mut self, update: PostUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(summary) = update.summary {
            self.summary = summary;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(cover) = update.cover {
            self.cover = Some(cover);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(author_id: Uuid) -> Post {
        Post::new(
            author_id,
            "Hello".into(),
            "A greeting".into(),
            "<p>Hi there</p>".into(),
            Some("uploads/cover.jpg".into()),
        )
    }

    #[test]
    fn author_passes_ownership_guard() {
        let author = Uuid::new_v4();
        let post = sample_post(author);
        assert!(post.ensure_author(author).is_ok());
    }

    #[test]
    fn non_author_is_rejected() {
        let post = sample_post(Uuid::new_v4());
        let other = Uuid::new_v4();
        assert!(matches!(
            post.ensure_author(other),
            Err(DomainError::NotAuthor)
        ));
    }

    #[test]
    fn partial_update_keeps_omitted_fields() {
        let author = Uuid::new_v4();
        let mut post = sample_post(author);
        let before = post.clone();

        post.apply(PostUpdate {
            title: Some("New title".into()),
            ..Default::default()
        });

        assert_eq!(post.title, "New title");
        assert_eq!(post.summary, before.summary);
        assert_eq!(post.content, before.content);
        assert_eq!(post.cover, before.cover);
        assert_eq!(post.created_at, before.created_at);
        assert!(post.updated_at >= before.updated_at);
    }

    #[test]
    fn update_can_replace_cover() {
        let mut post = sample_post(Uuid::new_v4());
        post.apply(PostUpdate {
            cover: Some("uploads/new.png".into()),
            ..Default::default()
        });
        assert_eq!(post.cover.as_deref(), Some("uploads/new.png"));
    }
}
