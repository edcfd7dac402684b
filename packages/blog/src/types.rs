use crate::locale::{LocalizedField, DEFAULT_LOCALE};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Anything the storage layer hydrates and hands to post-load listeners.
pub trait Entity {
    fn entity_name(&self) -> &'static str;

    /// Locale capability, for entities that carry localized fields.
    fn as_localized_mut(&mut self) -> Option<&mut dyn HasLocale> {
        None
    }
}

/// Entities whose localized fields resolve through a current locale.
pub trait HasLocale {
    fn locale(&self) -> &str;
    fn set_locale(&mut self, locale: &str);
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
}

/// A blog post. Title, summary and content are stored per locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub(crate) id: Uuid,
    pub(crate) title: LocalizedField,
    pub(crate) slug: String,
    pub(crate) summary: LocalizedField,
    pub(crate) content: LocalizedField,
    pub(crate) author_email: String,
    pub(crate) published_at: OffsetDateTime,
    pub(crate) comments: Vec<Comment>,
    // used for display only, never persisted
    #[serde(skip, default = "default_locale")]
    pub(crate) locale: String,
}

impl Default for Post {
    fn default() -> Self {
        Self::new()
    }
}

impl Post {
    /// Page size of the latest-posts listing.
    pub const NUM_ITEMS: usize = 10;

    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: LocalizedField::new(),
            slug: String::new(),
            summary: LocalizedField::new(),
            content: LocalizedField::new(),
            author_email: String::new(),
            published_at: OffsetDateTime::now_utc(),
            comments: Vec::new(),
            locale: default_locale(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn title(&self) -> &str {
        self.title.get(&self.locale)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title.set(&self.locale, title);
    }

    pub fn title_translations(&self) -> &LocalizedField {
        &self.title
    }

    pub fn summary(&self) -> &str {
        self.summary.get(&self.locale)
    }

    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary.set(&self.locale, summary);
    }

    pub fn summary_translations(&self) -> &LocalizedField {
        &self.summary
    }

    pub fn content(&self) -> &str {
        self.content.get(&self.locale)
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content.set(&self.locale, content);
    }

    pub fn content_translations(&self) -> &LocalizedField {
        &self.content
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn set_slug(&mut self, slug: impl Into<String>) {
        self.slug = slug.into();
    }

    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    pub fn set_author_email(&mut self, author_email: impl Into<String>) {
        self.author_email = author_email.into();
    }

    /// Is the given user the author of this post?
    pub fn is_author(&self, user: &User) -> bool {
        user.email == self.author_email
    }

    pub fn published_at(&self) -> OffsetDateTime {
        self.published_at
    }

    pub fn set_published_at(&mut self, published_at: OffsetDateTime) {
        self.published_at = published_at;
    }

    /// Comments, newest first.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Attach a comment, replacing any attached comment with the same id.
    pub fn add_comment(&mut self, mut comment: Comment) {
        comment.post_id = self.id;
        self.comments.retain(|c| c.id != comment.id);
        self.comments.push(comment);
        self.comments
            .sort_by(|a, b| b.published_at.cmp(&a.published_at));
    }

    /// Detach a comment. It is deleted from storage on the next save.
    pub fn remove_comment(&mut self, comment_id: Uuid) -> Option<Comment> {
        let idx = self.comments.iter().position(|c| c.id == comment_id)?;
        Some(self.comments.remove(idx))
    }
}

impl HasLocale for Post {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn set_locale(&mut self, locale: &str) {
        self.locale = locale.to_string();
    }
}

impl Entity for Post {
    fn entity_name(&self) -> &'static str {
        "post"
    }

    fn as_localized_mut(&mut self) -> Option<&mut dyn HasLocale> {
        Some(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub author_email: String,
    pub published_at: OffsetDateTime,
}

impl Comment {
    pub fn new(content: impl Into<String>, author_email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id: Uuid::nil(),
            content: content.into(),
            author_email: author_email.into(),
            published_at: OffsetDateTime::now_utc(),
        }
    }
}

impl Entity for Comment {
    fn entity_name(&self) -> &'static str {
        "comment"
    }
}
