//! Validation of a post's current-locale values before it is saved.

use crate::types::Post;

pub const CONTENT_MIN_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("{field} should not be blank")]
    Blank { field: &'static str },

    #[error("{field} is too short, expected at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} is not a valid email address")]
    InvalidEmail { field: &'static str },
}

impl Violation {
    /// Translation key shown to the user.
    pub fn message_key(&self) -> &'static str {
        match self {
            Violation::Blank { field: "title" } => "post.blank_title",
            Violation::Blank { field: "summary" } => "post.blank_summary",
            Violation::Blank { .. } => "post.blank_content",
            Violation::TooShort { .. } => "post.too_short_content",
            Violation::InvalidEmail { .. } => "post.invalid_author_email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("post is invalid ({} violation(s)): {}", .0.len(), join(.0))]
pub struct ValidationErrors(pub Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

impl Post {
    /// Check the values resolved through the current locale.
    ///
    /// Other locales are not inspected; every violation is reported.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Vec::new();

        if is_blank(self.title()) {
            violations.push(Violation::Blank { field: "title" });
        }
        if is_blank(self.summary()) {
            violations.push(Violation::Blank { field: "summary" });
        }
        if is_blank(self.content()) {
            violations.push(Violation::Blank { field: "content" });
        } else if self.content().chars().count() < CONTENT_MIN_LENGTH {
            violations.push(Violation::TooShort {
                field: "content",
                min: CONTENT_MIN_LENGTH,
            });
        }
        if !is_email(self.author_email()) {
            violations.push(Violation::InvalidEmail {
                field: "author_email",
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(violations))
        }
    }
}
