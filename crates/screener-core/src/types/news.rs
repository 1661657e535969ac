//! News search results.

use serde::{Deserialize, Serialize};

/// A news article as returned by a news search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    /// Headline
    pub title: String,
    /// Summary or lead paragraph (empty when the provider has none)
    pub description: String,
}

impl NewsArticle {
    /// Create a new article.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Title and description joined, the text scanned for catalyst keywords.
    pub fn searchable_text(&self) -> String {
        format!("{}{}", self.title, self.description)
    }
}
