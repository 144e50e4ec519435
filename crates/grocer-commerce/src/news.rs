//! News items published through the CMS feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Mutable};
use crate::ids::NewsItemId;

/// A news article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    #[serde(rename = "_id")]
    pub id: NewsItemId,
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewsItem {
    /// First `max_chars` characters of the text, with an ellipsis if cut.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let mut chars = self.text.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{}...", head.trim_end())
        } else {
            head
        }
    }
}

impl Entity for NewsItem {
    type Id = NewsItemId;
    const KIND: &'static str = "news item";

    fn id(&self) -> &NewsItemId {
        &self.id
    }
}

impl Mutable for NewsItem {
    type Draft = NewsDraft;
    type Patch = NewsPatch;
}

/// Payload for publishing a news item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsDraft {
    pub title: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Partial edit of a news item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
