//! Landing-page news feed.

use grocer_commerce::ids::NewsItemId;
use grocer_commerce::news::NewsItem;

use super::Render;
use crate::domains::news::NewsContext;

const EXCERPT_CHARS: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsCard {
    pub id: NewsItemId,
    pub title: String,
    pub excerpt: String,
    pub image: Option<String>,
    /// Publication day, `YYYY-MM-DD`.
    pub published: String,
}

impl From<&NewsItem> for NewsCard {
    fn from(item: &NewsItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            excerpt: item.excerpt(EXCERPT_CHARS),
            image: item.image.clone(),
            published: item.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

pub struct NewsFeed {
    news: NewsContext,
}

impl NewsFeed {
    pub fn new(news: NewsContext) -> Self {
        Self { news }
    }

    /// Cards in feed order. A failed mutation keeps the loaded cards on
    /// screen and its message moves to [`NewsFeed::notice`]; only an empty
    /// feed renders as failed.
    pub fn render(&self) -> Render<Vec<NewsCard>> {
        let state = self.news.state();
        let news = &state.news;
        let error = if news.collection.is_empty() {
            news.error.as_deref()
        } else {
            None
        };
        Render::from_state(news.collection_loading, error, || {
            news.collection.iter().map(|item| NewsCard::from(&**item)).collect()
        })
    }

    /// Error to show alongside the cards, if any.
    pub fn notice(&self) -> Option<String> {
        let state = self.news.state();
        let news = &state.news;
        if news.collection.is_empty() || news.collection_loading {
            return None;
        }
        news.error.clone()
    }
}
