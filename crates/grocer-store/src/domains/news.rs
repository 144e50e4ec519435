//! News feed: list, detail and editing of CMS news items.

use std::sync::Arc;

use async_trait::async_trait;
use grocer_commerce::ids::NewsItemId;
use grocer_commerce::news::{NewsDraft, NewsItem, NewsPatch};
use grocer_data::{ApiError, Mutate};

use super::shared;
use crate::action::Action;
use crate::effects::Effects;
use crate::operation::Operation;
use crate::provider::Mount;
use crate::resource::{ResourceState, Slot};
use crate::store::{Reducer, Store};

/// Handle to an input field of the news editor form.
///
/// Kept in state so the editor can focus or read fields; not server data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef(String);

impl FieldRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub enum NewsAction {
    GetNewsStart,
    GetNewsSuccess(Vec<Arc<NewsItem>>),
    GetNewsFailure(String),

    GetNewsItemStart,
    GetNewsItemSuccess(Arc<NewsItem>),
    GetNewsItemFailure(String),

    AddNewsItemStart,
    AddNewsItemSuccess(Arc<NewsItem>),
    AddNewsItemFailure(String),

    UpdateNewsItemStart,
    UpdateNewsItemSuccess(Arc<NewsItem>),
    UpdateNewsItemFailure(String),

    DeleteNewsItemStart,
    /// Removes the given item, or the focused one when `None`.
    DeleteNewsItemSuccess(Option<NewsItemId>),
    DeleteNewsItemFailure(String),

    SetRefs(Vec<FieldRef>),
}

impl NewsAction {
    pub fn tag(&self) -> &'static str {
        use NewsAction::*;
        match self {
            GetNewsStart => "GET_NEWS_START",
            GetNewsSuccess(_) => "GET_NEWS_SUCCESS",
            GetNewsFailure(_) => "GET_NEWS_FAILURE",
            GetNewsItemStart => "GET_NEWSITEM_START",
            GetNewsItemSuccess(_) => "GET_NEWSITEM_SUCCESS",
            GetNewsItemFailure(_) => "GET_NEWSITEM_FAILURE",
            AddNewsItemStart => "ADD_NEWSITEM_START",
            AddNewsItemSuccess(_) => "ADD_NEWSITEM_SUCCESS",
            AddNewsItemFailure(_) => "ADD_NEWSITEM_FAILURE",
            UpdateNewsItemStart => "UPDATE_NEWSITEM_START",
            UpdateNewsItemSuccess(_) => "UPDATE_NEWSITEM_SUCCESS",
            UpdateNewsItemFailure(_) => "UPDATE_NEWSITEM_FAILURE",
            DeleteNewsItemStart => "DELETE_NEWSITEM_START",
            DeleteNewsItemSuccess(_) => "DELETE_NEWSITEM_SUCCESS",
            DeleteNewsItemFailure(_) => "DELETE_NEWSITEM_FAILURE",
            SetRefs(_) => "SET_REFS",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsState {
    pub news: ResourceState<NewsItem>,
    /// Editor field handles set by `SET_REFS`.
    pub item_refs: Option<Vec<FieldRef>>,
}

pub struct NewsReducer;

impl Reducer for NewsReducer {
    type State = NewsState;
    const DOMAIN: &'static str = "news";

    fn reduce(state: &Arc<NewsState>, action: &Action) -> Arc<NewsState> {
        let Action::News(action) = action else {
            return Arc::clone(state);
        };
        Arc::new(reduce(state, action))
    }
}

fn reduce(state: &NewsState, action: &NewsAction) -> NewsState {
    use NewsAction::*;

    let news = &state.news;
    let news = match action {
        GetNewsStart => news.started(Slot::Collection),
        GetNewsSuccess(items) => news.collection_loaded(items),
        GetNewsFailure(message) => news.collection_failed(message),

        GetNewsItemStart => news.started(Slot::Selected),
        GetNewsItemSuccess(item) => news.item_loaded(item),
        GetNewsItemFailure(message) => news.item_failed(message),

        AddNewsItemStart | UpdateNewsItemStart | DeleteNewsItemStart => {
            news.started(Slot::Mutation)
        }
        AddNewsItemSuccess(item) => news.added(item),
        UpdateNewsItemSuccess(item) => news.updated(item),
        DeleteNewsItemSuccess(id) => news.deleted(id.as_ref()),
        AddNewsItemFailure(message)
        | UpdateNewsItemFailure(message)
        | DeleteNewsItemFailure(message) => news.mutation_failed(message),

        SetRefs(refs) => {
            return NewsState {
                news: news.clone(),
                item_refs: Some(refs.clone()),
            }
        }
    };

    NewsState {
        news,
        item_refs: state.item_refs.clone(),
    }
}

/// News store plus its collaborator.
#[derive(Clone)]
pub struct NewsContext {
    store: Store<NewsReducer>,
    api: Arc<dyn Mutate<NewsItem>>,
    effects: Effects,
}

impl NewsContext {
    pub fn new(api: Arc<dyn Mutate<NewsItem>>, effects: Effects) -> Self {
        Self {
            store: Store::new(),
            api,
            effects,
        }
    }

    pub fn store(&self) -> &Store<NewsReducer> {
        &self.store
    }

    pub fn state(&self) -> Arc<NewsState> {
        self.store.state()
    }

    pub fn dispatch(&self, action: NewsAction) {
        self.store.dispatch(action);
    }

    fn operation(&self, name: &'static str) -> Operation<'_> {
        Operation::new(NewsReducer::DOMAIN, name, &self.effects)
    }

    pub async fn get_news(&self) -> Result<Vec<Arc<NewsItem>>, ApiError> {
        self.dispatch(NewsAction::GetNewsStart);
        self.operation("get_news")
            .run(
                self.api.fetch_collection(),
                |items| {
                    let items = shared(items);
                    self.dispatch(NewsAction::GetNewsSuccess(items.clone()));
                    items
                },
                |error| self.dispatch(NewsAction::GetNewsFailure(error.message().to_string())),
            )
            .await
    }

    pub async fn get_news_item(&self, id: &NewsItemId) -> Result<Arc<NewsItem>, ApiError> {
        self.dispatch(NewsAction::GetNewsItemStart);
        self.operation("get_news_item")
            .run(
                self.api.fetch_one(id),
                |item| {
                    let item = Arc::new(item);
                    self.dispatch(NewsAction::GetNewsItemSuccess(Arc::clone(&item)));
                    item
                },
                |error| self.dispatch(NewsAction::GetNewsItemFailure(error.message().to_string())),
            )
            .await
    }

    pub async fn add_news_item(&self, draft: NewsDraft) -> Result<Arc<NewsItem>, ApiError> {
        self.dispatch(NewsAction::AddNewsItemStart);
        self.operation("add_news_item")
            .announce("News item published")
            .run(
                self.api.create(&draft),
                |item| {
                    let item = Arc::new(item);
                    self.dispatch(NewsAction::AddNewsItemSuccess(Arc::clone(&item)));
                    item
                },
                |error| self.dispatch(NewsAction::AddNewsItemFailure(error.message().to_string())),
            )
            .await
    }

    pub async fn update_news_item(
        &self,
        id: &NewsItemId,
        patch: NewsPatch,
    ) -> Result<Arc<NewsItem>, ApiError> {
        self.dispatch(NewsAction::UpdateNewsItemStart);
        self.operation("update_news_item")
            .announce("News item updated")
            .run(
                self.api.update(id, &patch),
                |item| {
                    let item = Arc::new(item);
                    self.dispatch(NewsAction::UpdateNewsItemSuccess(Arc::clone(&item)));
                    item
                },
                |error| {
                    self.dispatch(NewsAction::UpdateNewsItemFailure(error.message().to_string()))
                },
            )
            .await
    }

    pub async fn delete_news_item(&self, id: &NewsItemId) -> Result<(), ApiError> {
        self.dispatch(NewsAction::DeleteNewsItemStart);
        self.operation("delete_news_item")
            .announce("News item deleted")
            .run(
                self.api.delete(id),
                |()| self.dispatch(NewsAction::DeleteNewsItemSuccess(Some(id.clone()))),
                |error| {
                    self.dispatch(NewsAction::DeleteNewsItemFailure(error.message().to_string()))
                },
            )
            .await
    }

    /// Register the editor's field handles.
    pub fn set_refs(&self, refs: Vec<FieldRef>) {
        self.dispatch(NewsAction::SetRefs(refs));
    }
}

#[async_trait]
impl Mount for NewsContext {
    const NAME: &'static str = "news";

    async fn on_mount(&self) {
        let _ = self.get_news().await;
    }
}
